use crate::storage::storage_name;
use darling::{
    Error as DarlingError, FromDeriveInput, FromField, FromMeta,
    ast::Data,
    util::Ignored,
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics, Ident, Type, Visibility};

// derive_tree_entity
pub fn derive_tree_entity(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let entity = match EntityInput::from_derive_input(&input) {
        Ok(entity) => entity,
        Err(err) => return err.write_errors(),
    };

    entity.expand().unwrap_or_else(DarlingError::write_errors)
}

///
/// EntityInput
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(tree), supports(struct_named))]
struct EntityInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, FieldInput>,

    #[darling(default)]
    name: Option<String>,

    #[darling(default)]
    mapped_superclass: bool,
}

impl EntityInput {
    fn expand(&self) -> Result<TokenStream, DarlingError> {
        let ident = &self.ident;
        let name = self.name.clone().unwrap_or_else(|| ident.to_string());
        let mapped_superclass = self.mapped_superclass;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let Some(fields) = self.data.as_ref().take_struct() else {
            return Err(DarlingError::unsupported_shape("enum").with_span(ident));
        };

        let mut errors = DarlingError::accumulator();
        let decls: Vec<TokenStream> = fields
            .iter()
            .filter_map(|field| errors.handle(field.declaration()))
            .flatten()
            .collect();
        errors.finish()?;

        Ok(quote! {
            impl #impl_generics ::nestset::TreeEntity for #ident #ty_generics #where_clause {
                fn type_model() -> ::nestset::model::TypeModel {
                    ::nestset::model::TypeModel::new(#name)
                        .mapped_superclass(#mapped_superclass)
                        #(#decls)*
                }
            }
        })
    }
}

///
/// FieldInput
///

#[derive(Debug, FromField)]
#[darling(attributes(tree))]
struct FieldInput {
    ident: Option<Ident>,
    ty: Type,
    vis: Visibility,

    #[darling(default)]
    left: bool,

    #[darling(default)]
    right: bool,

    #[darling(default)]
    parent: bool,

    #[darling(default)]
    level: bool,

    #[darling(default)]
    inherited: bool,

    /// Not reflected at all.
    #[darling(default)]
    skip: bool,

    /// Reflected but not mapped.
    #[darling(default)]
    transient: bool,

    #[darling(default)]
    column: Option<String>,

    #[darling(default)]
    association: Option<AssociationArgs>,
}

impl FieldInput {
    // Builder call declaring this field on the type model, if reflected.
    fn declaration(&self) -> Result<Option<TokenStream>, DarlingError> {
        if self.skip {
            return Ok(None);
        }

        let Some(ident) = &self.ident else {
            return Err(DarlingError::custom("TreeEntity requires named fields"));
        };
        let property = self.property(ident);

        if self.association.is_some() && self.column.is_some() {
            return Err(DarlingError::custom(
                "a field is either a column or an association, not both",
            )
            .with_span(ident));
        }
        if self.transient && (self.association.is_some() || self.column.is_some()) {
            return Err(DarlingError::custom("a transient field cannot be mapped").with_span(ident));
        }

        let decl = if self.transient {
            quote!(.property(#property))
        } else if let Some(association) = &self.association {
            let kind = association
                .kind_tokens()
                .map_err(|err| err.with_span(ident))?;
            let target = &association.target;
            let inherited = (self.inherited || association.inherited).then(|| quote!(.inherited()));

            quote! {
                .association(
                    #property,
                    ::nestset::model::AssociationMapping::new(#kind, #target) #inherited,
                )
            }
        } else {
            let column = self
                .column
                .clone()
                .unwrap_or_else(|| storage_name(&self.ty));
            let inherited = self.inherited.then(|| quote!(.inherited()));

            quote! {
                .field(
                    #property,
                    ::nestset::model::FieldMapping::new(
                        ::nestset::types::StorageKind::from_name(#column)
                    ) #inherited,
                )
            }
        };

        Ok(Some(decl))
    }

    fn property(&self, ident: &Ident) -> TokenStream {
        let name = ident.to_string();
        let visibility = match &self.vis {
            Visibility::Inherited => quote!(Private),
            Visibility::Public(_) => quote!(Public),
            Visibility::Restricted(_) => quote!(Protected),
        };
        let markers = [
            (self.left, quote!(Left)),
            (self.right, quote!(Right)),
            (self.parent, quote!(Parent)),
            (self.level, quote!(Level)),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .map(|(_, role)| {
            quote! {
                .marker(::nestset::role::Marker::tree(::nestset::role::TreeRole::#role))
            }
        });

        quote! {
            ::nestset::model::PropertyModel::new(#name)
                .visibility(::nestset::types::Visibility::#visibility)
                #(#markers)*
        }
    }
}

///
/// AssociationArgs
///

#[derive(Debug, FromMeta)]
struct AssociationArgs {
    kind: String,
    target: String,

    #[darling(default)]
    inherited: bool,
}

impl AssociationArgs {
    fn kind_tokens(&self) -> Result<TokenStream, DarlingError> {
        let variant = match self.kind.as_str() {
            "many_to_one" => quote!(ManyToOne),
            "one_to_one" => quote!(OneToOne),
            "one_to_many" => quote!(OneToMany),
            "many_to_many" => quote!(ManyToMany),
            other => {
                return Err(DarlingError::unknown_value(other));
            }
        };

        Ok(quote!(::nestset::types::AssociationKind::#variant))
    }
}
