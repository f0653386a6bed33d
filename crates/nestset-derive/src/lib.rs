use proc_macro::TokenStream;

mod entity;
mod storage;

/// Reflect a named struct into a `nestset::model::TypeModel`.
///
/// Field attributes: `#[tree(left)]`, `#[tree(right)]`, `#[tree(parent)]`,
/// `#[tree(level)]`, `#[tree(column = "kind")]`,
/// `#[tree(association(kind = "many_to_one", target = "T"))]`,
/// `#[tree(inherited)]`, `#[tree(transient)]` and `#[tree(skip)]`.
#[proc_macro_derive(TreeEntity, attributes(tree))]
pub fn derive_tree_entity(input: TokenStream) -> TokenStream {
    entity::derive_tree_entity(input.into()).into()
}
