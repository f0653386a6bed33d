use quote::ToTokens;
use syn::{GenericArgument, PathArguments, PathSegment, Type};

/// Storage kind name inferred from a Rust field type.
/// `Option<T>` is unwrapped; anything unrecognised keeps its own name.
pub fn storage_name(ty: &Type) -> String {
    match ty {
        Type::Reference(reference) => storage_name(&reference.elem),
        Type::Group(group) => storage_name(&group.elem),
        Type::Paren(paren) => storage_name(&paren.elem),
        Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return ty.to_token_stream().to_string();
            };
            if segment.ident == "Option"
                && let Some(inner) = first_type_arg(segment)
            {
                return storage_name(inner);
            }

            scalar_name(&segment.ident.to_string())
        }
        _ => ty.to_token_stream().to_string(),
    }
}

fn scalar_name(ident: &str) -> String {
    match ident {
        "i8" | "u8" | "i16" | "u16" => "smallint",
        "i32" | "u32" => "integer",
        "i64" | "u64" | "isize" | "usize" => "bigint",
        "String" | "str" => "string",
        "bool" => "boolean",
        "f32" | "f64" => "float",
        other => other,
    }
    .to_string()
}

fn first_type_arg(segment: &PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}
