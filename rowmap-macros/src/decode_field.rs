use quote::ToTokens;
use rowmap_core::Tag;
use syn::{Field, Ident, LitStr, Type, parse::ParseBuffer};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    /// Field name as written in the binding path.
    pub(crate) path: String,
    pub(crate) tag: String,
    pub(crate) ignored: bool,
}

pub fn decode_field(field: &Field) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Record can only be derived for structs with named fields");
    let path = ident.to_string().trim_start_matches("r#").to_string();
    let mut metadata = FieldMetadata {
        ident,
        ty: field.ty.clone(),
        tag: path.clone(),
        path,
        ignored: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("rowmap") {
            let Ok(list) = meta.require_list() else {
                panic!(
                    "Error while parsing `rowmap`, use it like: `#[rowmap(attribute = value, ...)]`",
                );
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("tag") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `tag`, use it like: `#[rowmap(tag = \"column,omitempty\")]`");
                    };
                    metadata.tag = v.value();
                } else if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `name`, use it like: `#[rowmap(name = \"my_column\")]`");
                    };
                    metadata.tag = v.value();
                } else if arg.path.is_ident("ignore") {
                    let Err(..) = arg.value() else {
                        // value() is Err for Meta::Path
                        panic!("Error while parsing `ignore`, use it like: `#[rowmap(ignore)]`");
                    };
                    metadata.ignored = true;
                } else {
                    panic!(
                        "Unknown attribute `{}` inside rowmap macro",
                        arg.path.to_token_stream().to_string()
                    );
                }
                Ok(())
            });
        }
    }
    if Tag::parse(&metadata.tag).column().is_empty() {
        panic!(
            "Field `{}` has the tag `{}` without a column name",
            metadata.path, metadata.tag
        );
    }
    metadata
}
