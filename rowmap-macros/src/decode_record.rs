use crate::decode_field::{FieldMetadata, decode_field};
use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{ItemStruct, LitStr, parse::ParseBuffer};

pub(crate) struct RecordMetadata {
    pub(crate) fields: Vec<FieldMetadata>,
    pub(crate) name: String,
    pub(crate) item: ItemStruct,
}

pub fn decode_record(item: ItemStruct) -> RecordMetadata {
    let fields = item.fields.iter().map(decode_field).collect();
    let mut name = item.ident.to_string().to_case(Case::Snake);
    if name.starts_with('_') {
        name.remove(0);
    }
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("rowmap") {
            let Ok(list) = meta.require_list() else {
                panic!(
                    "Error while parsing `rowmap`, use it like: `#[rowmap(attribute = value, ..)]`",
                );
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `name`, use it like: `#[rowmap(name = \"my_table\")]`"
                        );
                    };
                    name = value.value();
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
    RecordMetadata { fields, name, item }
}
