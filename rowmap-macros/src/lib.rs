mod decode_field;
mod decode_record;
mod record_plan;

use decode_record::decode_record;
use proc_macro::TokenStream;
use quote::quote;
use record_plan::record_plan;
use syn::{ItemStruct, parse_macro_input};

#[proc_macro_derive(Record, attributes(rowmap))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let record = decode_record(parse_macro_input!(input as ItemStruct));
    let name = &record.item.ident;
    let table_name = &record.name;
    let (impl_generics, ty_generics, where_clause) = record.item.generics.split_for_impl();
    let plan = record_plan(&record);
    quote! {
        impl #impl_generics ::rowmap::Record for #name #ty_generics #where_clause {
            fn table_name() -> &'static str {
                #table_name
            }

            #plan
        }
    }
    .into()
}
