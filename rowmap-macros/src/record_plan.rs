use crate::decode_record::RecordMetadata;
use proc_macro2::TokenStream;
use quote::quote;

/// Body of `Record::plan`, one nested and one leaf probe per field.
///
/// The probes resolve at compile time: record fields contribute their own plan, scalar fields a
/// single binding, and a field that is neither fails to compile.
pub(crate) fn record_plan(record: &RecordMetadata) -> TokenStream {
    let bindings = record.fields.iter().filter(|f| !f.ignored).map(|f| {
        let ident = &f.ident;
        let ty = &f.ty;
        let path = &f.path;
        let tag = &f.tag;
        quote! {
            fields.extend(
                (&&::rowmap::Probe::<#ty>::new()).nested::<Self>(#path, |r| &mut r.#ident),
            );
            fields.extend(
                (&&::rowmap::Probe::<#ty>::new()).leaf::<Self>(#path, #tag, |r| &mut r.#ident),
            );
        }
    });
    quote! {
        fn plan() -> &'static ::rowmap::Plan<Self> {
            ::rowmap::Plan::cached(|| {
                #[allow(unused_imports)]
                use ::rowmap::{ViaLeaf as _, ViaNested as _, ViaRecord as _, ViaValue as _};
                let mut fields = ::std::vec::Vec::new();
                #(#bindings)*
                ::rowmap::Plan::new(fields)
            })
        }
    }
}
