#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use syn::{parse_macro_input, DeriveInput};

mod document;

#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let mut ast = parse_macro_input!(input as DeriveInput);
    let opts = match deluxe::extract_attributes(&mut ast) {
        Ok(opts) => opts,
        Err(e) => return e.into_compile_error().into(),
    };

    document::r#impl(&ast, opts)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
