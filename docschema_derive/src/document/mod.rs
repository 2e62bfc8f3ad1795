use deluxe::ExtractAttributes;
use inflector::Inflector;
use pluralizer::pluralize;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, DeriveInput};

use self::field::{Field, Fields};

mod field;
mod serde;

#[derive(ExtractAttributes, Default)]
#[deluxe(attributes(document), default)]
pub struct Opts {
    name: Option<String>,
    collection: Option<String>,
    embedded: bool,
}

pub fn r#impl(ast: &DeriveInput, opts: Opts) -> syn::Result<TokenStream> {
    let syn::Data::Struct(r#struct) = &ast.data else {
        return Err(syn::Error::new_spanned(
            ast,
            "Document derive only supports structs",
        ));
    };

    let syn::Fields::Named(struct_fields) = &r#struct.fields else {
        return Err(syn::Error::new_spanned(
            ast,
            "Document derive only supports named fields",
        ));
    };

    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "Document derive does not support generic structs",
        ));
    }

    let container = serde::Container::from_attrs(&ast.attrs)?;
    let fields = Fields::new(struct_fields.clone(), &container)?;
    let name = &ast.ident;
    let document_name = opts.name.unwrap_or_else(|| name.unraw().to_string());

    let (stored_impl, stored_descriptor) = if opts.embedded {
        (TokenStream::new(), TokenStream::new())
    } else {
        let primary_key = fields.primary_key()?;
        let collection = opts
            .collection
            .unwrap_or_else(|| pluralize(&document_name.to_snake_case(), 2, false));

        (
            impl_stored(name, primary_key, &collection),
            quote! {
                .collection(#collection)
                .primary_key(<Self as ::docschema::Stored>::PRIMARY_KEY)
            },
        )
    };

    let field_specs = fields.specs();

    let gen = quote! {
        const _: () = {
            #[automatically_derived]
            impl ::docschema::Document for #name {
                const NAME: &'static str = #document_name;

                fn descriptor() -> ::docschema::Descriptor {
                    ::docschema::Descriptor::new(<Self as ::docschema::Document>::NAME)
                        #stored_descriptor
                        #(.field(#field_specs))*
                }
            }

            #[automatically_derived]
            impl ::docschema::FieldType for #name {
                fn kind() -> ::docschema::FieldKind {
                    ::docschema::FieldKind::Embedded(::docschema::TypeRef::named(
                        <Self as ::docschema::Document>::NAME,
                    ))
                }
            }

            #stored_impl
        };
    };

    Ok(gen)
}

fn impl_stored(name: &syn::Ident, primary_key: &Field, collection: &str) -> TokenStream {
    let ident = &primary_key.ident;
    let key_name = &primary_key.name;
    let key_type = &primary_key.ty;

    quote! {
        #[automatically_derived]
        impl ::docschema::Stored for #name {
            type PrimaryKey = #key_type;
            const PRIMARY_KEY: &'static str = #key_name;
            const COLLECTION: &'static str = #collection;

            fn primary_key(&self) -> &Self::PrimaryKey {
                &self.#ident
            }
        }
    }
}
