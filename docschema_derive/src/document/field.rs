use deluxe::ExtractAttributes;
use proc_macro2::TokenStream;
use quote::{quote_spanned, ToTokens};
use syn::{ext::IdentExt, spanned::Spanned, FieldsNamed, Type};

use super::serde;

pub struct Fields {
    ast: FieldsNamed,
    pub fields: Vec<Field>,
}

pub struct Field {
    pub attr: Attr,
    pub ty: syn::Type,
    pub ident: syn::Ident,
    pub name: String,
    serde: serde::Attrs,
    ast: syn::Field,
}

#[derive(ExtractAttributes, Default)]
#[deluxe(attributes(document), default)]
pub struct Attr {
    pub primary: bool,
    pub skip: bool,
}

impl Field {
    pub fn new(mut field: syn::Field, container: &serde::Container) -> syn::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(&field, "Field must be named"))?;
        let attr = Attr::extract_attributes(&mut field.attrs)?;
        let serde = serde::Attrs::from_attrs(&field.attrs)?;

        if attr.primary && attr.skip {
            return Err(syn::Error::new_spanned(
                &field,
                "The primary key cannot be skipped",
            ));
        }

        let name = serde.rename.clone().unwrap_or_else(|| {
            let ident = ident.unraw().to_string();

            container
                .rename_all
                .map_or_else(|| ident.clone(), |rule| rule.apply(&ident))
        });

        Ok(Self {
            attr,
            name,
            serde,
            ident,
            ty: field.ty.clone(),
            ast: field,
        })
    }

    pub fn span(&self) -> proc_macro2::Span {
        self.ast.span()
    }

    /// Whether the field is left out of the document, by either derive.
    pub fn is_skipped(&self) -> bool {
        self.attr.skip || self.serde.skip
    }

    /// The name of a field type that never loads, if the field has one.
    fn unloaded_type(&self) -> Option<String> {
        if self.attr.skip {
            return Some("Skipped".to_string());
        }

        let Type::Path(ty) = &self.ty else {
            return None;
        };

        ty.path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .filter(|name| name == "GenericReference" || name == "GenericEmbedded")
            .map(|name| format!("`{name}`"))
    }

    fn is_option(&self) -> bool {
        matches!(&self.ty, Type::Path(ty) if ty.path.segments.last().is_some_and(|segment| segment.ident == "Option"))
    }

    pub fn spec(&self) -> TokenStream {
        let name = &self.name;
        let ty = &self.ty;

        if self.is_skipped() {
            return quote_spanned! {self.span() =>
                ::docschema::FieldSpec::skip(#name)
            };
        }

        quote_spanned! {self.span() =>
            ::docschema::FieldSpec::new(
                #name,
                <#ty as ::docschema::FieldType>::kind(),
                <#ty as ::docschema::FieldType>::REQUIRED,
            )
        }
    }
}

impl ToTokens for Field {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.ast.to_tokens(tokens);
    }
}

impl Fields {
    pub fn primary_key(&self) -> syn::Result<&Field> {
        let mut primary = None;
        let mut id_field = None;

        for field in &self.fields {
            if field.attr.primary {
                if primary.is_some() {
                    return Err(syn::Error::new_spanned(
                        field,
                        "Only one field can be marked as primary",
                    ));
                }

                primary = Some(field);
            } else if field.ident == "id" && !field.is_skipped() {
                id_field = Some(field);
            }
        }

        primary.or(id_field).ok_or_else(|| {
            syn::Error::new_spanned(
                self,
                "No primary key found. Either mark a field with `#[document(primary)]`, name it `id`, or mark the document as `#[document(embedded)]`.",
            )
        })
    }

    pub fn specs(&self) -> Vec<TokenStream> {
        self.fields.iter().map(Field::spec).collect()
    }
}

impl ToTokens for Fields {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.ast.to_tokens(tokens);
    }
}

impl Fields {
    pub fn new(ast: FieldsNamed, container: &serde::Container) -> syn::Result<Self> {
        let fields = ast
            .named
            .iter()
            .map(|f| Field::new(f.clone(), container))
            .collect::<syn::Result<Vec<_>>>()?;

        for field in &fields {
            let defaulted = container.default || field.serde.default || field.serde.skip;

            if let Some(ty) = field.unloaded_type() {
                if !defaulted && !field.is_option() {
                    return Err(syn::Error::new_spanned(
                        field,
                        format!("{ty} fields are never loaded, so they must be an `Option` or have `#[serde(default)]`"),
                    ));
                }
            }
        }

        Ok(Self { ast, fields })
    }
}
