use syn::{meta::ParseNestedMeta, Attribute, LitStr, Token};

/// The container-level serde attributes that change the layout of a document.
#[derive(Default)]
pub struct Container {
    pub rename_all: Option<RenameRule>,
    pub default: bool,
}

/// The field-level serde attributes that change the layout of a document.
#[derive(Default)]
pub struct Attrs {
    pub rename: Option<String>,
    pub default: bool,
    pub skip: bool,
}

impl Container {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut container = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    container.rename_all = Some(RenameRule::from_lit(&same_name(&meta)?)?);
                } else if meta.path.is_ident("default") {
                    container.default = true;
                    skip_value(&meta)?;
                } else {
                    skip_value(&meta)?;
                }

                Ok(())
            })?;
        }

        Ok(container)
    }
}

impl Attrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut field = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    field.rename = Some(same_name(&meta)?.value());
                } else if meta.path.is_ident("default") {
                    field.default = true;
                    skip_value(&meta)?;
                } else if meta.path.is_ident("skip") {
                    field.skip = true;
                } else if meta.path.is_ident("flatten") {
                    return Err(meta.error("Documents do not support flattened fields"));
                } else {
                    skip_value(&meta)?;
                }

                Ok(())
            })?;
        }

        Ok(field)
    }
}

/// Read a `rename`-style value, which must be the same in both directions.
fn same_name(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    if meta.input.peek(Token![=]) {
        return meta.value()?.parse();
    }

    let mut serialize = None;
    let mut deserialize = None;

    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            serialize = Some(nested.value()?.parse::<LitStr>()?);
        } else if nested.path.is_ident("deserialize") {
            deserialize = Some(nested.value()?.parse::<LitStr>()?);
        } else {
            return Err(nested.error("expected `serialize` or `deserialize`"));
        }

        Ok(())
    })?;

    match (serialize, deserialize) {
        (Some(serialize), Some(deserialize)) if serialize.value() == deserialize.value() => {
            Ok(serialize)
        },
        _ => Err(meta.error(
            "Documents must use the same name when serializing and deserializing",
        )),
    }
}

fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.input.parse::<proc_macro2::TokenTree>()?;
    }

    Ok(())
}

/// The case conventions serde's `rename_all` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn from_lit(lit: &LitStr) -> syn::Result<Self> {
        Ok(match lit.value().as_str() {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            other => {
                return Err(syn::Error::new_spanned(
                    lit,
                    format!("unknown rename rule `{other}`"),
                ))
            },
        })
    }

    /// Rename a snake_case field the same way serde does.
    pub fn apply(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
            Self::Pascal => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;

                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }

                pascal
            },
            Self::Camel => {
                let pascal = Self::Pascal.apply(field);
                let mut chars = pascal.chars();

                chars.next().map_or_else(String::new, |first| {
                    first.to_ascii_lowercase().to_string() + chars.as_str()
                })
            },
        }
    }
}
