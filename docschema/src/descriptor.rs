use inflector::Inflector;
use std::{
    collections::{BTreeMap, HashMap},
    fmt::{self, Debug},
    sync::Arc,
};

use crate::Document;

/// A handle to a document type.
#[derive(Clone)]
pub enum TypeRef {
    /// A descriptor that is already at hand.
    Resolved(Arc<Descriptor>),
    /// The name of a document type, resolved through the [`Registry`](crate::Registry) on first use.
    Named(String),
}

impl TypeRef {
    /// Refer to a document type by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Refer to a document type by its descriptor.
    #[must_use]
    pub fn of<D: Document>() -> Self {
        Self::Resolved(Arc::new(D::descriptor()))
    }

    /// The name of the document type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Resolved(descriptor) => &descriptor.name,
            Self::Named(name) => name,
        }
    }
}

impl Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(descriptor) => write!(f, "Resolved({})", descriptor.name),
            Self::Named(name) => write!(f, "Named({name})"),
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

/// The kind of a document field, which decides how it is converted.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    ObjectId,
    Uuid,
    /// Arbitrary JSON data.
    Dict,
    List(Box<FieldKind>),
    /// A document of a known type, stored inline.
    Embedded(TypeRef),
    /// A document stored inline, whose type is only known at runtime.
    GenericEmbedded,
    /// A reference to a stored document of a known type.
    Reference(TypeRef),
    /// A reference to a stored document of any type.
    GenericReference,
    /// String keys mapping to values of a single kind.
    Map(Box<FieldKind>),
    /// Excluded from both dumping and loading.
    Skip,
}

impl FieldKind {
    /// Whether values of this kind can be read back when loading.
    #[must_use]
    pub const fn loads(&self) -> bool {
        !matches!(
            self,
            Self::Skip | Self::GenericReference | Self::GenericEmbedded
        )
    }
}

/// A single field of a [`Descriptor`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            kind,
            required,
            name: name.into(),
        }
    }

    /// A field that is never dumped nor loaded.
    pub fn skip(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Skip, false)
    }
}

/// Describes a document type: its name, where it is stored, and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub name: String,
    pub collection: String,
    pub primary_key: Option<String>,
    pub fields: Vec<FieldSpec>,
}

impl Descriptor {
    /// Describe a new document type. The collection defaults to the pluralized, snake-cased name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();

        Self {
            fields: vec![],
            primary_key: None,
            collection: name.to_table_case(),
            name,
        }
    }

    /// Set the collection the document is stored in.
    #[must_use]
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the field holding the document's primary key.
    #[must_use]
    pub fn primary_key(mut self, field: impl Into<String>) -> Self {
        self.primary_key = Some(field.into());
        self
    }

    /// Add a field to the document.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Get a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The kind of the primary key, if the document has one.
    #[must_use]
    pub fn key_kind(&self) -> Option<&FieldKind> {
        self.primary_key
            .as_deref()
            .and_then(|key| self.get(key))
            .map(|field| &field.kind)
    }
}

/// Maps a Rust type to the [`FieldKind`] used to convert it.
pub trait FieldType {
    /// Whether the field must be present when loading.
    const REQUIRED: bool = true;

    fn kind() -> FieldKind;
}

macro_rules! impl_field_type {
    ($kind:ident => $($ty:ty),+) => {
        $(
            impl FieldType for $ty {
                fn kind() -> FieldKind {
                    FieldKind::$kind
                }
            }
        )+
    };
}

impl_field_type!(String => String);
impl_field_type!(Integer => i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);
impl_field_type!(Float => f32, f64);
impl_field_type!(Boolean => bool);
impl_field_type!(Uuid => uuid::Uuid);
impl_field_type!(Dict => serde_json::Value);

impl<T: FieldType> FieldType for Option<T> {
    const REQUIRED: bool = false;

    fn kind() -> FieldKind {
        T::kind()
    }
}

impl<T: FieldType> FieldType for Box<T> {
    const REQUIRED: bool = T::REQUIRED;

    fn kind() -> FieldKind {
        T::kind()
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::List(Box::new(T::kind()))
    }
}

impl<T: FieldType, S> FieldType for HashMap<String, T, S> {
    fn kind() -> FieldKind {
        FieldKind::Map(Box::new(T::kind()))
    }
}

impl<T: FieldType> FieldType for BTreeMap<String, T> {
    fn kind() -> FieldKind {
        FieldKind::Map(Box::new(T::kind()))
    }
}
