use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug};

use crate::{value, FieldKind, FieldType, Stored, TypeRef};

/// ## A reference to another stored document.
/// The reference is stored as the primary key of the related document. Once loaded through a
/// schema, it also holds the document itself.
///
/// ## Example
///
/// ```rust
/// # use docschema::{Document, types::{ObjectId, Reference}};
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Debug, Clone, Serialize, Deserialize, Document)]
/// # struct User {
/// #   id: u64,
/// # }
/// #[derive(Debug, Serialize, Deserialize, Document)]
/// struct Post {
///   id: ObjectId,
///   author: Reference<User>,
/// }
///
/// let post = Post { id: ObjectId::new(), author: Reference::new(1) };
/// assert_eq!(*post.author.key(), 1);
/// assert!(!post.author.is_loaded());
/// ```
#[derive(Clone)]
pub struct Reference<T: Stored> {
    key: T::PrimaryKey,
    document: Option<T>,
}

impl<T: Stored> Reference<T> {
    /// Refer to the document with the given primary key.
    pub const fn new(key: T::PrimaryKey) -> Self {
        Self {
            key,
            document: None,
        }
    }

    /// The primary key of the referenced document.
    pub const fn key(&self) -> &T::PrimaryKey {
        &self.key
    }

    /// The referenced document, if it has been loaded.
    pub const fn document(&self) -> Option<&T> {
        self.document.as_ref()
    }

    /// Whether the referenced document has been loaded.
    pub const fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn into_document(self) -> Option<T> {
        self.document
    }
}

impl<T: Stored> From<T> for Reference<T> {
    fn from(document: T) -> Self {
        Self {
            key: document.primary_key().clone(),
            document: Some(document),
        }
    }
}

impl<T: Stored> From<&T> for Reference<T> {
    fn from(document: &T) -> Self {
        Self::new(document.primary_key().clone())
    }
}

impl<T: Stored> Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.document {
            Some(document) => document.fmt(f),
            None => write!(f, "Reference<{}>({})", T::NAME, self.key),
        }
    }
}

impl<T: Stored> PartialEq for Reference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T: Stored> Serialize for Reference<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.key.serialize(serializer)
    }
}

impl<'de, T: Stored> Deserialize<'de> for Reference<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = rbs::Value::deserialize(deserializer)?;

        if matches!(value, rbs::Value::Map(_)) {
            let document: T = value::from_native(value).map_err(D::Error::custom)?;

            return Ok(Self::from(document));
        }

        Ok(Self::new(
            value::from_native(value).map_err(D::Error::custom)?,
        ))
    }
}

impl<T: Stored> FieldType for Reference<T> {
    fn kind() -> FieldKind {
        FieldKind::Reference(TypeRef::named(T::NAME))
    }
}

#[cfg(feature = "schema")]
impl<T: Stored> schemars::JsonSchema for Reference<T>
where
    T::PrimaryKey: schemars::JsonSchema,
{
    fn schema_name() -> String {
        <T::PrimaryKey>::schema_name()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        gen.subschema_for::<T::PrimaryKey>()
    }
}

/// A reference to a stored document of any type.
///
/// The reference remembers the name of the document type next to the primary key. Since the type
/// is only known at runtime, schemas dump generic references but never load them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericReference {
    #[serde(rename = "_cls")]
    document: String,
    #[serde(rename = "_ref")]
    key: rbs::Value,
}

impl GenericReference {
    /// Refer to the given document.
    ///
    /// # Errors
    ///
    /// Returns an error if the primary key cannot be serialized.
    pub fn new<T: Stored>(document: &T) -> Result<Self, rbs::Error> {
        Ok(Self {
            document: T::NAME.to_string(),
            key: value::to_native(document.primary_key())?,
        })
    }

    /// The name of the referenced document type.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The primary key of the referenced document.
    #[must_use]
    pub const fn key(&self) -> &rbs::Value {
        &self.key
    }

    /// Whether the reference points to a document of type `T`.
    #[must_use]
    pub fn is<T: Stored>(&self) -> bool {
        self.document == T::NAME
    }

    /// The primary key, if the reference points to a document of type `T`.
    #[must_use]
    pub fn key_for<T: Stored>(&self) -> Option<T::PrimaryKey> {
        if !self.is::<T>() {
            return None;
        }

        value::from_native(self.key.clone()).ok()
    }
}

impl FieldType for GenericReference {
    fn kind() -> FieldKind {
        FieldKind::GenericReference
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for GenericReference {
    fn schema_name() -> String {
        "GenericReference".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <serde_json::Value>::json_schema(gen)
    }
}
