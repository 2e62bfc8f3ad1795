use serde::{
    de::Error, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{
    value::{self, Entries},
    Document, FieldKind, FieldType,
};

/// An embedded document whose type is only known at runtime.
///
/// The name of the document type is stored next to its attributes, under `_cls`, so that the
/// matching schema can be picked when the document is dumped.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericEmbedded {
    document: String,
    entries: Entries,
}

impl GenericEmbedded {
    /// The attribute holding the name of the document type.
    pub const TYPE_KEY: &'static str = "_cls";

    /// Embed the given document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not serialize into a map.
    pub fn new<T: Document>(document: &T) -> Result<Self, rbs::Error> {
        let entries = value::entries(&value::to_native(document)?)?.ok_or_else(|| {
            <rbs::Error as serde::ser::Error>::custom(format!(
                "{} does not serialize into a map",
                T::NAME
            ))
        })?;

        Ok(Self {
            entries,
            document: T::NAME.to_string(),
        })
    }

    /// The name of the embedded document type.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The attributes of the embedded document.
    #[must_use]
    pub const fn entries(&self) -> &Entries {
        &self.entries
    }

    /// Whether the embedded document is of type `T`.
    #[must_use]
    pub fn is<T: Document>(&self) -> bool {
        self.document == T::NAME
    }

    /// Get the embedded document back, if it is of type `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the attributes do not match `T`.
    pub fn downcast<T: Document>(&self) -> Result<Option<T>, rbs::Error> {
        if !self.is::<T>() {
            return Ok(None);
        }

        value::from_native(value::from_entries(self.entries.clone())?).map(Some)
    }
}

impl Serialize for GenericEmbedded {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;

        map.serialize_entry(Self::TYPE_KEY, &self.document)?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for GenericEmbedded {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = Entries::deserialize(deserializer)?;

        let Some(rbs::Value::String(document)) = entries.remove(Self::TYPE_KEY) else {
            return Err(D::Error::custom(format!(
                "embedded document is missing its `{}` type name",
                Self::TYPE_KEY
            )));
        };

        Ok(Self { document, entries })
    }
}

impl FieldType for GenericEmbedded {
    fn kind() -> FieldKind {
        FieldKind::GenericEmbedded
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for GenericEmbedded {
    fn schema_name() -> String {
        "GenericEmbedded".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <serde_json::Value>::json_schema(gen)
    }
}
