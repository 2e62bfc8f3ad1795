use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Debug, Display, Formatter},
    ops::Deref,
    str::FromStr,
};

use crate::{FieldKind, FieldType};

/// A 12-byte document identifier, written as 24 hexadecimal characters.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ObjectId(bson::oid::ObjectId);

impl ObjectId {
    /// Generate a new, unique identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(bson::oid::ObjectId::new())
    }

    /// The all-zero identifier.
    #[must_use]
    pub const fn nil() -> Self {
        Self(bson::oid::ObjectId::from_bytes([0; 12]))
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::nil()
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Debug for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.0.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(bson::oid::ObjectId::parse_str(s)?))
    }
}

impl Deref for ObjectId {
    type Target = bson::oid::ObjectId;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;

        hex.parse().map_err(|_| D::Error::custom(format!("invalid ObjectId `{hex}`")))
    }
}

impl FieldType for ObjectId {
    fn kind() -> FieldKind {
        FieldKind::ObjectId
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for ObjectId {
    fn schema_name() -> String {
        "ObjectId".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(gen)
    }
}
