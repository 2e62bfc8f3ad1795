//! Fields convert a single attribute between its native value and JSON.
//!
//! Every field passes null through on both directions. Fields that cannot (or must not) produce a
//! value return [`Outcome::Omitted`], which leaves the attribute out of the result entirely.

mod embedded;
mod list;
mod map;
mod nested;
mod primitive;
mod reference;
mod skip;

use rbs::Value;
use serde_json::Value as Json;
use std::{
    fmt::Debug,
    sync::{Arc, OnceLock},
};

use crate::{Context, Descriptor, Error, FieldKind, Registry, TypeRef};

pub use embedded::GenericEmbeddedDocument;
pub use list::List;
pub use map::Map;
pub use nested::Nested;
pub use primitive::{Boolean, Float, Integer, ObjectIdField, Raw, Str, UuidField};
pub use reference::{GenericReference, Reference};
pub use skip::Skip;

/// The result of converting a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The converted value.
    Value(T),
    /// The field contributes nothing, and is left out of the result.
    Omitted,
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }

    /// The converted value, if there is one.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Omitted => None,
        }
    }
}

/// Converts one attribute of a document.
pub trait Field: Debug + Send + Sync {
    /// Convert a native value into JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be converted.
    fn serialize(&self, value: &Value, ctx: &mut Context<'_>) -> Result<Outcome<Json>, Error>;

    /// Convert JSON into a native value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be converted.
    fn deserialize(&self, value: &Json, ctx: &mut Context<'_>) -> Result<Outcome<Value>, Error>;
}

/// Build the field that converts values of the given kind.
#[must_use]
pub fn build(kind: &FieldKind) -> Box<dyn Field> {
    match kind {
        FieldKind::String => Box::new(Str),
        FieldKind::Integer => Box::new(Integer),
        FieldKind::Float => Box::new(Float),
        FieldKind::Boolean => Box::new(Boolean),
        FieldKind::ObjectId => Box::new(ObjectIdField),
        FieldKind::Uuid => Box::new(UuidField),
        FieldKind::Dict => Box::new(Raw),
        FieldKind::List(inner) => Box::new(List::new(build(inner))),
        FieldKind::Embedded(r#type) => Box::new(Nested::new(r#type.clone())),
        FieldKind::GenericEmbedded => Box::new(GenericEmbeddedDocument),
        FieldKind::Reference(r#type) => Box::new(Reference::new(r#type.clone())),
        FieldKind::GenericReference => Box::new(GenericReference),
        FieldKind::Map(inner) => Box::new(Map::new(build(inner))),
        FieldKind::Skip => Box::new(Skip),
    }
}

/// A document type handle, resolved on first use and remembered afterwards.
#[derive(Debug)]
struct DocumentType {
    target: TypeRef,
    resolved: OnceLock<Arc<Descriptor>>,
}

impl DocumentType {
    fn new(target: TypeRef) -> Self {
        Self {
            target,
            resolved: OnceLock::new(),
        }
    }

    fn get(&self, registry: &Registry) -> Result<&Arc<Descriptor>, Error> {
        if let Some(descriptor) = self.resolved.get() {
            return Ok(descriptor);
        }

        let descriptor = registry.resolve(&self.target)?;

        Ok(self.resolved.get_or_init(|| descriptor))
    }
}
