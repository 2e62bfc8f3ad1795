use rbs::Value;
use serde_json::Value as Json;
use std::sync::Arc;

use super::{DocumentType, Field, Outcome};
use crate::{
    store::StoreError,
    value::{self, display_key},
    Context, Descriptor, Error, Registry, TypeRef,
};

/// A reference to a stored document of a known type.
///
/// Dumps the primary key of the referenced document. Loading looks the key up in the store, and
/// yields the referenced document.
#[derive(Debug)]
pub struct Reference {
    document_type: DocumentType,
}

impl Reference {
    /// Refer to documents of the given type. Named types are resolved on first use.
    #[must_use]
    pub fn new(target: TypeRef) -> Self {
        Self {
            document_type: DocumentType::new(target),
        }
    }

    /// The descriptor of the referenced document type.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is given by name and has not been registered.
    pub fn document_type(&self, registry: &Registry) -> Result<&Arc<Descriptor>, Error> {
        self.document_type.get(registry)
    }
}

impl Field for Reference {
    fn serialize(&self, value: &Value, ctx: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        let Some(document) = value::entries(value)? else {
            // Anything that is not a whole document is the key itself.
            return Ok(Outcome::Value(value::to_json(value)?));
        };

        let descriptor = self.document_type(ctx.registry())?;
        let primary_key = descriptor
            .primary_key
            .as_deref()
            .ok_or_else(|| Error::NoPrimaryKey(descriptor.name.clone()))?;

        document
            .get(primary_key)
            .map(value::to_json)
            .transpose()?
            .map(Outcome::Value)
            .ok_or(Error::Invalid("reference"))
    }

    fn deserialize(&self, value: &Json, ctx: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        if value.is_null() {
            return Ok(Outcome::Value(Value::Null));
        }

        let descriptor = self.document_type(ctx.registry())?;

        tracing::trace!(
            document = descriptor.name.as_str(),
            key = %value,
            "Looking up referenced document"
        );

        match ctx.store().get(descriptor, value) {
            Ok(Some(document)) => Ok(Outcome::Value(document)),
            Ok(None) => Err(Error::NotFound {
                key: display_key(value),
                document: descriptor.name.clone(),
            }),
            Err(StoreError::InvalidId(_)) => Err(Error::InvalidKey(display_key(value))),
            Err(StoreError::NoPrimaryKey(name)) => Err(Error::NoPrimaryKey(name)),
            Err(error) => Err(Error::Store(error.to_string())),
        }
    }
}

/// A reference to a stored document of any type.
///
/// Dumps the primary key of the referenced document. Since the type of the document is not known
/// up front, loading always leaves the attribute out.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericReference;

impl GenericReference {
    /// The attribute holding the primary key in a stored generic reference.
    pub const KEY: &'static str = "_ref";
}

impl Field for GenericReference {
    fn serialize(&self, value: &Value, _: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        let Some(reference) = value::entries(value)? else {
            return Ok(Outcome::Value(value::to_json(value)?));
        };

        reference
            .get(Self::KEY)
            .map(value::to_json)
            .transpose()?
            .map(Outcome::Value)
            .ok_or(Error::Invalid("generic reference"))
    }

    fn deserialize(&self, _: &Json, _: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        Ok(Outcome::Omitted)
    }
}
