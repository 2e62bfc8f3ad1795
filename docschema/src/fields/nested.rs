use rbs::Value;
use serde_json::Value as Json;
use std::sync::Arc;

use super::{DocumentType, Field, Outcome};
use crate::{Context, Error, TypeRef};

/// A document of a known type, embedded in its parent.
///
/// Converts the embedded document with the schema of its type, one level deeper than its parent.
#[derive(Debug)]
pub struct Nested {
    document_type: DocumentType,
}

impl Nested {
    #[must_use]
    pub fn new(target: TypeRef) -> Self {
        Self {
            document_type: DocumentType::new(target),
        }
    }
}

impl Field for Nested {
    fn serialize(&self, value: &Value, ctx: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        if matches!(value, Value::Null) {
            return Ok(Outcome::Value(Json::Null));
        }

        let descriptor = Arc::clone(self.document_type.get(ctx.registry())?);
        let schema = ctx.schema_for(&descriptor);

        ctx.descend(|ctx| Ok(Outcome::Value(schema.dump(value, ctx)?)))
    }

    fn deserialize(&self, value: &Json, ctx: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        if value.is_null() {
            return Ok(Outcome::Value(Value::Null));
        }

        let descriptor = Arc::clone(self.document_type.get(ctx.registry())?);
        let schema = ctx.schema_for(&descriptor);

        ctx.descend(|ctx| Ok(Outcome::Value(schema.load(value, ctx)?)))
    }
}
