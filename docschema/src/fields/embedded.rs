use rbs::Value;
use serde_json::Value as Json;

use super::{Field, Outcome};
use crate::{types, value, Context, Error, TypeRef};

/// An embedded document whose type is only known at runtime.
///
/// The type is read from the `_cls` attribute of every value, and the value is dumped with the
/// schema of that type. Since there is no way to tell which type incoming JSON should become,
/// loading always leaves the attribute out.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericEmbeddedDocument;

impl Field for GenericEmbeddedDocument {
    fn serialize(&self, value: &Value, ctx: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        if matches!(value, Value::Null) {
            return Ok(Outcome::Value(Json::Null));
        }

        let Some(entries) = value::entries(value)? else {
            return Err(Error::Invalid("embedded document"));
        };

        let Some(Value::String(name)) = entries.get(types::GenericEmbedded::TYPE_KEY) else {
            return Err(Error::Invalid("embedded document"));
        };

        let descriptor = ctx.registry().resolve(&TypeRef::named(name.as_str()))?;
        let schema = ctx.schema_for(&descriptor);

        tracing::trace!(document = name.as_str(), "Dumping generic embedded document");

        ctx.descend(|ctx| Ok(Outcome::Value(schema.dump(value, ctx)?)))
    }

    fn deserialize(&self, _: &Json, _: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        Ok(Outcome::Omitted)
    }
}
