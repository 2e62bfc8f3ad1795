use rbs::Value;
use serde_json::Value as Json;

use super::{Field, Outcome};
use crate::{Context, Error};

/// A field that is never converted, in either direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Skip;

impl Field for Skip {
    fn serialize(&self, _: &Value, _: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        Ok(Outcome::Omitted)
    }

    fn deserialize(&self, _: &Json, _: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        Ok(Outcome::Omitted)
    }
}
