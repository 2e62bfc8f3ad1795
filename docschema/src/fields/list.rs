use rbs::Value;
use serde_json::Value as Json;

use super::{Field, Outcome};
use crate::{Context, Error, ValidationErrors};

/// A list, with every element converted by the inner field.
///
/// Failing elements are reported by their position. Elements the inner field leaves out are dropped.
#[derive(Debug)]
pub struct List {
    inner: Box<dyn Field>,
}

impl List {
    #[must_use]
    pub fn new(inner: Box<dyn Field>) -> Self {
        Self { inner }
    }
}

impl Field for List {
    fn serialize(&self, value: &Value, ctx: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        let elements = match value {
            Value::Null => return Ok(Outcome::Value(Json::Null)),
            Value::Array(elements) => elements,
            _ => return Err(Error::Invalid("list")),
        };

        let mut dumped = Vec::with_capacity(elements.len());
        let mut errors = ValidationErrors::new();

        for (index, element) in elements.iter().enumerate() {
            match self.inner.serialize(element, ctx) {
                Ok(Outcome::Value(element)) => dumped.push(element),
                Ok(Outcome::Omitted) => {},
                Err(error) => errors.insert(index.to_string(), error),
            }
        }

        Ok(Outcome::Value(Json::Array(errors.into_result(dumped)?)))
    }

    fn deserialize(&self, value: &Json, ctx: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        let elements = match value {
            Json::Null => return Ok(Outcome::Value(Value::Null)),
            Json::Array(elements) => elements,
            _ => return Err(Error::Invalid("list")),
        };

        let mut loaded = Vec::with_capacity(elements.len());
        let mut errors = ValidationErrors::new();

        for (index, element) in elements.iter().enumerate() {
            match self.inner.deserialize(element, ctx) {
                Ok(Outcome::Value(element)) => loaded.push(element),
                Ok(Outcome::Omitted) => {},
                Err(error) => errors.insert(index.to_string(), error),
            }
        }

        Ok(Outcome::Value(Value::Array(errors.into_result(loaded)?)))
    }
}
