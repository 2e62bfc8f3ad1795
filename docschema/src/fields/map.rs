use rbs::Value;
use serde_json::{Map as JsonMap, Value as Json};

use super::{Field, Outcome};
use crate::{
    value::{self, Entries},
    Context, Error, ValidationErrors,
};

/// A mapping from string keys to values, each converted by the inner field.
///
/// Every entry is converted before giving up, so a failing map reports all of its bad keys at once.
/// Entries the inner field leaves out are dropped.
#[derive(Debug)]
pub struct Map {
    inner: Box<dyn Field>,
}

impl Map {
    #[must_use]
    pub fn new(inner: Box<dyn Field>) -> Self {
        Self { inner }
    }
}

impl Field for Map {
    fn serialize(&self, value: &Value, ctx: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        if matches!(value, Value::Null) {
            return Ok(Outcome::Value(Json::Null));
        }

        let Some(entries) = value::entries(value)? else {
            return Err(Error::Invalid("mapping"));
        };

        let mut dumped = JsonMap::new();
        let mut errors = ValidationErrors::new();

        for (key, entry) in &entries {
            match self.inner.serialize(entry, ctx) {
                Ok(Outcome::Value(entry)) => {
                    dumped.insert(key.clone(), entry);
                },
                Ok(Outcome::Omitted) => {},
                Err(error) => errors.insert(key, error),
            }
        }

        if !errors.is_empty() {
            tracing::debug!(errors = %errors, "Failed to dump map entries");
        }

        Ok(Outcome::Value(Json::Object(errors.into_result(dumped)?)))
    }

    fn deserialize(&self, value: &Json, ctx: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        let entries = match value {
            Json::Null => return Ok(Outcome::Value(Value::Null)),
            Json::Object(entries) => entries,
            _ => return Err(Error::Invalid("mapping")),
        };

        let mut loaded = Entries::new();
        let mut errors = ValidationErrors::new();

        for (key, entry) in entries {
            match self.inner.deserialize(entry, ctx) {
                Ok(Outcome::Value(entry)) => {
                    loaded.insert(key.clone(), entry);
                },
                Ok(Outcome::Omitted) => {},
                Err(error) => errors.insert(key, error),
            }
        }

        if !errors.is_empty() {
            tracing::debug!(errors = %errors, "Failed to load map entries");
        }

        Ok(Outcome::Value(value::from_entries(errors.into_result(loaded)?)?))
    }
}
