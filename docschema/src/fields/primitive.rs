use rbs::Value;
use serde_json::{Number, Value as Json};

use super::{Field, Outcome};
use crate::{types::ObjectId, value, Context, Error};

/// A string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Str;

impl Field for Str {
    fn serialize(&self, value: &Value, _: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        match value {
            Value::Null => Ok(Outcome::Value(Json::Null)),
            Value::String(value) => Ok(Outcome::Value(Json::String(value.clone()))),
            _ => Err(Error::Invalid("string")),
        }
    }

    fn deserialize(&self, value: &Json, _: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        match value {
            Json::Null => Ok(Outcome::Value(Value::Null)),
            Json::String(value) => Ok(Outcome::Value(Value::String(value.clone()))),
            _ => Err(Error::Invalid("string")),
        }
    }
}

/// A whole number. Numeric strings are accepted when loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integer;

impl Field for Integer {
    fn serialize(&self, value: &Value, _: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        Ok(Outcome::Value(match *value {
            Value::Null => Json::Null,
            Value::I32(number) => Json::from(number),
            Value::I64(number) => Json::from(number),
            Value::U32(number) => Json::from(number),
            Value::U64(number) => Json::from(number),
            _ => return Err(Error::Invalid("integer")),
        }))
    }

    fn deserialize(&self, value: &Json, _: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        let number = match value {
            Json::Null => return Ok(Outcome::Value(Value::Null)),
            Json::Number(number) => number.clone(),
            Json::String(number) => number
                .trim()
                .parse::<i64>()
                .map(Number::from)
                .map_err(|_| Error::Invalid("integer"))?,
            _ => return Err(Error::Invalid("integer")),
        };

        if let Some(number) = number.as_i64() {
            Ok(Outcome::Value(Value::I64(number)))
        } else if let Some(number) = number.as_u64() {
            Ok(Outcome::Value(Value::U64(number)))
        } else {
            Err(Error::Invalid("integer"))
        }
    }
}

/// A floating point number. Whole numbers are accepted in both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

impl Field for Float {
    #[allow(clippy::cast_precision_loss)]
    fn serialize(&self, value: &Value, _: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        let number = match *value {
            Value::Null => return Ok(Outcome::Value(Json::Null)),
            Value::F32(number) => f64::from(number),
            Value::F64(number) => number,
            Value::I32(number) => f64::from(number),
            Value::U32(number) => f64::from(number),
            Value::I64(number) => number as f64,
            Value::U64(number) => number as f64,
            _ => return Err(Error::Invalid("number")),
        };

        Number::from_f64(number)
            .map(|number| Outcome::Value(Json::Number(number)))
            .ok_or(Error::Invalid("number"))
    }

    fn deserialize(&self, value: &Json, _: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        match value {
            Json::Null => Ok(Outcome::Value(Value::Null)),
            Json::Number(number) => number
                .as_f64()
                .map(|number| Outcome::Value(Value::F64(number)))
                .ok_or(Error::Invalid("number")),
            _ => Err(Error::Invalid("number")),
        }
    }
}

/// A boolean.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

impl Field for Boolean {
    fn serialize(&self, value: &Value, _: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        match *value {
            Value::Null => Ok(Outcome::Value(Json::Null)),
            Value::Bool(value) => Ok(Outcome::Value(Json::Bool(value))),
            _ => Err(Error::Invalid("boolean")),
        }
    }

    fn deserialize(&self, value: &Json, _: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        match *value {
            Json::Null => Ok(Outcome::Value(Value::Null)),
            Json::Bool(value) => Ok(Outcome::Value(Value::Bool(value))),
            _ => Err(Error::Invalid("boolean")),
        }
    }
}

/// An [`ObjectId`], written as a hex string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectIdField;

impl Field for ObjectIdField {
    fn serialize(&self, value: &Value, _: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        match value {
            Value::Null => Ok(Outcome::Value(Json::Null)),
            Value::String(id) if id.parse::<ObjectId>().is_ok() => {
                Ok(Outcome::Value(Json::String(id.clone())))
            },
            _ => Err(Error::Invalid("ObjectId")),
        }
    }

    fn deserialize(&self, value: &Json, _: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        match value {
            Json::Null => Ok(Outcome::Value(Value::Null)),
            Json::String(id) => id
                .parse::<ObjectId>()
                .map(|id| Outcome::Value(Value::String(id.to_string())))
                .map_err(|_| Error::Invalid("ObjectId")),
            _ => Err(Error::Invalid("ObjectId")),
        }
    }
}

/// A UUID, written in its hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidField;

impl Field for UuidField {
    fn serialize(&self, value: &Value, _: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        match value {
            Value::Null => Ok(Outcome::Value(Json::Null)),
            Value::String(id) => uuid::Uuid::parse_str(id)
                .map(|id| Outcome::Value(Json::String(id.hyphenated().to_string())))
                .map_err(|_| Error::Invalid("UUID")),
            _ => Err(Error::Invalid("UUID")),
        }
    }

    fn deserialize(&self, value: &Json, _: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        match value {
            Json::Null => Ok(Outcome::Value(Value::Null)),
            Json::String(id) => uuid::Uuid::parse_str(id)
                .map(|id| Outcome::Value(Value::String(id.hyphenated().to_string())))
                .map_err(|_| Error::Invalid("UUID")),
            _ => Err(Error::Invalid("UUID")),
        }
    }
}

/// Arbitrary data, converted as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Raw;

impl Field for Raw {
    fn serialize(&self, value: &Value, _: &mut Context<'_>) -> Result<Outcome<Json>, Error> {
        Ok(Outcome::Value(value::to_json(value)?))
    }

    fn deserialize(&self, value: &Json, _: &mut Context<'_>) -> Result<Outcome<Value>, Error> {
        Ok(Outcome::Value(value::from_json(value)?))
    }
}
