use rbs::Value;
use serde_json::{Map, Value as Json};
use std::{fmt::Debug, sync::Arc};

use crate::{
    fields::{self, Field, Outcome},
    value::{self, Entries},
    Context, Descriptor, Error, Unknown, ValidationErrors,
};

/// Restricts which fields of a document a schema converts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Only convert these fields.
    pub only: Option<Vec<String>>,
    /// Never convert these fields.
    pub exclude: Vec<String>,
}

impl Options {
    /// Only convert the given fields.
    pub fn only<I: IntoIterator<Item = S>, S: Into<String>>(fields: I) -> Self {
        Self {
            only: Some(fields.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Convert every field but the given ones.
    pub fn exclude<I: IntoIterator<Item = S>, S: Into<String>>(fields: I) -> Self {
        Self {
            exclude: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    fn includes(&self, field: &str) -> bool {
        self.only
            .as_ref()
            .map_or(true, |only| only.iter().any(|name| name == field))
            && !self.exclude.iter().any(|name| name == field)
    }
}

#[derive(Debug)]
struct SchemaField {
    name: String,
    required: bool,
    field: Box<dyn Field>,
}

/// The set of fields that converts one document type between its native value and JSON.
#[derive(Debug)]
pub struct Schema {
    fields: Vec<SchemaField>,
    descriptor: Arc<Descriptor>,
}

impl Schema {
    /// Generate the schema for a document type, with one field per described attribute.
    ///
    /// Fields that can never be loaded (skipped fields, generic references and generic embedded
    /// documents) are never required.
    #[must_use]
    pub fn generate(descriptor: Arc<Descriptor>, options: &Options) -> Self {
        let fields = descriptor
            .fields
            .iter()
            .filter(|spec| options.includes(&spec.name))
            .map(|spec| SchemaField {
                name: spec.name.clone(),
                field: fields::build(&spec.kind),
                required: spec.required && spec.kind.loads(),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            document = descriptor.name.as_str(),
            fields = fields.len(),
            "Generated schema"
        );

        Self { fields, descriptor }
    }

    /// The document type the schema converts.
    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The names of the fields the schema converts, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Get a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&dyn Field> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.field.as_ref())
    }

    /// Dump a native document into JSON.
    ///
    /// Attributes missing from the document, and fields that opt out, are left out of the result.
    ///
    /// # Errors
    ///
    /// Returns the errors of every field that failed to convert.
    pub fn dump(&self, document: &Value, ctx: &mut Context<'_>) -> Result<Json, ValidationErrors> {
        let entries = match value::entries(document) {
            Ok(Some(entries)) => entries,
            Ok(None) => return Err(ValidationErrors::schema(Error::Invalid("document"))),
            Err(error) => return Err(ValidationErrors::schema(error.into())),
        };

        let mut data = Map::new();
        let mut errors = ValidationErrors::new();

        for field in &self.fields {
            let Some(value) = entries.get(&field.name) else {
                continue;
            };

            match field.field.serialize(value, ctx) {
                Ok(Outcome::Value(Json::Null)) if ctx.config().skip_null => {},
                Ok(Outcome::Value(value)) => {
                    data.insert(field.name.clone(), value);
                },
                Ok(Outcome::Omitted) => {},
                Err(error) => errors.insert(&field.name, error),
            }
        }

        if !errors.is_empty() {
            tracing::debug!(
                document = self.descriptor.name.as_str(),
                errors = %errors,
                "Failed to dump document"
            );
        }

        errors.into_result(Json::Object(data))
    }

    /// Load a native document from JSON.
    ///
    /// # Errors
    ///
    /// Returns the errors of every field that failed to convert, was required but missing, or
    /// (depending on [`Config::unknown`](crate::Config)) has no matching field.
    pub fn load(&self, data: &Json, ctx: &mut Context<'_>) -> Result<Value, ValidationErrors> {
        let Json::Object(data) = data else {
            return Err(ValidationErrors::schema(Error::Invalid("mapping")));
        };

        let mut entries = Entries::new();
        let mut errors = ValidationErrors::new();

        for field in &self.fields {
            match data.get(&field.name) {
                None if field.required => errors.insert(&field.name, Error::Required),
                None => {},
                Some(Json::Null) if field.required => errors.insert(&field.name, Error::Null),
                Some(raw) => match field.field.deserialize(raw, ctx) {
                    Ok(Outcome::Value(value)) => {
                        entries.insert(field.name.clone(), value);
                    },
                    Ok(Outcome::Omitted) => {},
                    Err(error) => errors.insert(&field.name, error),
                },
            }
        }

        if ctx.config().unknown == Unknown::Raise {
            for name in data.keys().filter(|name| self.field(name).is_none()) {
                errors.insert(name, Error::Unknown);
            }
        }

        if !errors.is_empty() {
            tracing::debug!(
                document = self.descriptor.name.as_str(),
                errors = %errors,
                "Failed to load document"
            );

            return Err(errors);
        }

        value::from_entries(entries).map_err(|error| ValidationErrors::schema(error.into()))
    }
}
