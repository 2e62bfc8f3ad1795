use itertools::Itertools;
use serde_json::{Map, Value as Json};
use std::{
    collections::{btree_map, BTreeMap},
    fmt::{self, Display},
};

/// An error raised while converting a single field.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown `{document}` document with id `{key}`")]
    NotFound { document: String, key: String },

    #[error("invalid id `{0}`")]
    InvalidKey(String),

    #[error("Not a valid {0}.")]
    Invalid(&'static str),

    #[error("Missing data for required field.")]
    Required,

    #[error("Field may not be null.")]
    Null,

    #[error("Unknown field.")]
    Unknown,

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("The `{0}` document type has not been registered.")]
    UnknownDocument(String),

    #[error("`{0}` documents do not have a primary key.")]
    NoPrimaryKey(String),

    #[error("Documents are nested deeper than the limit of {0}.")]
    TooDeep(usize),

    #[error("{0}")]
    Store(String),

    #[error("Failed to convert the native value: {0}")]
    Native(#[from] rbs::Error),

    #[error("Failed to convert the JSON value: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Render the error the way it appears in a [`ValidationErrors`] report.
    #[must_use]
    pub fn to_json(&self) -> Json {
        match self {
            Self::Validation(errors) => errors.to_json(),
            other => Json::Array(vec![Json::String(other.to_string())]),
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Field errors collected while converting a whole document, keyed by field name.
#[derive(Debug, Default)]
pub struct ValidationErrors(BTreeMap<String, Error>);

impl ValidationErrors {
    /// The key used for errors that concern the document as a whole.
    pub const SCHEMA: &'static str = "_schema";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors for the document as a whole.
    #[must_use]
    pub fn schema(error: Error) -> Self {
        let mut errors = Self::new();
        errors.insert(Self::SCHEMA, error);
        errors
    }

    /// Record an error for a field. A later error for the same field replaces the earlier one.
    pub fn insert(&mut self, field: impl Into<String>, error: Error) {
        self.0.insert(field.into(), error);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Error> {
        self.0.get(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The names of the fields that failed, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Return `Ok(value)` if no errors were collected.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Render the errors as a JSON object, with a list of messages per field.
    #[must_use]
    pub fn to_json(&self) -> Json {
        Json::Object(
            self.0
                .iter()
                .map(|(field, error)| (field.clone(), error.to_json()))
                .collect::<Map<_, _>>(),
        )
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|(field, error)| format!("{field}: {error}"))
                .join(", ")
        )
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = (String, Error);
    type IntoIter = btree_map::IntoIter<String, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
