//! Document stores that references are resolved against.

use rbs::Value;
use serde_json::Value as Json;
use std::{
    collections::HashMap,
    fmt::Debug,
    str::FromStr,
    sync::{PoisonError, RwLock},
};

use crate::{
    types::ObjectId,
    value::{self, display_key},
    Descriptor, FieldKind, Stored,
};

/// Somewhere documents can be looked up by primary key.
pub trait Store: Debug + Send + Sync {
    /// Find the document of the described type with the given primary key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidId`] if the key is not a well-formed identifier for this store.
    fn get(&self, descriptor: &Descriptor, key: &Json) -> Result<Option<Value>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid id `{0}`")]
    InvalidId(String),

    #[error("The `{0}` document type does not have a primary key.")]
    NoPrimaryKey(String),

    #[error("Failed to serialize the document.")]
    Serialization(#[from] rbs::Error),

    #[error("Failed to serialize the primary key.")]
    Key(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

/// A store that keeps every document in memory, grouped by collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, replacing any document with the same primary key.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized, or if its primary key is malformed.
    pub fn insert<D: Stored>(&self, document: &D) -> Result<(), StoreError> {
        let descriptor = D::descriptor();
        let key = normalize_key(&descriptor, &serde_json::to_value(document.primary_key())?)?;
        let value = value::to_native(document)?;

        tracing::trace!(
            collection = descriptor.collection.as_str(),
            key = key.as_str(),
            "Inserting document into memory store"
        );

        self.collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(descriptor.collection)
            .or_default()
            .insert(key, value);

        Ok(())
    }

    /// The number of documents in a collection.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .map_or(0, HashMap::len)
    }

    /// Whether a collection holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

impl Store for MemoryStore {
    fn get(&self, descriptor: &Descriptor, key: &Json) -> Result<Option<Value>, StoreError> {
        let key = normalize_key(descriptor, key)?;

        Ok(self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&descriptor.collection)
            .and_then(|documents| documents.get(&key))
            .cloned())
    }
}

/// Check that a key has the shape of the document's primary key, and render it canonically.
fn normalize_key(descriptor: &Descriptor, key: &Json) -> Result<String, StoreError> {
    let invalid = || StoreError::InvalidId(display_key(key));

    match descriptor.key_kind() {
        None => Err(StoreError::NoPrimaryKey(descriptor.name.clone())),
        Some(FieldKind::ObjectId) => key
            .as_str()
            .and_then(|key| ObjectId::from_str(key).ok())
            .map(|id| id.to_string())
            .ok_or_else(invalid),
        Some(FieldKind::Uuid) => key
            .as_str()
            .and_then(|key| uuid::Uuid::parse_str(key).ok())
            .map(|id| id.to_string())
            .ok_or_else(invalid),
        Some(FieldKind::Integer) => match key {
            Json::Number(number) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
            Json::String(number) => number
                .parse::<i64>()
                .map(|number| number.to_string())
                .or_else(|_| number.parse::<u64>().map(|number| number.to_string()))
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        },
        Some(FieldKind::String) => key.as_str().map(str::to_string).ok_or_else(invalid),
        Some(_) => Err(invalid()),
    }
}
