//! Serialization schemas for document mapper types.
//!
//! `docschema` generates a schema for every mapped document type and knows how to move the
//! mapper's field types (references, generic references, embedded documents and maps) between
//! their native representation and JSON.
//!
//! ```rust
//! # use docschema::{Document, Marshaller, Stored, types::{ObjectId, Reference}, store::MemoryStore};
//! # use serde::{Deserialize, Serialize};
//! # use std::sync::Arc;
//! #[derive(Debug, Serialize, Deserialize, Document)]
//! struct Author {
//!     id: ObjectId,
//!     name: String,
//! }
//!
//! #[derive(Debug, Serialize, Deserialize, Document)]
//! struct Post {
//!     id: ObjectId,
//!     title: String,
//!     author: Reference<Author>,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let author = Author { id: ObjectId::new(), name: "Miguel".to_string() };
//! let store = Arc::new(MemoryStore::new());
//! store.insert(&author)?;
//!
//! let marshaller = Marshaller::builder()
//!     .register::<Author>()
//!     .register::<Post>()
//!     .store(store)
//!     .build();
//!
//! let post = Post { id: ObjectId::new(), title: "Hello".to_string(), author: Reference::from(&author) };
//! let data = marshaller.dump(&post)?;
//! assert_eq!(data["author"], author.id.to_string());
//!
//! let post: Post = marshaller.load(&data)?;
//! assert_eq!(post.author.document().map(|a| a.name.as_str()), Some("Miguel"));
//! # Ok(())
//! # }
//! ```
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

extern crate self as docschema;

#[doc(hidden)]
pub use rbs;
#[doc(hidden)]
pub use serde_json;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::{Debug, Display};

mod config;
mod descriptor;
mod error;
pub mod fields;
mod marshaller;
mod registry;
mod schema;
pub mod store;
pub mod types;
pub mod value;

pub use config::{Config, Unknown};
pub use descriptor::{Descriptor, FieldKind, FieldSpec, FieldType, TypeRef};
pub use docschema_derive::Document;
pub use error::{Error, ValidationErrors};
pub use fields::{Field, Outcome};
pub use marshaller::{Builder, Context, Marshaller};
pub use registry::Registry;
pub use schema::{Options, Schema};

/// A mapped document type.
pub trait Document: Serialize + DeserializeOwned + FieldType + Debug + Send + Sync {
    /// The name the document type is registered under.
    const NAME: &'static str;

    /// Describes the fields of the document.
    fn descriptor() -> Descriptor;
}

/// A document that lives in its own collection and can be referenced by primary key.
pub trait Stored: Document {
    /// The type of the primary key for the document.
    type PrimaryKey: Serialize
        + DeserializeOwned
        + Display
        + Debug
        + Clone
        + PartialEq
        + Send
        + Sync;

    /// The name of the primary key field for the document.
    const PRIMARY_KEY: &'static str;

    /// The name of the collection the document is stored in.
    const COLLECTION: &'static str;

    /// Returns the value of the document's primary key.
    fn primary_key(&self) -> &Self::PrimaryKey;
}
