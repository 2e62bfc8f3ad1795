//! Value types for the mapper's field kinds.

mod embedded;
mod object_id;
mod reference;

pub use embedded::GenericEmbedded;
pub use object_id::ObjectId;
pub use reference::{GenericReference, Reference};
