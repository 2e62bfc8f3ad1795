use std::{collections::HashMap, sync::Arc};

use crate::{Descriptor, Document, Error, TypeRef};

/// Lookup table from document type names to their descriptors.
///
/// The registry is filled once at startup, and then shared by every schema that needs to resolve a
/// document type by name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: HashMap<String, Arc<Descriptor>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document type.
    pub fn register<D: Document>(&mut self) -> &mut Self {
        self.register_descriptor(D::descriptor())
    }

    /// Register a document type from its descriptor. Registering the same name twice replaces the earlier descriptor.
    pub fn register_descriptor(&mut self, descriptor: Descriptor) -> &mut Self {
        tracing::trace!("Registered document type [{}]", descriptor.name);

        if self
            .descriptors
            .insert(descriptor.name.clone(), Arc::new(descriptor))
            .is_some()
        {
            tracing::debug!("Replaced an existing document type registration");
        }

        self
    }

    /// Get the descriptor for a document type.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Descriptor>> {
        self.descriptors.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Resolve a handle into a descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle names a type that has not been registered.
    pub fn resolve(&self, r#type: &TypeRef) -> Result<Arc<Descriptor>, Error> {
        match r#type {
            TypeRef::Resolved(descriptor) => Ok(Arc::clone(descriptor)),
            TypeRef::Named(name) => self
                .get(name)
                .ok_or_else(|| Error::UnknownDocument(name.clone())),
        }
    }
}
