use serde_json::Value as Json;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    store::{MemoryStore, Store},
    value, Config, Descriptor, Document, Error, Options, Registry, Schema, TypeRef,
    ValidationErrors,
};

/// Dumps and loads documents, using the schema generated for their type.
///
/// A marshaller bundles the [`Registry`] of known document types, the [`Store`] that references
/// are looked up in, and the [`Config`] shared by every schema.
#[derive(Debug)]
pub struct Marshaller {
    config: Config,
    registry: Registry,
    store: Arc<dyn Store>,
    schemas: RwLock<HashMap<String, Arc<Schema>>>,
}

impl Marshaller {
    /// Start building a marshaller.
    #[must_use]
    pub fn builder() -> Builder {
        Builder::default()
    }

    #[must_use]
    pub fn new(registry: Registry, store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config,
            registry,
            schemas: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// A fresh conversion context, at the top level.
    #[must_use]
    pub const fn context(&self) -> Context<'_> {
        Context {
            depth: 0,
            marshaller: self,
        }
    }

    /// The schema for a registered document type. Schemas are generated once, then reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the document type has not been registered.
    pub fn schema(&self, name: &str) -> Result<Arc<Schema>, Error> {
        let descriptor = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownDocument(name.to_string()))?;

        Ok(self.schema_for(&descriptor))
    }

    /// Generate a one-off schema for a registered document type, restricted by the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the document type has not been registered.
    pub fn schema_with(&self, name: &str, options: &Options) -> Result<Schema, Error> {
        let descriptor = self.registry.resolve(&TypeRef::named(name))?;

        Ok(Schema::generate(descriptor, options))
    }

    fn schema_for(&self, descriptor: &Arc<Descriptor>) -> Arc<Schema> {
        let registered = self
            .registry
            .get(&descriptor.name)
            .is_some_and(|registered| Arc::ptr_eq(&registered, descriptor));

        if !registered {
            return Arc::new(Schema::generate(Arc::clone(descriptor), &Options::default()));
        }

        if let Some(schema) = self
            .schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&descriptor.name)
        {
            return Arc::clone(schema);
        }

        let schema = Arc::new(Schema::generate(Arc::clone(descriptor), &Options::default()));

        Arc::clone(
            self.schemas
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(descriptor.name.clone())
                .or_insert(schema),
        )
    }

    /// Dump a document into JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document type has not been registered, or if any field fails to convert.
    pub fn dump<D: Document>(&self, document: &D) -> Result<Json, Error> {
        self.dump_value(D::NAME, &value::to_native(document)?)
    }

    /// Dump several documents of the same type. Failures are reported by position.
    ///
    /// # Errors
    ///
    /// Returns an error if the document type has not been registered, or if any document fails to convert.
    pub fn dump_many<D: Document>(&self, documents: &[D]) -> Result<Vec<Json>, Error> {
        let schema = self.schema(D::NAME)?;
        let mut dumped = Vec::with_capacity(documents.len());
        let mut errors = ValidationErrors::new();

        for (index, document) in documents.iter().enumerate() {
            let native = match value::to_native(document) {
                Ok(native) => native,
                Err(error) => {
                    errors.insert(index.to_string(), error.into());
                    continue;
                },
            };

            match schema.dump(&native, &mut self.context()) {
                Ok(data) => dumped.push(data),
                Err(failed) => errors.insert(index.to_string(), Error::Validation(failed)),
            }
        }

        Ok(errors.into_result(dumped)?)
    }

    /// Dump the native value of a registered document type into JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document type has not been registered, or if any field fails to convert.
    pub fn dump_value(&self, name: &str, document: &rbs::Value) -> Result<Json, Error> {
        let schema = self.schema(name)?;

        Ok(schema.dump(document, &mut self.context())?)
    }

    /// Load a document from JSON, resolving references through the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the document type has not been registered, if any field fails to convert, or if the
    /// loaded attributes do not fit the document type.
    pub fn load<D: Document>(&self, data: &Json) -> Result<D, Error> {
        Ok(value::from_native(self.load_value(D::NAME, data)?)?)
    }

    /// Load the native value of a registered document type from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document type has not been registered, or if any field fails to convert.
    pub fn load_value(&self, name: &str, data: &Json) -> Result<rbs::Value, Error> {
        let schema = self.schema(name)?;

        Ok(schema.load(data, &mut self.context())?)
    }
}

/// Builds a [`Marshaller`].
#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
    registry: Registry,
    store: Option<Arc<dyn Store>>,
}

impl Builder {
    /// Register a document type.
    #[must_use]
    pub fn register<D: Document>(mut self) -> Self {
        self.registry.register::<D>();
        self
    }

    /// Register a document type from its descriptor.
    #[must_use]
    pub fn register_descriptor(mut self, descriptor: Descriptor) -> Self {
        self.registry.register_descriptor(descriptor);
        self
    }

    /// Use an existing registry. Replaces any type registered so far.
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// The store references are looked up in. Defaults to an empty [`MemoryStore`].
    #[must_use]
    pub fn store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn build(self) -> Marshaller {
        Marshaller::new(
            self.registry,
            self.store
                .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn Store>),
            self.config,
        )
    }
}

/// State carried through a single dump or load.
#[derive(Debug)]
pub struct Context<'a> {
    depth: usize,
    marshaller: &'a Marshaller,
}

impl<'a> Context<'a> {
    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        &self.marshaller.registry
    }

    #[must_use]
    pub fn store(&self) -> &'a dyn Store {
        self.marshaller.store.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &'a Config {
        &self.marshaller.config
    }

    /// How many embedded documents deep the conversion currently is.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The schema for a document type.
    #[must_use]
    pub fn schema_for(&self, descriptor: &Arc<Descriptor>) -> Arc<Schema> {
        self.marshaller.schema_for(descriptor)
    }

    /// Run `f` one level deeper.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooDeep`] if the configured depth has already been reached, or whatever `f` returns.
    pub fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        let limit = self.config().max_depth;

        if self.depth >= limit {
            tracing::debug!(limit, "Refusing to nest documents any deeper");
            return Err(Error::TooDeep(limit));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        result
    }
}
