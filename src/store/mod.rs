//! The model store port.
//!
//! Persistence lives outside this crate. Everything here reaches documents
//! through [`ModelStore`], passed in explicitly at construction time.
//! Implementations must hand out immutable snapshots and must be safe for
//! concurrent reads if callers resolve from several threads at once.

mod memory;

pub use memory::InMemoryStore;

use crate::base::Identifier;
use crate::error::RegistryError;
use crate::model::Model;
use std::sync::Arc;
use thiserror::Error;

/// A failure inside the backing store itself (not a missing model).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        RegistryError::Store(err.0)
    }
}

/// Keyed, read-only access to published model documents.
pub trait ModelStore: Send + Sync {
    /// Fetch a model; `Ok(None)` means the identifier is not published.
    fn get(&self, id: &Identifier) -> Result<Option<Model>, StoreError>;

    /// Mapping roots that target `id`, in a stable order.
    fn mappings_for(&self, _id: &Identifier) -> Result<Vec<Identifier>, StoreError> {
        Ok(Vec::new())
    }
}

impl<S: ModelStore + ?Sized> ModelStore for &S {
    fn get(&self, id: &Identifier) -> Result<Option<Model>, StoreError> {
        (**self).get(id)
    }

    fn mappings_for(&self, id: &Identifier) -> Result<Vec<Identifier>, StoreError> {
        (**self).mappings_for(id)
    }
}

impl<S: ModelStore + ?Sized> ModelStore for Arc<S> {
    fn get(&self, id: &Identifier) -> Result<Option<Model>, StoreError> {
        (**self).get(id)
    }

    fn mappings_for(&self, id: &Identifier) -> Result<Vec<Identifier>, StoreError> {
        (**self).mappings_for(id)
    }
}
