//! In-process store, mainly for tests and embedding.

use super::{ModelStore, StoreError};
use crate::base::{Identifier, ModelKind};
use crate::error::{RegistryError, RegistryResult};
use crate::model::Model;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::path::Path;
use walkdir::WalkDir;

/// A store backed by an insertion-ordered map.
///
/// Published documents are immutable: publishing an identifier twice is an
/// error. Reads take a shared lock, so the store can back concurrent
/// resolutions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    models: RwLock<IndexMap<Identifier, Model>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from models, in order.
    pub fn with_models(models: impl IntoIterator<Item = Model>) -> RegistryResult<Self> {
        let store = Self::new();
        for model in models {
            store.publish(model)?;
        }
        Ok(store)
    }

    /// Publish a model.
    pub fn publish(&self, model: Model) -> RegistryResult<()> {
        let mut models = self.models.write();
        if models.contains_key(model.identifier()) {
            return Err(RegistryError::Store(format!(
                "{} is already published",
                model.identifier()
            )));
        }
        tracing::trace!("publishing {}", model.identifier());
        models.insert(model.identifier().clone(), model);
        Ok(())
    }

    /// Publish every `*.json` document found under `dir`, in path order.
    ///
    /// Returns the number of documents loaded.
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> RegistryResult<usize> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(RegistryError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Directory not found: {}", dir.display()),
            )));
        }

        let mut loaded = 0;
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| RegistryError::Io(e.into()))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("json")
            {
                continue;
            }
            let bytes = std::fs::read(path)?;
            let model = Model::from_document(bytes).map_err(|e| {
                RegistryError::invalid_document(format!("{}: {e}", path.display()))
            })?;
            self.publish(model)?;
            loaded += 1;
        }

        tracing::debug!("Loaded {} model document(s) from {}", loaded, dir.display());
        Ok(loaded)
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.models.read().contains_key(id)
    }
}

impl ModelStore for InMemoryStore {
    fn get(&self, id: &Identifier) -> Result<Option<Model>, StoreError> {
        Ok(self.models.read().get(id).cloned())
    }

    fn mappings_for(&self, id: &Identifier) -> Result<Vec<Identifier>, StoreError> {
        Ok(self
            .models
            .read()
            .values()
            .filter(|m| m.kind() == ModelKind::Mapping && m.references().contains(id))
            .map(|m| m.identifier().clone())
            .collect())
    }
}
