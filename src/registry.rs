//! Request-level entry point.
//!
//! `ModelRegistry` wires the store, resolver, archive and mapping components
//! into the operations a registry front end serves:
//!
//! ```text
//! Identifier ──resolve──▶ DependencyClosure ──build──▶ Archive bytes
//!                                                        │
//!                         ClientDocument ◀──merge── read back
//! ```
//!
//! Content is always produced from the archive read-back, so what a client
//! downloads and what is parsed in-process are the same bytes.

use crate::archive::{self, ArchiveBuilder, ArchiveReader, paths};
use crate::base::Identifier;
use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::mapping::{ClientDocument, TargetPlatformBinding, first_mapping, select_mapping};
use crate::model::Model;
use crate::resolve::{DependencyClosure, DependencyResolver};
use crate::store::ModelStore;

/// MIME type of a single raw document download.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A file handed to a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Registry operations over an injected store.
#[derive(Debug)]
pub struct ModelRegistry<S> {
    resolver: DependencyResolver<S>,
    builder: ArchiveBuilder,
    reader: ArchiveReader,
    config: RegistryConfig,
}

impl<S: ModelStore> ModelRegistry<S> {
    /// Create a registry with the default configuration.
    pub fn new(store: S) -> Self {
        Self::build(store, RegistryConfig::default())
    }

    /// Create a registry with an explicit configuration.
    pub fn with_config(store: S, config: RegistryConfig) -> RegistryResult<Self> {
        config.validate()?;
        Ok(Self::build(store, config))
    }

    fn build(store: S, config: RegistryConfig) -> Self {
        Self {
            resolver: DependencyResolver::new(store).with_limits(config.limits.clone()),
            builder: ArchiveBuilder::new(config.archive.clone()),
            reader: ArchiveReader::new(),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        self.resolver.store()
    }

    /// Look up a single model.
    pub fn model(&self, id: &Identifier) -> RegistryResult<Model> {
        self.resolver
            .store()
            .get(id)?
            .ok_or_else(|| RegistryError::ModelNotFound(id.clone()))
    }

    /// The closure of `id`.
    pub fn resolve(&self, id: &Identifier) -> RegistryResult<DependencyClosure> {
        self.resolver.resolve(id)
    }

    /// Archive bytes of the closure of `id`.
    pub fn bundle(&self, id: &Identifier) -> RegistryResult<Vec<u8>> {
        let closure = self.resolver.resolve(id)?;
        self.builder.build_bytes(&closure)
    }

    /// The model file alone, or a ZIP of its whole closure.
    pub fn download(
        &self,
        id: &Identifier,
        include_dependencies: bool,
    ) -> RegistryResult<Download> {
        tracing::debug!(
            "download of {} (dependencies: {})",
            id,
            include_dependencies
        );
        if include_dependencies {
            Ok(Download {
                file_name: format!("{}_{}_{}.zip", id.namespace(), id.name(), id.version()),
                content_type: archive::MIME_TYPE,
                bytes: self.bundle(id)?,
            })
        } else {
            let model = self.model(id)?;
            Ok(Download {
                file_name: paths::file_name(id, model.kind()),
                content_type: OCTET_STREAM,
                bytes: model.content().to_vec(),
            })
        }
    }

    /// Client document of `id` without any platform mapping.
    pub fn content(&self, id: &Identifier) -> RegistryResult<ClientDocument> {
        TargetPlatformBinding::unmapped(self.base_model(id)?).merge()
    }

    /// Client document of `id` adapted to `target_platform`.
    ///
    /// Mapping roots offered by the store are tried in order; within each
    /// root's closure the first mapping declaring the platform wins. Without
    /// a match the unmapped content is returned.
    pub fn content_for_platform(
        &self,
        id: &Identifier,
        target_platform: &str,
    ) -> RegistryResult<ClientDocument> {
        self.binding_for_platform(id, target_platform)?.merge()
    }

    /// The base model and selected mapping for `target_platform`.
    pub fn binding_for_platform(
        &self,
        id: &Identifier,
        target_platform: &str,
    ) -> RegistryResult<TargetPlatformBinding> {
        let base = self.base_model(id)?;

        for candidate in self.resolver.store().mappings_for(id)? {
            let closure = self.round_trip(&candidate)?;
            if let Some(mapping) = select_mapping(&closure, target_platform) {
                tracing::debug!(
                    "{} mapped for '{}' by {}",
                    id,
                    target_platform,
                    mapping.identifier()
                );
                return Ok(TargetPlatformBinding::new(base, Some(mapping.clone())));
            }
        }

        tracing::warn!(
            "no '{}' mapping for {}; returning unmapped content",
            target_platform,
            id
        );
        Ok(TargetPlatformBinding::unmapped(base))
    }

    /// Client document of `id` overlaid with an explicitly named mapping.
    ///
    /// The first mapping document in the closure of `mapping_id` is used,
    /// whatever platform it declares.
    pub fn content_with_mapping(
        &self,
        id: &Identifier,
        mapping_id: &Identifier,
    ) -> RegistryResult<ClientDocument> {
        self.model(id)?;
        self.model(mapping_id)?;

        let closure = self.round_trip(mapping_id)?;
        let mapping = first_mapping(&closure)
            .cloned()
            .ok_or_else(|| RegistryError::NotAMapping(mapping_id.clone()))?;
        let base = self.base_model(id)?;
        TargetPlatformBinding::new(base, Some(mapping)).merge()
    }

    /// Resolve, archive and read back the closure of `id`.
    fn round_trip(&self, id: &Identifier) -> RegistryResult<DependencyClosure> {
        let bytes = self.bundle(id)?;
        self.reader.read_bytes(&bytes)
    }

    /// The root model of `id` as read back from its archive.
    fn base_model(&self, id: &Identifier) -> RegistryResult<Model> {
        let closure = self.round_trip(id)?;
        closure
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::ModelNotFound(id.clone()))
    }
}
