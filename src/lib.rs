//! # modelrepo-core
//!
//! Core library for a registry of versioned, typed model documents.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! registry  → request-level operations (content, download, mappings)
//!   ↓
//! mapping   → mapping selection and content merge
//!   ↓
//! archive   → byte-stable ZIP archives of closures
//!   ↓
//! resolve   → dependency closure over the store port
//!   ↓
//! store     → ModelStore port, in-memory store
//!   ↓
//! model     → Model, structured documents
//!   ↓
//! base      → Identifier, ModelKind
//! ```

// ============================================================================
// MODULES (dependency order, as in the diagram above)
// ============================================================================

/// Foundation types: Identifier, ModelKind
pub mod base;

/// Error taxonomy shared by every module
pub mod error;

/// Explicit, serializable configuration
pub mod config;

/// Model documents and their structured content
pub mod model;

/// The store port and an in-memory implementation
pub mod store;

/// Dependency closure resolution
pub mod resolve;

/// Closure archives: build, write, open, read
pub mod archive;

/// Target-platform mapping selection and merge
pub mod mapping;

/// Request-level registry operations
pub mod registry;

pub use archive::{Archive, ArchiveBuilder, ArchiveEntry, ArchiveReader};
pub use base::{Identifier, ModelKind, ParseIdentifierError};
pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use mapping::{ClientDocument, TargetPlatformBinding, merge, select_mapping};
pub use model::{Model, ModelDocument};
pub use registry::{Download, ModelRegistry};
pub use resolve::{DependencyClosure, DependencyResolver};
pub use store::{InMemoryStore, ModelStore, StoreError};
