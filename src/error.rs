//! Error types for registry operations.

use crate::base::{Identifier, ParseIdentifierError};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while resolving, archiving or merging models.
///
/// Every variant is a deterministic function of its inputs; nothing here is
/// retried internally.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Input text violates the identifier grammar.
    #[error(transparent)]
    MalformedIdentifier(#[from] ParseIdentifierError),

    /// The requested model is absent from the store.
    #[error("Model not found: {0}")]
    ModelNotFound(Identifier),

    /// A document references a model the store does not have.
    #[error("Dangling reference: {parent} references missing model {missing}")]
    DanglingReference {
        parent: Identifier,
        missing: Identifier,
    },

    /// The reference graph loops back onto a model still being expanded.
    #[error("Cyclic dependency: {}", format_chain(.chain))]
    CyclicDependency { chain: Vec<Identifier> },

    /// The closure grew past a configured limit.
    #[error("Closure of {root} exceeds the configured {limit}")]
    ClosureLimit { root: Identifier, limit: String },

    /// An archive entry could not be turned back into a model.
    #[error("Corrupt archive entry '{path}': {reason}")]
    ArchiveCorrupt { path: String, reason: String },

    /// The archive holds no model entries.
    #[error("Archive contains no model entries")]
    EmptyArchive,

    /// The archive container could not be written or opened.
    #[error("Archive error: {0}")]
    Archive(String),

    /// A document's content could not be parsed.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A mapping rule points at an element the base model does not declare.
    #[error("Mapping {mapping} references unknown element '{element}'")]
    MergeReference { mapping: Identifier, element: String },

    /// The closure of an explicit mapping root contains no mapping document.
    #[error("No mapping document in the closure of {0}")]
    NotAMapping(Identifier),

    /// The backing store failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while loading documents.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    /// Create a corrupt-entry error.
    pub fn archive_corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ArchiveCorrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an archive container error.
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive(message.into())
    }

    /// Create an invalid document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The identifier this error is about, if any.
    pub fn identifier(&self) -> Option<&Identifier> {
        match self {
            Self::ModelNotFound(id) | Self::NotAMapping(id) => Some(id),
            Self::DanglingReference { missing, .. } => Some(missing),
            Self::CyclicDependency { chain } => chain.last(),
            Self::ClosureLimit { root, .. } => Some(root),
            Self::MergeReference { mapping, .. } => Some(mapping),
            _ => None,
        }
    }
}

fn format_chain(chain: &[Identifier]) -> String {
    chain
        .iter()
        .map(Identifier::to_pretty)
        .collect::<Vec<_>>()
        .join(" -> ")
}
