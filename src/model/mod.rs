//! Model documents as handed out by a store.
//!
//! A [`Model`] pairs an identifier and kind with the document's raw bytes and
//! the identifiers it depends on. Raw content is shared (`Arc<[u8]>`) and
//! never mutated, so models are cheap to clone into closures and archives.
//!
//! ```text
//! Model
//! ├── identifier: Identifier
//! ├── kind: ModelKind
//! ├── content: Arc<[u8]>          (verbatim document bytes)
//! ├── references: Vec<Identifier> (ordered, unique)
//! └── target_platform: Option<String>  (mapping documents only)
//! ```

pub mod document;

pub use document::{Attributes, DocumentElement, MappingRule, ModelDocument};

use crate::base::{Identifier, ModelKind};
use crate::error::RegistryResult;
use std::sync::Arc;

/// A named, typed, immutable model document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    identifier: Identifier,
    kind: ModelKind,
    content: Arc<[u8]>,
    references: Vec<Identifier>,
    target_platform: Option<String>,
}

impl Model {
    /// Build a model by parsing its document.
    ///
    /// Identifier, kind, references and target platform all come from the
    /// document; the bytes are kept exactly as given. This is the only way to
    /// obtain a model, so reading an archived model back from its bytes always
    /// yields the same model. Duplicate references are dropped, keeping the
    /// first occurrence.
    pub fn from_document(content: impl Into<Arc<[u8]>>) -> RegistryResult<Self> {
        let content: Arc<[u8]> = content.into();
        let document = ModelDocument::parse(&content)?;

        let mut references: Vec<Identifier> = Vec::with_capacity(document.references.len());
        for reference in document.references {
            if !references.contains(&reference) {
                references.push(reference);
            }
        }
        Ok(Self {
            identifier: document.id,
            kind: document.kind,
            content,
            references,
            target_platform: document.target_platform,
        })
    }

    /// Serialize a document and wrap it as a model.
    pub fn from_parsed(document: &ModelDocument) -> RegistryResult<Self> {
        Self::from_document(document.to_bytes()?)
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// The raw document bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn references(&self) -> &[Identifier] {
        &self.references
    }

    pub fn target_platform(&self) -> Option<&str> {
        self.target_platform.as_deref()
    }

    /// True if this is a mapping document declaring exactly `key`.
    pub fn targets_platform(&self, key: &str) -> bool {
        self.kind == ModelKind::Mapping && self.target_platform.as_deref() == Some(key)
    }

    /// Parse the raw content into its structured form.
    pub fn document(&self) -> RegistryResult<ModelDocument> {
        ModelDocument::parse(&self.content)
    }
}
