//! Closure archives.
//!
//! An [`Archive`] is an ordered list of named byte entries, one per model of a
//! [`DependencyClosure`]. On the wire it is a ZIP container:
//!
//! ```text
//! com_acme_Thermostat_1.0.0.zip
//! ├── com/acme/Thermostat-1.0.0.fbmodel       # root first
//! └── com/acme/types/Temperature-1.0.0.type   # then discovery order
//! ```
//!
//! Entries carry a fixed timestamp and permissions, so building the same
//! closure twice yields byte-identical archives. Reading an archive back
//! reproduces every model's identifier, kind and raw content exactly.

mod builder;
pub mod paths;
mod reader;

pub use builder::ArchiveBuilder;
pub use reader::ArchiveReader;

use crate::base::{Identifier, ModelKind};
use crate::error::RegistryResult;

/// MIME type of serialized archives.
pub const MIME_TYPE: &str = "application/zip";

/// One named entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub content: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Identifier and kind encoded in the path.
    pub fn model_key(&self) -> RegistryResult<(Identifier, ModelKind)> {
        paths::parse_entry_path(&self.path)
    }
}

/// An ordered sequence of entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Archive {
    entries: Vec<ArchiveEntry>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ArchiveEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn get(&self, path: &str) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry paths in archive order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }
}

impl FromIterator<ArchiveEntry> for Archive {
    fn from_iter<T: IntoIterator<Item = ArchiveEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Quick check for the ZIP local-file-header magic.
pub fn looks_like_archive(input: &[u8]) -> bool {
    input.len() >= 4 && &input[0..4] == b"PK\x03\x04"
}
