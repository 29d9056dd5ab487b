use super::{Archive, ArchiveEntry, paths};
use crate::config::{ArchiveConfig, Compression};
use crate::error::{RegistryError, RegistryResult};
use crate::resolve::DependencyClosure;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Turns closures into archives and archives into ZIP bytes.
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    config: ArchiveConfig,
}

impl ArchiveBuilder {
    pub fn new(config: ArchiveConfig) -> Self {
        Self { config }
    }

    /// One entry per model, in closure order.
    pub fn build(&self, closure: &DependencyClosure) -> Archive {
        let archive: Archive = closure
            .iter()
            .map(|model| {
                ArchiveEntry::new(
                    paths::entry_path(model.identifier(), model.kind()),
                    model.content(),
                )
            })
            .collect();
        tracing::debug!(
            "built archive for {} with {} entries",
            closure.root().identifier(),
            archive.len()
        );
        archive
    }

    /// Serialize an archive to ZIP bytes.
    pub fn write(&self, archive: &Archive) -> RegistryResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = self.file_options();
        tracing::debug!(
            "writing {} entries ({})",
            archive.len(),
            self.config.compression.as_str()
        );

        for entry in archive.entries() {
            tracing::trace!("writing entry {}", entry.path);
            zip.start_file(entry.path.as_str(), options).map_err(|e| {
                RegistryError::archive(format!("Failed to create {}: {e}", entry.path))
            })?;
            zip.write_all(&entry.content).map_err(|e| {
                RegistryError::archive(format!("Failed to write {}: {e}", entry.path))
            })?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| RegistryError::archive(format!("Failed to finalize archive: {e}")))?;
        Ok(cursor.into_inner())
    }

    /// [`build`](Self::build) followed by [`write`](Self::write).
    pub fn build_bytes(&self, closure: &DependencyClosure) -> RegistryResult<Vec<u8>> {
        self.write(&self.build(closure))
    }

    fn file_options(&self) -> SimpleFileOptions {
        let method = match self.config.compression {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        };
        SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644)
    }
}
