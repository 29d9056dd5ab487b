use super::{Archive, ArchiveEntry};
use crate::error::{RegistryError, RegistryResult};
use crate::model::Model;
use crate::resolve::DependencyClosure;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Turns ZIP bytes into archives and archives back into models.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveReader;

impl ArchiveReader {
    pub fn new() -> Self {
        Self
    }

    /// Open ZIP bytes. Directory entries are skipped; order is preserved.
    pub fn open(&self, input: &[u8]) -> RegistryResult<Archive> {
        let mut zip = ZipArchive::new(Cursor::new(input))
            .map_err(|e| RegistryError::archive(format!("Failed to open archive: {e}")))?;

        let mut archive = Archive::new();
        for index in 0..zip.len() {
            let mut file = zip.by_index(index).map_err(|e| {
                RegistryError::archive(format!("Failed to read entry {index}: {e}"))
            })?;
            if file.is_dir() {
                continue;
            }
            let path = file.name().to_string();
            let mut content = Vec::new();
            file.read_to_end(&mut content)
                .map_err(|e| RegistryError::archive_corrupt(&path, e.to_string()))?;
            archive.push(ArchiveEntry::new(path, content));
        }
        Ok(archive)
    }

    /// Reconstruct the models of an archive, in entry order.
    ///
    /// Identifier and kind come from each entry path; references and target
    /// platform come from the entry's document, which must agree with its
    /// path. Content is returned byte-for-byte.
    pub fn read(&self, archive: &Archive) -> RegistryResult<Vec<Model>> {
        if archive.is_empty() {
            return Err(RegistryError::EmptyArchive);
        }

        let mut models: Vec<Model> = Vec::with_capacity(archive.len());
        for entry in archive.entries() {
            let (id, kind) = entry.model_key()?;
            let model = Model::from_document(entry.content.clone())
                .map_err(|e| RegistryError::archive_corrupt(&entry.path, e.to_string()))?;
            if model.identifier() != &id || model.kind() != kind {
                return Err(RegistryError::archive_corrupt(
                    &entry.path,
                    format!(
                        "document declares {} {} but path says {} {}",
                        model.kind(),
                        model.identifier(),
                        kind,
                        id
                    ),
                ));
            }
            if models.iter().any(|m| m.identifier() == &id) {
                return Err(RegistryError::archive_corrupt(
                    &entry.path,
                    format!("duplicate entry for {id}"),
                ));
            }
            tracing::trace!("read entry {}", entry.path);
            models.push(model);
        }

        tracing::debug!("read {} model(s) from archive", models.len());
        Ok(models)
    }

    /// Read models back as a closure; the first entry is the root.
    pub fn read_closure(&self, archive: &Archive) -> RegistryResult<DependencyClosure> {
        let models = self.read(archive)?;
        DependencyClosure::from_models(models).ok_or(RegistryError::EmptyArchive)
    }

    /// [`open`](Self::open) followed by [`read_closure`](Self::read_closure).
    pub fn read_bytes(&self, input: &[u8]) -> RegistryResult<DependencyClosure> {
        self.read_closure(&self.open(input)?)
    }
}
