//! Entry path naming.
//!
//! `{namespace with '.' as '/'}/{name}-{version}.{extension}`, e.g.
//! `com/acme/Thermostat-1.0.0.fbmodel`. Names and versions never contain `-`
//! or `/`, so the scheme is invertible.

use crate::base::{Identifier, ModelKind};
use crate::error::{RegistryError, RegistryResult};

/// Archive path for a model.
pub fn entry_path(id: &Identifier, kind: ModelKind) -> String {
    format!(
        "{}/{}",
        id.namespace().replace('.', "/"),
        file_name(id, kind)
    )
}

/// File name part of [`entry_path`].
pub fn file_name(id: &Identifier, kind: ModelKind) -> String {
    format!("{}-{}.{}", id.name(), id.version(), kind.extension())
}

/// Recover identifier and kind from an entry path.
pub fn parse_entry_path(path: &str) -> RegistryResult<(Identifier, ModelKind)> {
    let corrupt = |reason: &str| RegistryError::archive_corrupt(path, reason);

    let (dir, file) = path
        .rsplit_once('/')
        .ok_or_else(|| corrupt("missing namespace directory"))?;
    let (stem, ext) = file
        .rsplit_once('.')
        .ok_or_else(|| corrupt("missing extension"))?;
    let kind = ModelKind::from_extension(ext)
        .ok_or_else(|| corrupt(&format!("unknown extension '{ext}'")))?;
    let (name, version) = stem
        .split_once('-')
        .ok_or_else(|| corrupt("file name is not <name>-<version>"))?;

    let pretty = format!("{}.{}:{}", dir.replace('/', "."), name, version);
    let id = Identifier::parse_pretty(&pretty)
        .map_err(|_| corrupt(&format!("'{pretty}' is not a valid identifier")))?;

    // Uppercase namespace directories would parse but not map back to this path.
    if entry_path(&id, kind) != path {
        return Err(corrupt("path is not in canonical form"));
    }
    Ok((id, kind))
}
