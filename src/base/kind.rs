//! Document kinds and their archive extensions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a model document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// A device description composed of function blocks.
    InformationModel,
    /// A reusable functional capability.
    Functionblock,
    /// Shared entity and enumeration types.
    Datatype,
    /// Binds a base model to a target platform.
    Mapping,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::InformationModel,
        ModelKind::Functionblock,
        ModelKind::Datatype,
        ModelKind::Mapping,
    ];

    /// File extension used for this kind inside archives.
    pub fn extension(self) -> &'static str {
        match self {
            ModelKind::InformationModel => "infomodel",
            ModelKind::Functionblock => "fbmodel",
            ModelKind::Datatype => "type",
            ModelKind::Mapping => "mapping",
        }
    }

    /// Inverse of [`ModelKind::extension`].
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::InformationModel => "InformationModel",
            ModelKind::Functionblock => "Functionblock",
            ModelKind::Datatype => "Datatype",
            ModelKind::Mapping => "Mapping",
        };
        f.write_str(name)
    }
}
