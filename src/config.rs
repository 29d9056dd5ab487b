//! Configuration for the registry core.
//!
//! Configuration is explicit and serializable. The core never reads
//! environment variables; callers load a [`RegistryConfig`] from JSON or YAML
//! (or use the defaults) and hand it to [`ModelRegistry`](crate::ModelRegistry).

use crate::error::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub archive: ArchiveConfig,
    pub limits: LimitsConfig,
}

impl RegistryConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(input: &str) -> RegistryResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| RegistryError::config(format!("invalid JSON configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML configuration document.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(input: &str) -> RegistryResult<Self> {
        let config: Self = serde_yaml::from_str(input)
            .map_err(|e| RegistryError::config(format!("invalid YAML configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could never resolve anything.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.limits.max_closure_size == 0 {
            return Err(RegistryError::config(
                "max_closure_size must be greater than zero",
            ));
        }
        if self.limits.max_depth == 0 {
            return Err(RegistryError::config("max_depth must be greater than zero"));
        }
        Ok(())
    }
}

/// Archive output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    pub compression: Compression,
}

/// Compression applied to archive entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Stored,
    #[default]
    Deflated,
}

impl Compression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Deflated => "deflated",
        }
    }
}

/// Resolution limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum number of models in one closure.
    pub max_closure_size: usize,
    /// Maximum reference chain length from the root.
    pub max_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_closure_size: 10_000,
            max_depth: 256,
        }
    }
}
