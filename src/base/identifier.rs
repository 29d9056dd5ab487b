//! Model identifiers in the `<namespace>.<Name>:<version>` form.
//!
//! An [`Identifier`] names exactly one immutable model document. The pretty
//! form and the triple are mutually invertible for every identifier whose
//! namespace is already lowercase:
//!
//! ```text
//! com.acme.Thermostat:1.0.0
//! └──┬───┘ └───┬────┘ └─┬─┘
//! namespace   name   version
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Grammar for the pretty form.
///
/// - namespace: one or more dot-separated ASCII word segments
/// - name: a word segment starting with an uppercase letter
/// - version: ASCII word characters and dots (`1.0.0`)
static PRETTY_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<namespace>[A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\.(?P<name>[A-Z][A-Za-z0-9_]*):(?P<version>[A-Za-z0-9_.]+)$",
    )
    .expect("identifier grammar is a valid regex")
});

/// The input did not match the identifier grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed model identifier '{input}': must match <namespace>.<Name>:<version>")]
pub struct ParseIdentifierError {
    input: String,
}

impl ParseIdentifierError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The rejected text.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Structured model identifier.
///
/// Equality and hashing are structural over all three fields. The namespace
/// is lowercased on construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    namespace: SmolStr,
    name: SmolStr,
    version: SmolStr,
}

impl Identifier {
    /// Build an identifier from already-known parts.
    ///
    /// Only the namespace casing is normalized; the name is not checked
    /// against the pretty grammar.
    pub fn new(namespace: &str, name: &str, version: &str) -> Self {
        Self {
            namespace: SmolStr::new(namespace.to_lowercase()),
            name: SmolStr::new(name),
            version: SmolStr::new(version),
        }
    }

    /// Parse the canonical `namespace.Name:version` form.
    ///
    /// The whole input must match; prefixes are rejected.
    pub fn parse_pretty(text: &str) -> Result<Self, ParseIdentifierError> {
        let captures = PRETTY_FORMAT
            .captures(text)
            .ok_or_else(|| ParseIdentifierError::new(text))?;

        let namespace = &captures["namespace"];
        let name = &captures["name"];
        let version = &captures["version"];
        Ok(Self::new(namespace, name, version))
    }

    /// Split a qualified name on its last `.` into namespace and name.
    ///
    /// Skips the uppercase-name rule, so it accepts names produced
    /// programmatically. Fails only when there is no namespace part at all.
    pub fn from_qualified_name_and_version(
        qualified_name: &str,
        version: &str,
    ) -> Result<Self, ParseIdentifierError> {
        match qualified_name.rsplit_once('.') {
            Some((namespace, name)) if !namespace.is_empty() => {
                Ok(Self::new(namespace, name, version))
            }
            _ => Err(ParseIdentifierError::new(format!(
                "{qualified_name}:{version}"
            ))),
        }
    }

    /// Same namespace and name at another version.
    ///
    /// Goes back through [`Identifier::parse_pretty`], so the result obeys
    /// the full grammar.
    pub fn with_version(&self, new_version: &str) -> Result<Self, ParseIdentifierError> {
        Self::parse_pretty(&format!("{}.{}:{}", self.namespace, self.name, new_version))
    }

    /// The canonical pretty form.
    pub fn to_pretty(&self) -> String {
        format!("{}.{}:{}", self.namespace, self.name, self.version)
    }

    /// `namespace.name` without the version.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}:{}", self.namespace, self.name, self.version)
    }
}

impl FromStr for Identifier {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_pretty(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = ParseIdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_pretty(&value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_pretty()
    }
}
