//! Structured content of a model document.
//!
//! Raw model content is a UTF-8 JSON document:
//!
//! ```json
//! {
//!   "id": "com.acme.Thermostat:1.0.0",
//!   "kind": "Functionblock",
//!   "displayName": "Thermostat",
//!   "references": ["com.acme.types.Temperature:1.0.0"],
//!   "elements": [
//!     { "name": "temperature", "kind": "status", "type": "com.acme.types.Temperature:1.0.0" }
//!   ]
//! }
//! ```
//!
//! Mapping documents additionally declare a `targetPlatform` and a list of
//! `rules`, each attaching platform attributes to one base element (or to the
//! model itself when `target` is absent).

use crate::base::{Identifier, ModelKind};
use crate::error::{RegistryError, RegistryResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form attribute map; insertion order is preserved.
pub type Attributes = IndexMap<String, Value>;

/// Parsed form of a model document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDocument {
    pub id: Identifier,
    pub kind: ModelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<DocumentElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_platform: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<MappingRule>,
}

/// A structural element of a base model (property, operation, literal...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: Attributes,
}

/// One platform binding inside a mapping document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MappingRule {
    /// Name of the base element; `None` addresses the model itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl ModelDocument {
    /// Create an empty document of the given kind.
    pub fn new(id: Identifier, kind: ModelKind) -> Self {
        Self {
            id,
            kind,
            display_name: None,
            description: None,
            references: Vec::new(),
            elements: Vec::new(),
            target_platform: None,
            rules: Vec::new(),
        }
    }

    /// Parse raw document bytes.
    pub fn parse(content: &[u8]) -> RegistryResult<Self> {
        let document: Self = serde_json::from_slice(content)
            .map_err(|e| RegistryError::invalid_document(e.to_string()))?;
        document.check()?;
        Ok(document)
    }

    /// Serialize to the canonical pretty JSON form.
    pub fn to_bytes(&self) -> RegistryResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| RegistryError::invalid_document(e.to_string()))
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_reference(mut self, id: Identifier) -> Self {
        self.references.push(id);
        self
    }

    pub fn with_element(mut self, element: DocumentElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_target_platform(mut self, key: impl Into<String>) -> Self {
        self.target_platform = Some(key.into());
        self
    }

    pub fn with_rule(mut self, rule: MappingRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Find a base element by name.
    pub fn element(&self, name: &str) -> Option<&DocumentElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    fn check(&self) -> RegistryResult<()> {
        if self.kind != ModelKind::Mapping {
            if self.target_platform.is_some() {
                return Err(RegistryError::invalid_document(format!(
                    "{}: only mapping documents declare a target platform",
                    self.id
                )));
            }
            if !self.rules.is_empty() {
                return Err(RegistryError::invalid_document(format!(
                    "{}: only mapping documents declare rules",
                    self.id
                )));
            }
        }
        if self.references.contains(&self.id) {
            return Err(RegistryError::invalid_document(format!(
                "{}: a document cannot reference itself",
                self.id
            )));
        }
        Ok(())
    }
}

impl DocumentElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            type_ref: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_type(mut self, type_ref: impl Into<String>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl MappingRule {
    /// A rule for the named base element.
    pub fn element(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            attributes: Attributes::new(),
        }
    }

    /// A rule for the model as a whole.
    pub fn model() -> Self {
        Self {
            target: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
