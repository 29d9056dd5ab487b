//! Overlaying mapping attributes onto a base model.

use crate::base::{Identifier, ModelKind};
use crate::error::{RegistryError, RegistryResult};
use crate::model::{Attributes, DocumentElement, Model};
use serde::{Deserialize, Serialize};

/// Client-facing form of a model, optionally overlaid with a mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDocument {
    pub id: Identifier,
    pub kind: ModelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub references: Vec<Identifier>,
    #[serde(default)]
    pub elements: Vec<ClientElement>,
    /// Platform of the applied mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_platform: Option<String>,
    /// Identifier of the applied mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Identifier>,
    /// Platform attributes attached to the model as a whole.
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub mapped_attributes: Attributes,
}

/// One base element with its platform attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub mapped_attributes: Attributes,
}

impl ClientDocument {
    pub fn element(&self, name: &str) -> Option<&ClientElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// True if a mapping was applied.
    pub fn is_mapped(&self) -> bool {
        self.mapping.is_some()
    }

    pub fn to_json(&self) -> RegistryResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RegistryError::invalid_document(e.to_string()))
    }

    #[cfg(feature = "yaml")]
    pub fn to_yaml(&self) -> RegistryResult<String> {
        serde_yaml::to_string(self).map_err(|e| RegistryError::invalid_document(e.to_string()))
    }
}

impl From<DocumentElement> for ClientElement {
    fn from(element: DocumentElement) -> Self {
        Self {
            name: element.name,
            kind: element.kind,
            type_ref: element.type_ref,
            attributes: element.attributes,
            mapped_attributes: Attributes::new(),
        }
    }
}

/// A base model and the mapping chosen for it, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetPlatformBinding {
    pub base: Model,
    pub mapping: Option<Model>,
}

impl TargetPlatformBinding {
    pub fn new(base: Model, mapping: Option<Model>) -> Self {
        Self { base, mapping }
    }

    pub fn unmapped(base: Model) -> Self {
        Self::new(base, None)
    }

    pub fn merge(&self) -> RegistryResult<ClientDocument> {
        merge(&self.base, self.mapping.as_ref())
    }
}

/// Produce the client document for `base`, overlaid with `mapping`.
///
/// Mapping attributes only ever add: base elements and attributes are kept as
/// they are, and when two rules set the same key on the same element the
/// first one stays. A rule naming an element the base does not declare is a
/// [`RegistryError::MergeReference`].
pub fn merge(base: &Model, mapping: Option<&Model>) -> RegistryResult<ClientDocument> {
    let document = base.document()?;
    let mut client = ClientDocument {
        id: document.id,
        kind: document.kind,
        display_name: document.display_name,
        description: document.description,
        references: document.references,
        elements: document.elements.into_iter().map(ClientElement::from).collect(),
        target_platform: None,
        mapping: None,
        mapped_attributes: Attributes::new(),
    };

    let Some(mapping) = mapping else {
        return Ok(client);
    };
    if mapping.kind() != ModelKind::Mapping {
        return Err(RegistryError::NotAMapping(mapping.identifier().clone()));
    }

    let mapping_document = mapping.document()?;
    for rule in mapping_document.rules {
        let slot = match rule.target.as_deref() {
            None => &mut client.mapped_attributes,
            Some(name) => {
                let element = client
                    .elements
                    .iter_mut()
                    .find(|e| e.name == name)
                    .ok_or_else(|| RegistryError::MergeReference {
                        mapping: mapping.identifier().clone(),
                        element: name.to_string(),
                    })?;
                &mut element.mapped_attributes
            }
        };
        overlay(slot, rule.attributes, rule.target.as_deref(), mapping.identifier());
    }

    client.target_platform = mapping_document.target_platform;
    client.mapping = Some(mapping.identifier().clone());
    Ok(client)
}

fn overlay(
    slot: &mut Attributes,
    attributes: Attributes,
    target: Option<&str>,
    mapping: &Identifier,
) {
    for (key, value) in attributes {
        if slot.contains_key(&key) {
            tracing::warn!(
                "{}: ignoring repeated attribute '{}' on {}",
                mapping,
                key,
                target.unwrap_or("<model>")
            );
            continue;
        }
        slot.insert(key, value);
    }
}
