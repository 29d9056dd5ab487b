use crate::base::{Identifier, ModelKind};
use crate::model::Model;

/// The transitive closure of a root model.
///
/// Models are unique and ordered root first, then each dependency in the
/// order it was first discovered. The order is a pure function of the
/// reference graph, which is what makes archives byte-stable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyClosure {
    models: Vec<Model>,
}

impl DependencyClosure {
    pub(crate) fn new(models: Vec<Model>) -> Self {
        debug_assert!(!models.is_empty(), "a closure always contains its root");
        Self { models }
    }

    /// Build a closure from models already in closure order (e.g. read back
    /// from an archive). Returns `None` when `models` is empty.
    pub fn from_models(models: Vec<Model>) -> Option<Self> {
        if models.is_empty() {
            None
        } else {
            Some(Self { models })
        }
    }

    pub fn root(&self) -> &Model {
        &self.models[0]
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Model> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn get(&self, id: &Identifier) -> Option<&Model> {
        self.models.iter().find(|m| m.identifier() == id)
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.get(id).is_some()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.models.iter().map(Model::identifier)
    }

    /// Models of one kind, in closure order.
    pub fn of_kind(&self, kind: ModelKind) -> impl Iterator<Item = &Model> {
        self.models.iter().filter(move |m| m.kind() == kind)
    }

    pub fn into_models(self) -> Vec<Model> {
        self.models
    }
}

impl<'a> IntoIterator for &'a DependencyClosure {
    type Item = &'a Model;
    type IntoIter = std::slice::Iter<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}
