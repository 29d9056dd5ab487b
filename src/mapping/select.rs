use crate::base::ModelKind;
use crate::model::Model;
use crate::resolve::DependencyClosure;

/// First mapping document in closure order that declares `target_platform`.
///
/// Several matches are not an error: the earliest one wins. No match returns
/// `None` and the caller falls back to the unmapped base model.
pub fn select_mapping<'a>(
    closure: &'a DependencyClosure,
    target_platform: &str,
) -> Option<&'a Model> {
    closure.iter().find(|model| model.targets_platform(target_platform))
}

/// First mapping document in closure order, whatever platform it declares.
pub fn first_mapping(closure: &DependencyClosure) -> Option<&Model> {
    closure.of_kind(ModelKind::Mapping).next()
}
