//! Dependency resolution.
//!
//! [`DependencyResolver`] walks the reference graph of a root model through
//! a [`ModelStore`] and returns its [`DependencyClosure`].
//!
//! The walk is an iterative depth-first traversal. Every identifier is in one
//! of two states while the walk runs:
//!
//! ```text
//! (unseen) ──fetch──▶ InProgress ──all references done──▶ Done
//!                         ▲
//!                         └── reached again while InProgress ⇒ cycle
//! ```
//!
//! Reaching a `Done` identifier again is a diamond and is skipped. Reaching an
//! `InProgress` identifier is a cycle and fails the whole resolution. Models
//! are appended on first discovery, so the closure is root first and
//! otherwise in discovery order.

mod closure;

pub use closure::DependencyClosure;

use crate::base::Identifier;
use crate::config::LimitsConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::model::Model;
use crate::store::ModelStore;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// One model on the traversal path and the next reference to follow.
#[derive(Clone, Copy, Debug)]
struct Frame {
    index: usize,
    next: usize,
}

/// Computes transitive closures over a store.
#[derive(Debug, Clone)]
pub struct DependencyResolver<S> {
    store: S,
    limits: LimitsConfig,
}

impl<S: ModelStore> DependencyResolver<S> {
    /// Create a resolver with default limits.
    pub fn new(store: S) -> Self {
        Self {
            store,
            limits: LimitsConfig::default(),
        }
    }

    /// Replace the resolution limits.
    pub fn with_limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = limits;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the closure of `root`.
    ///
    /// Fails without a partial result if the root is missing, a reference
    /// dangles, the graph has a cycle, or a limit is exceeded.
    pub fn resolve(&self, root: &Identifier) -> RegistryResult<DependencyClosure> {
        tracing::debug!("resolving closure of {}", root);

        let root_model = self
            .fetch(root)?
            .ok_or_else(|| RegistryError::ModelNotFound(root.clone()))?;

        let mut state: FxHashMap<Identifier, VisitState> = FxHashMap::default();
        let mut ordered: Vec<Model> = vec![root_model];
        let mut stack: Vec<Frame> = vec![Frame { index: 0, next: 0 }];
        state.insert(root.clone(), VisitState::InProgress);

        while let Some(&Frame { index, next }) = stack.last() {
            let reference = match ordered[index].references().get(next) {
                Some(reference) => reference.clone(),
                None => {
                    state.insert(ordered[index].identifier().clone(), VisitState::Done);
                    stack.pop();
                    continue;
                }
            };
            if let Some(top) = stack.last_mut() {
                top.next += 1;
            }

            match state.get(&reference) {
                Some(VisitState::Done) => {
                    tracing::trace!("{} already in closure", reference);
                    continue;
                }
                Some(VisitState::InProgress) => {
                    return Err(RegistryError::CyclicDependency {
                        chain: cycle_chain(&stack, &ordered, &reference),
                    });
                }
                None => {}
            }

            let parent = ordered[index].identifier();
            let child = self.fetch(&reference)?.ok_or_else(|| {
                RegistryError::DanglingReference {
                    parent: parent.clone(),
                    missing: reference.clone(),
                }
            })?;

            if stack.len() > self.limits.max_depth {
                return Err(RegistryError::ClosureLimit {
                    root: root.clone(),
                    limit: format!("depth of {}", self.limits.max_depth),
                });
            }
            if ordered.len() >= self.limits.max_closure_size {
                return Err(RegistryError::ClosureLimit {
                    root: root.clone(),
                    limit: format!("size of {} models", self.limits.max_closure_size),
                });
            }

            tracing::trace!("{} -> {}", parent, reference);
            state.insert(reference, VisitState::InProgress);
            ordered.push(child);
            stack.push(Frame {
                index: ordered.len() - 1,
                next: 0,
            });
        }

        tracing::debug!("closure of {} has {} model(s)", root, ordered.len());
        Ok(DependencyClosure::new(ordered))
    }

    fn fetch(&self, id: &Identifier) -> RegistryResult<Option<Model>> {
        let model = self.store.get(id)?;
        match model {
            Some(model) if model.identifier() != id => Err(RegistryError::Store(format!(
                "store returned {} for {}",
                model.identifier(),
                id
            ))),
            other => Ok(other),
        }
    }
}

/// The path from the first occurrence of `reference` on the stack back to it.
fn cycle_chain(stack: &[Frame], ordered: &[Model], reference: &Identifier) -> Vec<Identifier> {
    let path: Vec<&Identifier> = stack
        .iter()
        .map(|frame| ordered[frame.index].identifier())
        .collect();
    let start = path.iter().position(|id| *id == reference).unwrap_or(0);
    path[start..]
        .iter()
        .map(|id| (*id).clone())
        .chain(std::iter::once(reference.clone()))
        .collect()
}
