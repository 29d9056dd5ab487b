//! Foundation types for the registry core.
//!
//! - [`Identifier`] - the `namespace.Name:version` triple
//! - [`ModelKind`] - document kinds and their archive extensions
//!
//! This module has NO dependencies on other modelrepo modules.

mod identifier;
mod kind;

pub use identifier::{Identifier, ParseIdentifierError};
pub use kind::ModelKind;
