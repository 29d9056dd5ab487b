//! Target-platform mapping: choosing a mapping document and overlaying it.
//!
//! ```text
//! closure of mapping root ──select_mapping(key)──▶ Option<Model>
//!                                                      │
//! base model ───────────────────────────────────▶ merge ──▶ ClientDocument
//! ```

mod merge;
mod select;

pub use merge::{ClientDocument, ClientElement, TargetPlatformBinding, merge};
pub use select::{first_mapping, select_mapping};
