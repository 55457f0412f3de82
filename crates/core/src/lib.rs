//! The transformation engine.
//!
//! Given a [`MappingTree`](xmlmap_mapping::MappingTree) and a document, builds
//! one [`Dict`](xmlmap_types::Dict). Every rule expression is evaluated against
//! the same context node at every nesting level. Problems local to one entry,
//! like an unresolvable key or an invalid expression, are logged and the entry
//! is left out; the rest of the dictionary is still produced.

pub mod context;
pub mod engine;
pub mod error;
pub mod subtree;

pub use context::{XPathContext, text_content};
pub use engine::{passes_filter, resolve_key, transform};
pub use error::TransformError;
pub use subtree::{transform_document, transform_subtree};
