//! The mapping compiler: turns an XML mapping specification into an
//! immutable [`MappingTree`] for one named output schema.

pub mod compiler;
pub mod error;
pub mod rule;
pub mod tags;

pub use compiler::{MappingCompiler, compile_mapping, compile_mapping_str};
pub use error::{Location, MappingError};
pub use rule::{Filter, MappingRule, MappingTree, RuleValue};
pub use tags::{TagFallback, parse_type_tag};
