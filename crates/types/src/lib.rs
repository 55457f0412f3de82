pub mod coerce;
pub mod kind;
pub mod value;

pub use coerce::{coerce_scalar, parse_leading_float, parse_leading_int};
pub use kind::{KeyKind, ScalarKind, ValueKind};
pub use value::{Dict, Value};
