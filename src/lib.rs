//! # xmlmap
//!
//! Transforms XML documents into structured values under the control of a
//! declarative XML mapping specification.
//!
//! ```no_run
//! use xmlmap::ConverterBuilder;
//!
//! let converter = ConverterBuilder::new()
//!     .with_mapping_file("fieldmap.xml")?
//!     .with_schema("bios")
//!     .build()?;
//! let dict = converter.convert_file("dmidecode.xml")?;
//! println!("{}", xmlmap::to_json(&dict, true)?);
//! # Ok::<(), xmlmap::Error>(())
//! ```

mod builder;
mod converter;
mod error;

pub use builder::ConverterBuilder;
pub use converter::{Converter, to_json};
pub use error::Error;

pub use xmlmap_core as engine;
pub use xmlmap_mapping as mapping;
pub use xmlmap_types::{Dict, Value};
pub use xmlmap_xpath1 as xpath;
