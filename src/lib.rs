//! Schema hierarchy reconstruction
//!
//! Database metadata exported as flat, semicolon-delimited records is rebuilt
//! into its database → table → column hierarchy and rendered as a tree.

pub mod domain;
pub use domain::{Config, FlatRecord, LinkReport, Outline};

/// Reading, parsing and importing delimited record files.
pub mod storage;
pub use storage::{Catalog, ImportError, MalformedLine, import_and_print};
