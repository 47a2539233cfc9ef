//! Domain models for schema hierarchies.
//!
//! This module contains the flat record type, the configuration, and the two
//! whole-collection passes that operate on records: linking (child counts)
//! and rendering (the indented outline).

/// Flat records and field normalization.
pub mod record;
pub use record::FlatRecord;

mod config;
pub use config::Config;

/// Child-count computation over a record collection.
pub mod linker;
pub use linker::{LinkReport, link_children};

mod outline;
pub use outline::Outline;
