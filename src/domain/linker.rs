//! Hierarchy linking
//!
//! Records are not connected by pointers. A record's children are all records
//! whose (`parent_type`, `parent_name`) pair equals its own (`record_type`,
//! `name`) pair. Linking counts those children once for the whole collection.
//!
//! Counting is done with an index keyed by the parent reference, built in one
//! pass over the records and queried once per record. The result is the same
//! as comparing every pair of records.

use std::collections::{HashMap, HashSet};

use tracing::instrument;

use crate::domain::FlatRecord;

/// Outcome of linking a record collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Number of records that declare a parent.
    pub with_parent: usize,

    /// Positions of records whose parent reference matches no record.
    pub orphans: Vec<usize>,
}

/// Computes the child count of every record in the collection.
///
/// A child's (`parent_type`, `parent_name`) must equal the parent's
/// (`record_type`, `name`) exactly, after normalization. Records with an empty
/// parent type are never counted as anyone's child.
///
/// Duplicate (`record_type`, `name`) pairs are legal: each duplicate receives
/// the full count of matching children.
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn link_children(records: &mut [FlatRecord]) -> LinkReport {
    let mut children: HashMap<(&str, &str), usize> = HashMap::with_capacity(records.len());
    for record in records.iter().filter(|record| !record.is_top_level()) {
        *children
            .entry((record.parent_type.as_str(), record.parent_name.as_str()))
            .or_insert(0) += 1;
    }

    let counts: Vec<usize> = records
        .iter()
        .map(|record| {
            children
                .get(&(record.record_type.as_str(), record.name.as_str()))
                .copied()
                .unwrap_or(0)
        })
        .collect();

    let mut report = LinkReport::default();
    let known: HashSet<(&str, &str)> = records
        .iter()
        .map(|record| (record.record_type.as_str(), record.name.as_str()))
        .collect();
    for (index, record) in records.iter().enumerate() {
        if record.is_top_level() {
            continue;
        }
        report.with_parent += 1;
        if !known.contains(&(record.parent_type.as_str(), record.parent_name.as_str())) {
            tracing::debug!(
                "{record} refers to missing parent {} '{}'",
                record.parent_type,
                record.parent_name
            );
            report.orphans.push(index);
        }
    }

    for (record, count) in records.iter_mut().zip(counts) {
        record.child_count = count;
    }

    report
}
