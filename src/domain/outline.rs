//! Indented tree rendering of a linked record collection.

use std::{
    fmt,
    io::{self, Write},
};

use crate::domain::{FlatRecord, record::DATABASE};

/// A read-only, three-tier view of a linked record collection.
///
/// Databases are the records typed `DATABASE`. A database's tables are the
/// records naming it as their parent. A table's columns are the records
/// naming the table's own type and name as their parent, so a table typed
/// something other than `TABLE` still lists its columns.
///
/// Every tier keeps the order of the underlying collection.
#[derive(Debug, Clone, Copy)]
pub struct Outline<'a> {
    records: &'a [FlatRecord],
}

impl<'a> Outline<'a> {
    /// Creates an outline over records whose child counts are already linked.
    #[must_use]
    pub const fn new(records: &'a [FlatRecord]) -> Self {
        Self { records }
    }

    /// The top-level database records.
    pub fn databases(&self) -> impl Iterator<Item = &'a FlatRecord> {
        self.records
            .iter()
            .filter(|record| record.record_type == DATABASE)
    }

    /// The tables belonging to `database`.
    pub fn tables_of(&self, database: &FlatRecord) -> impl Iterator<Item = &'a FlatRecord> {
        self.records
            .iter()
            .filter(move |record| record.is_child_of(database))
    }

    /// The columns belonging to `table`.
    pub fn columns_of(&self, table: &FlatRecord) -> impl Iterator<Item = &'a FlatRecord> {
        self.records
            .iter()
            .filter(move |record| !record.parent_name.is_empty() && record.is_child_of(table))
    }

    /// Renders the outline as individual lines, without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for database in self.databases() {
            lines.push(database_line(database));
            for table in self.tables_of(database) {
                lines.push(table_line(table));
                lines.extend(self.columns_of(table).map(column_line));
            }
        }
        lines
    }

    /// Writes the outline to `writer`, one line per entry.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }
}

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn database_line(database: &FlatRecord) -> String {
    format!(
        "Database '{}' ({} tables)",
        database.name,
        database.child_count()
    )
}

fn table_line(table: &FlatRecord) -> String {
    format!(
        "\tTable '{}.{}' ({} columns)",
        table.schema,
        table.name,
        table.child_count()
    )
}

fn column_line(column: &FlatRecord) -> String {
    let nulls = if column.accepts_nulls() {
        "accepts nulls"
    } else {
        "with no nulls"
    };
    format!(
        "\t\tColumn '{}' with {} data type {nulls}",
        column.name, column.data_type
    )
}
