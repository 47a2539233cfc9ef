//! Record parsing
//!
//! Each source line holds one record as seven delimited fields, in the order:
//!
//! ```text
//! type;name;schema;parentName;parentType;dataType;isNullable
//! ```
//!
//! There is no header row and no escaping. Fields past the seventh are
//! ignored. A line with fewer than seven fields is malformed: it is skipped
//! and reported, and never aborts parsing of the lines after it.

use crate::domain::{FlatRecord, record::FIELD_COUNT};

/// A source line that did not have enough fields to form a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: expected {expected} fields, found {found}", expected = FIELD_COUNT)]
pub struct MalformedLine {
    /// One-based line number within the source.
    pub line: usize,

    /// The number of fields found on the line.
    pub found: usize,
}

/// The result of parsing a sequence of lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedRecords {
    /// Records in source order, one per well-formed line.
    pub records: Vec<FlatRecord>,

    /// Lines that were skipped for having too few fields.
    pub malformed: Vec<MalformedLine>,
}

/// Parses a single line into a record.
///
/// `line_number` is only used to label the error.
///
/// # Errors
///
/// Returns [`MalformedLine`] if the line has fewer than seven fields.
pub fn parse_line(
    line_number: usize,
    line: &str,
    delimiter: char,
) -> Result<FlatRecord, MalformedLine> {
    let mut fields = [""; FIELD_COUNT];
    let mut found = 0;
    for (slot, value) in fields.iter_mut().zip(line.split(delimiter)) {
        *slot = value;
        found += 1;
    }

    if found < FIELD_COUNT {
        return Err(MalformedLine {
            line: line_number,
            found,
        });
    }

    Ok(FlatRecord::from_fields(fields))
}

/// Parses every line, keeping well-formed records and recording the rest.
///
/// Lines are numbered from one. Blank lines are ignored without being
/// reported.
pub fn parse_records<'a, I>(lines: I, delimiter: char) -> ParsedRecords
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parsed = ParsedRecords::default();

    for (index, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            tracing::trace!("skipping blank line {}", index + 1);
            continue;
        }

        match parse_line(index + 1, line, delimiter) {
            Ok(record) => parsed.records.push(record),
            Err(e) => {
                tracing::debug!("skipping malformed {e}");
                parsed.malformed.push(e);
            }
        }
    }

    parsed
}
