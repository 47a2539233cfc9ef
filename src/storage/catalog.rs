//! The import pipeline
//!
//! A [`Catalog`] is built from a schema export in fixed stages: the source is
//! read fully into memory, split into records, normalized, and linked. Once
//! built it is read-only and can be rendered as an [`Outline`].

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::{
    domain::{Config, FlatRecord, LinkReport, Outline, link_children},
    storage::{
        parser::{MalformedLine, ParsedRecords, parse_records},
        read_source,
    },
};

/// A linked collection of records imported from a schema export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<FlatRecord>,
    malformed: Vec<MalformedLine>,
    links: LinkReport,
}

impl Catalog {
    /// Imports the schema export at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::FileAccess`] if the file cannot be read, and
    /// [`ImportError::MalformedLines`] if it contains malformed lines while
    /// `allow_malformed` is disabled.
    #[instrument(skip(config))]
    pub fn load(path: &Path, config: &Config) -> Result<Self, ImportError> {
        let source = read_source(path).map_err(|source| ImportError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(&source, config)
    }

    /// Imports a schema export that is already in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::MalformedLines`] if the source contains
    /// malformed lines while `allow_malformed` is disabled.
    #[instrument(level = "debug", skip_all)]
    pub fn from_source(source: &str, config: &Config) -> Result<Self, ImportError> {
        let ParsedRecords {
            mut records,
            malformed,
        } = parse_records(source.lines(), config.delimiter());

        if !malformed.is_empty() {
            if !config.allow_malformed {
                return Err(ImportError::MalformedLines(malformed));
            }
            tracing::info!("Skipped {} malformed lines", malformed.len());
        }

        records.iter_mut().for_each(FlatRecord::normalize);
        let links = link_children(&mut records);

        tracing::info!(
            "Imported {} records ({} with a parent, {} orphaned)",
            records.len(),
            links.with_parent,
            links.orphans.len()
        );

        Ok(Self {
            records,
            malformed,
            links,
        })
    }

    /// The imported records, in source order.
    #[must_use]
    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    /// The lines that were skipped for having too few fields.
    #[must_use]
    pub fn malformed(&self) -> &[MalformedLine] {
        &self.malformed
    }

    /// Records whose parent reference matches no imported record.
    pub fn orphans(&self) -> impl Iterator<Item = &FlatRecord> {
        self.links
            .orphans
            .iter()
            .filter_map(|&index| self.records.get(index))
    }

    /// The three-tier outline of the imported records.
    #[must_use]
    pub fn outline(&self) -> Outline<'_> {
        Outline::new(&self.records)
    }
}

/// Imports the schema export at `path` and, if `print` is set, writes its
/// outline to `writer`.
///
/// Importing and linking happen regardless of `print`. The catalog is
/// returned so the caller can inspect what was skipped.
///
/// # Errors
///
/// Returns an error if the import fails (see [`Catalog::load`]) or if the
/// outline cannot be written.
pub fn import_and_print<W: io::Write>(
    path: &Path,
    print: bool,
    config: &Config,
    writer: &mut W,
) -> Result<Catalog, ImportError> {
    let catalog = Catalog::load(path, config)?;

    if print {
        catalog
            .outline()
            .write_to(writer)
            .map_err(ImportError::Write)?;
    } else {
        tracing::debug!("Printing disabled, outline not written");
    }

    Ok(catalog)
}

/// Errors that can occur while importing a schema export.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The source file could not be opened or read.
    FileAccess {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The source contained malformed lines and `allow_malformed` is off.
    MalformedLines(Vec<MalformedLine>),

    /// The outline could not be written.
    Write(#[source] io::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileAccess { path, .. } => write!(f, "Failed to read {}", path.display()),
            Self::MalformedLines(lines) => {
                write!(f, "Malformed lines: ")?;
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{line}")?;
                }
                Ok(())
            }
            Self::Write(_) => write!(f, "Failed to write outline"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const SALES: &str = "DATABASE;SalesDB;;;;;;\n\
                         TABLE;Orders;dbo;SalesDB;DATABASE;;;\n\
                         COLUMN;OrderId;;Orders;TABLE;INT;0\n\
                         COLUMN;Note;;Orders;TABLE;VARCHAR;1\n";

    const SALES_OUTLINE: &str = "Database 'SalesDB' (1 tables)\n\
                                 \tTable 'dbo.Orders' (2 columns)\n\
                                 \t\tColumn 'OrderId' with INT data type with no nulls\n\
                                 \t\tColumn 'Note' with VARCHAR data type accepts nulls\n";

    fn source_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn print(path: &Path, print: bool, config: &Config) -> (Catalog, String) {
        let mut out = Vec::new();
        let catalog = import_and_print(path, print, config, &mut out).unwrap();
        (catalog, String::from_utf8(out).unwrap())
    }

    #[test]
    fn renders_sales_database() {
        let file = source_file(SALES);
        let (_, output) = print(file.path(), true, &Config::default());

        assert_eq!(output, SALES_OUTLINE);
    }

    #[test]
    fn crlf_source_renders_identically() {
        let file = source_file(&SALES.replace('\n', "\r\n"));
        let (_, output) = print(file.path(), true, &Config::default());

        assert_eq!(output, SALES_OUTLINE);
    }

    #[test]
    fn messy_source_is_normalized_before_linking() {
        let file = source_file(
            " database ; Sales DB ;;;;;\n\
             table;Orders ; dbo ;SalesDB; DATABASE ;;\n\
             Column;Order Id;;Orders;table;INT; 1 \n",
        );
        let (_, output) = print(file.path(), true, &Config::default());

        assert_eq!(
            output,
            "Database 'SalesDB' (1 tables)\n\
             \tTable 'dbo.Orders' (0 columns)\n\
             \t\tColumn 'OrderId' with INT data type accepts nulls\n"
        );
    }

    #[test]
    fn child_count_requires_exact_parent_type() {
        let catalog = Catalog::from_source(
            "DATABASE;SalesDB;;;;;;\n\
             TABLE;Orders;dbo;SalesDB;DATABASE;;;\n\
             COLUMN;OrderId;;Orders;table;INT;0\n",
            &Config::default(),
        )
        .unwrap();

        let orders = &catalog.records()[1];
        let exact = catalog
            .records()
            .iter()
            .filter(|r| r.parent_type == orders.record_type && r.parent_name == orders.name)
            .count();
        assert_eq!(orders.child_count(), exact);
        assert_eq!(
            catalog.outline().lines(),
            vec![
                "Database 'SalesDB' (1 tables)",
                "\tTable 'dbo.Orders' (0 columns)",
                "\t\tColumn 'OrderId' with INT data type with no nulls",
            ]
        );
    }

    #[test]
    fn malformed_line_is_skipped() {
        let file = source_file("DATABASE;SalesDB;;;;;;\nTABLE;Orders\n");
        let (catalog, output) = print(file.path(), true, &Config::default());

        assert_eq!(output, "Database 'SalesDB' (0 tables)\n");
        assert_eq!(catalog.records().len(), 1);
        assert_eq!(catalog.malformed(), &[MalformedLine { line: 2, found: 2 }]);
    }

    #[test]
    fn malformed_line_fails_when_disallowed() {
        let mut config = Config::default();
        config.allow_malformed = false;
        let error = Catalog::from_source("DATABASE;SalesDB;;;;;;\nTABLE;Orders\n", &config)
            .unwrap_err();

        match error {
            ImportError::MalformedLines(lines) => {
                assert_eq!(lines, vec![MalformedLine { line: 2, found: 2 }]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn no_print_writes_nothing_but_still_links() {
        let file = source_file(SALES);
        let (catalog, output) = print(file.path(), false, &Config::default());

        assert!(output.is_empty());
        let counts: Vec<_> = catalog
            .records()
            .iter()
            .map(FlatRecord::child_count)
            .collect();
        assert_eq!(counts, vec![1, 2, 0, 0]);
    }

    #[test]
    fn child_counts_match_parent_references() {
        let mut source = String::from("DATABASE;Big;;;;;\n");
        for table in 0..5 {
            source.push_str(&format!("TABLE;T{table};dbo;Big;DATABASE;;\n"));
            for column in 0..table {
                source.push_str(&format!("COLUMN;C{column};;T{table};TABLE;INT;0\n"));
            }
        }
        let catalog = Catalog::from_source(&source, &Config::default()).unwrap();

        for record in catalog.records() {
            let expected = catalog
                .records()
                .iter()
                .filter(|r| r.parent_type == record.record_type && r.parent_name == record.name)
                .count();
            assert_eq!(record.child_count(), expected, "{record}");
        }
        assert_eq!(catalog.records()[0].child_count(), 5);
    }

    #[test]
    fn lower_case_database_is_rendered() {
        let catalog = Catalog::from_source("database;SalesDB;;;;;\n", &Config::default()).unwrap();
        assert_eq!(
            catalog.outline().lines(),
            vec!["Database 'SalesDB' (0 tables)"]
        );
    }

    #[test]
    fn reports_orphans() {
        let catalog = Catalog::from_source(
            "DATABASE;SalesDB;;;;;\nCOLUMN;Ghost;;Missing;TABLE;INT;0\n",
            &Config::default(),
        )
        .unwrap();

        let orphans: Vec<_> = catalog.orphans().map(|r| r.name.as_str()).collect();
        assert_eq!(orphans, vec!["Ghost"]);
    }

    #[test]
    fn missing_file_is_file_access_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing.csv");

        let error = import_and_print(&path, true, &Config::default(), &mut io::sink()).unwrap_err();

        assert!(matches!(error, ImportError::FileAccess { .. }));
        assert_eq!(
            error.to_string(),
            format!("Failed to read {}", path.display())
        );
    }

    #[test]
    fn custom_delimiter_is_used() {
        let mut config = Config::default();
        config.set_delimiter('|');
        let catalog =
            Catalog::from_source("DATABASE|SalesDB|||||\nTABLE|Orders|dbo|SalesDB|DATABASE||\n", &config)
                .unwrap();

        assert_eq!(
            catalog.outline().lines(),
            vec!["Database 'SalesDB' (1 tables)", "\tTable 'dbo.Orders' (0 columns)"]
        );
    }
}
