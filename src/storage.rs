pub mod catalog;
pub mod parser;
mod source;

pub use catalog::{Catalog, ImportError, import_and_print};
pub use parser::{MalformedLine, ParsedRecords, parse_line, parse_records};
pub use source::read_source;
