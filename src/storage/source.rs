use std::{fs, io, path::Path};

/// Reads a source file fully into memory.
///
/// The file is expected to be UTF-8. Invalid sequences are replaced rather
/// than rejected, and a warning is logged.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_source(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::warn!(
            "{} is not valid UTF-8, invalid sequences were replaced",
            path.display()
        );
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    });
    Ok(content)
}
