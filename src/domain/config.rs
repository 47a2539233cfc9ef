use std::path::Path;

use serde::Deserialize;

/// Configuration for importing schema exports.
///
/// This struct holds settings that control how source lines are split and
/// how strictly malformed lines are treated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// The character separating fields within a line.
    delimiter: char,

    /// Whether lines with too few fields are skipped.
    ///
    /// When `true` (default): malformed lines are skipped and recorded, and
    /// the import carries on.
    ///
    /// When `false`: any malformed line fails the whole import.
    pub allow_malformed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            allow_malformed: default_allow_malformed(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Returns the field delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Sets the field delimiter.
    pub const fn set_delimiter(&mut self, delimiter: char) {
        self.delimiter = delimiter;
    }
}

const fn default_delimiter() -> char {
    ';'
}

const fn default_allow_malformed() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_delimiter")]
        delimiter: char,

        #[serde(default = "default_allow_malformed")]
        allow_malformed: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                delimiter,
                allow_malformed,
            } => Self {
                delimiter,
                allow_malformed,
            },
        }
    }
}
