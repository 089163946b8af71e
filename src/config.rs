//! groupcmp configuration (`groupcmp.toml`).
//!
//! Supplies defaults for the column/property names, CSV delimiter, TXT
//! layout, and output format so that recurring comparisons need only the
//! two file paths. Command-line flags always win over the file.
//!
//! ```toml
//! [csv]
//! identifier_column = "IdentifierID"
//! group_column = "GroupID"
//! delimiter = ","
//! null_values = ["NA", "NaN", ""]
//!
//! [txt]
//! group_property = "Class_id"
//! layout = "blank-line"
//!
//! [output]
//! format = "json"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::format::OutputFormat;
use crate::loader::TxtLayout;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "groupcmp.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level groupcmp configuration.
///
/// Missing fields use defaults. A missing default file means all defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupcmpConfig {
    /// CSV loader defaults.
    #[serde(default)]
    pub csv: CsvConfig,

    /// TXT loader defaults.
    #[serde(default)]
    pub txt: TxtConfig,

    /// Output defaults.
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// CsvConfig
// ---------------------------------------------------------------------------

/// Defaults for CSV inputs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CsvConfig {
    /// Column holding identifiers.
    pub identifier_column: Option<String>,

    /// Column holding group labels.
    pub group_column: Option<String>,

    /// Field delimiter (single ASCII character, default `,`).
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Values read as missing. `None` keeps the loader's NA markers.
    pub null_values: Option<Vec<String>>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            identifier_column: None,
            group_column: None,
            delimiter: default_delimiter(),
            null_values: None,
        }
    }
}

const fn default_delimiter() -> char {
    ','
}

// ---------------------------------------------------------------------------
// TxtConfig
// ---------------------------------------------------------------------------

/// Defaults for TXT inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TxtConfig {
    /// Property holding group labels.
    pub group_property: Option<String>,

    /// How records are delimited.
    #[serde(default)]
    pub layout: TxtLayout,
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

/// Output settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Result format when `--format` is not given.
    #[serde(default)]
    pub format: OutputFormat,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Error loading a groupcmp configuration file.
#[derive(Debug)]
pub struct ConfigError {
    /// The path that was being loaded (if available).
    pub path: Option<PathBuf>,
    /// Human-readable message with line-level detail when possible.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = &self.path {
            write!(f, "{}: {}", p.display(), self.message)
        } else {
            write!(f, "config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

impl GroupcmpConfig {
    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// the working directory is used when present.
    ///
    /// # Errors
    /// Returns `ConfigError` if the explicit file is missing or any file is
    /// unreadable or invalid.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.exists() => Err(ConfigError {
                path: Some(path.to_owned()),
                message: "file not found".to_owned(),
            }),
            Some(path) => Self::load(path),
            None => Self::load(Path::new(DEFAULT_CONFIG_FILE)),
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// - If the file does not exist, returns all defaults (not an error).
    /// - If the file exists but contains invalid TOML, unknown fields, or an
    ///   unusable delimiter, returns a [`ConfigError`] with line-level detail.
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O errors (other than not-found) or parse errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError {
                    path: Some(path.to_owned()),
                    message: format!("could not read file: {e}"),
                });
            }
        };
        Self::parse(&contents).map_err(|mut e| {
            e.path = Some(path.to_owned());
            e
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid TOML, unknown fields, or a non-ASCII
    /// delimiter.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| {
            let mut message = e.message().to_owned();
            if let Some(span) = e.span() {
                // Calculate line number from byte offset.
                let line = toml_str[..span.start]
                    .chars()
                    .filter(|&c| c == '\n')
                    .count()
                    + 1;
                message = format!("line {line}: {message}");
            }
            ConfigError {
                path: None,
                message,
            }
        })?;

        if !config.csv.delimiter.is_ascii() {
            return Err(ConfigError {
                path: None,
                message: format!(
                    "csv.delimiter must be a single ASCII character, got '{}'",
                    config.csv.delimiter
                ),
            });
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
