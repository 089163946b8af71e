//! Error types for loading grouping files.
//!
//! [`LoadError`] is the single validation-failure type returned by every
//! loader. Each variant names the offending file and, where it applies, the
//! line, so the message alone is enough to find and fix the input.
//! [`ExitCodeError`] carries a non-error exit status (a mismatch) up to `main`.

use std::fmt;
use std::path::PathBuf;

use groupcmp_core::LabelConflict;
use thiserror::Error;

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// A grouping file could not be turned into an identifier → group map.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The file holds no records.
    #[error("'{}' is empty", .path.display())]
    EmptySource {
        /// The empty file.
        path: PathBuf,
    },

    /// Required CSV columns are absent from the header row.
    #[error(
        "'{}' must contain columns {}; missing: {}",
        .path.display(),
        quoted(.required),
        quoted(.missing)
    )]
    MissingColumns {
        /// The CSV file.
        path: PathBuf,
        /// Every column the loader needs.
        required: Vec<String>,
        /// The subset of `required` not found in the header.
        missing: Vec<String>,
    },

    /// A record has an empty identifier or group value.
    #[error("'{}' line {line}: missing value for '{field}'", .path.display())]
    MissingValue {
        /// The file.
        path: PathBuf,
        /// 1-based line of the record.
        line: u64,
        /// Column or property that was empty.
        field: String,
    },

    /// The CSV reader rejected the file (bad quoting, ragged rows, encoding).
    #[error("'{}' is not valid CSV: {source}", .path.display())]
    Csv {
        /// The CSV file.
        path: PathBuf,
        /// The reader's error, including its position.
        source: csv::Error,
    },

    /// A property line showed up before any identifier line.
    #[error(
        "'{}' line {line}: property '{property}' appears before any identifier",
        .path.display()
    )]
    PropertyBeforeIdentifier {
        /// The TXT file.
        path: PathBuf,
        /// 1-based line of the property.
        line: u64,
        /// The property name on that line.
        property: String,
    },

    /// The group property never appears in the file.
    #[error("'{}' does not contain the group property '{property}'", .path.display())]
    PropertyNotFound {
        /// The TXT file.
        path: PathBuf,
        /// The property that was requested.
        property: String,
    },

    /// A line inside a record is not of the form `<property>: <value>`.
    #[error("'{}' line {line}: expected '<property>: <value>', found '{text}'", .path.display())]
    MalformedLine {
        /// The TXT file.
        path: PathBuf,
        /// 1-based line number.
        line: u64,
        /// The offending line, trimmed.
        text: String,
    },

    /// The same identifier was given two different groups.
    #[error("'{}' line {line}: {source}", .path.display())]
    ConflictingLabel {
        /// The file.
        path: PathBuf,
        /// 1-based line of the second assignment.
        line: u64,
        /// Which identifier and labels collided.
        source: LabelConflict,
    },
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// ExitCodeError
// ---------------------------------------------------------------------------

/// The command ran to completion but must exit with this status.
///
/// `main` turns it into the process exit code without printing anything.
#[derive(Debug)]
pub struct ExitCodeError(pub u8);

impl fmt::Display for ExitCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exited with code {}", self.0)
    }
}

impl std::error::Error for ExitCodeError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
