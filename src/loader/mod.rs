//! Loaders: turn a grouping file into an [`IdentifierGroupMap`].
//!
//! Each supported format implements [`GroupSource`]. Loaders enforce the
//! input contract the comparator relies on: at least one record, no empty
//! identifier or label, and one label per identifier. Any violation is a
//! [`LoadError`]; no row is ever dropped silently.

pub mod csv;
pub mod txt;

use std::fmt;
use std::fs::File;
use std::path::Path;

use groupcmp_core::IdentifierGroupMap;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

pub use self::csv::CsvLoader;
pub use self::txt::{TxtLayout, TxtLoader};

// ---------------------------------------------------------------------------
// GroupSource
// ---------------------------------------------------------------------------

/// Something that can read an identifier → group map from a file.
pub trait GroupSource {
    /// Load the map stored at `path`.
    ///
    /// # Errors
    /// Returns [`LoadError`] if the file is unreadable or malformed.
    fn load(&self, path: &Path) -> Result<IdentifierGroupMap, LoadError>;
}

// ---------------------------------------------------------------------------
// FileType
// ---------------------------------------------------------------------------

/// Supported grouping file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Comma-separated rows with a header.
    Csv,
    /// Line-oriented identifier / `property: value` blocks.
    Txt,
}

impl FileType {
    /// The file extension this type requires, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }

    /// Infer the type from a path's extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("txt") {
            Some(Self::Txt)
        } else {
            None
        }
    }

    /// Returns `true` if `path` carries this type's extension.
    #[must_use]
    pub fn matches(self, path: &Path) -> bool {
        Self::from_path(path) == Some(self)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// A configured loader for one of the supported formats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Loader {
    /// Read CSV rows.
    Csv(CsvLoader),
    /// Read TXT blocks.
    Txt(TxtLoader),
}

impl Loader {
    /// The format this loader reads.
    #[must_use]
    pub const fn file_type(&self) -> FileType {
        match self {
            Self::Csv(_) => FileType::Csv,
            Self::Txt(_) => FileType::Txt,
        }
    }
}

impl GroupSource for Loader {
    fn load(&self, path: &Path) -> Result<IdentifierGroupMap, LoadError> {
        match self {
            Self::Csv(loader) => loader.load(path),
            Self::Txt(loader) => loader.load(path),
        }
    }
}

pub(crate) fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
