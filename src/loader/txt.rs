//! TXT loader: blocks of an identifier line followed by `property: value`
//! lines.
//!
//! ```text
//! Pattern1
//! Class_id: 1
//! Score: 0.93
//!
//! Pattern2
//! Class_id: 2
//! ```
//!
//! Two layouts decide where a record starts:
//!
//! - [`TxtLayout::Inferred`]: any non-blank line without a `:` is an
//!   identifier line. Identifiers therefore cannot contain colons.
//! - [`TxtLayout::BlankLine`]: records are separated by blank lines and the
//!   first line of each record is the identifier, verbatim, colons included.

use std::collections::BTreeSet;
use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::Path;

use groupcmp_core::{GroupLabel, Identifier, IdentifierGroupMap};
use serde::Deserialize;

use super::{GroupSource, open};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// TxtLayout
// ---------------------------------------------------------------------------

/// How record boundaries are recognised in a TXT file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TxtLayout {
    /// A line without a colon starts a new record.
    #[default]
    Inferred,
    /// A blank line ends a record; the next line is an identifier.
    BlankLine,
}

impl fmt::Display for TxtLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inferred => write!(f, "inferred"),
            Self::BlankLine => write!(f, "blank-line"),
        }
    }
}

// ---------------------------------------------------------------------------
// TxtLoader
// ---------------------------------------------------------------------------

/// Reads the value of `group_property` for each identifier block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxtLoader {
    group_property: String,
    layout: TxtLayout,
}

impl TxtLoader {
    /// A loader for `group_property` using the inferred layout.
    #[must_use]
    pub fn new(group_property: impl Into<String>) -> Self {
        Self {
            group_property: group_property.into(),
            layout: TxtLayout::default(),
        }
    }

    /// Use `layout` to find record boundaries.
    #[must_use]
    pub fn with_layout(mut self, layout: TxtLayout) -> Self {
        self.layout = layout;
        self
    }

    /// The property holding the group label.
    #[must_use]
    pub fn group_property(&self) -> &str {
        &self.group_property
    }

    /// The record layout.
    #[must_use]
    pub const fn layout(&self) -> TxtLayout {
        self.layout
    }

    /// Read a map from `reader`. `origin` only labels errors.
    ///
    /// Property names are compared after trimming; the value is everything
    /// after the first colon, trimmed. Records that never set the group
    /// property contribute nothing (and are logged), but the property must
    /// appear at least once in the file.
    ///
    /// # Errors
    /// Returns [`LoadError`] for an empty file, a property line before any
    /// identifier, a non-property line inside a blank-line record, an empty
    /// group value, a missing group property, or an identifier listed under
    /// two groups.
    #[tracing::instrument(level = "debug", skip(self, reader), fields(path = %origin.display()))]
    pub fn read<R: BufRead>(&self, reader: R, origin: &Path) -> Result<IdentifierGroupMap, LoadError> {
        let mut map = IdentifierGroupMap::new();
        let mut seen: BTreeSet<Identifier> = BTreeSet::new();
        let mut current: Option<Identifier> = None;
        let mut saw_content = false;
        let mut found = false;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx as u64 + 1;
            let raw = line.map_err(|source| LoadError::Io {
                path: origin.to_owned(),
                source,
            })?;
            let text = raw.trim();

            if text.is_empty() {
                if self.layout == TxtLayout::BlankLine {
                    current = None;
                }
                continue;
            }
            saw_content = true;

            let starts_record = match self.layout {
                TxtLayout::Inferred => !text.contains(':'),
                TxtLayout::BlankLine => current.is_none(),
            };
            if starts_record {
                // A group property line cannot open a record.
                if self.layout == TxtLayout::BlankLine
                    && let Some((key, _)) = text.split_once(':')
                    && key.trim() == self.group_property
                {
                    return Err(LoadError::PropertyBeforeIdentifier {
                        path: origin.to_owned(),
                        line: line_no,
                        property: key.trim().to_owned(),
                    });
                }
                let identifier = Identifier::new(text);
                seen.insert(identifier.clone());
                current = Some(identifier);
                continue;
            }

            let Some((key, value)) = text.split_once(':') else {
                return Err(LoadError::MalformedLine {
                    path: origin.to_owned(),
                    line: line_no,
                    text: text.to_owned(),
                });
            };
            let key = key.trim();

            let Some(identifier) = &current else {
                return Err(LoadError::PropertyBeforeIdentifier {
                    path: origin.to_owned(),
                    line: line_no,
                    property: key.to_owned(),
                });
            };

            if key != self.group_property {
                continue;
            }

            let value = value.trim();
            if value.is_empty() {
                return Err(LoadError::MissingValue {
                    path: origin.to_owned(),
                    line: line_no,
                    field: self.group_property.clone(),
                });
            }

            map.insert(identifier.clone(), GroupLabel::new(value))
                .map_err(|source| LoadError::ConflictingLabel {
                    path: origin.to_owned(),
                    line: line_no,
                    source,
                })?;
            found = true;
        }

        if !saw_content {
            return Err(LoadError::EmptySource {
                path: origin.to_owned(),
            });
        }
        if !found {
            return Err(LoadError::PropertyNotFound {
                path: origin.to_owned(),
                property: self.group_property.clone(),
            });
        }

        let unlabeled = seen.iter().filter(|id| !map.contains(id)).count();
        if unlabeled > 0 {
            tracing::warn!(
                unlabeled,
                property = %self.group_property,
                "records without the group property were skipped"
            );
        }
        tracing::debug!(identifiers = map.len(), layout = %self.layout, "loaded txt");
        Ok(map)
    }
}

impl GroupSource for TxtLoader {
    fn load(&self, path: &Path) -> Result<IdentifierGroupMap, LoadError> {
        self.read(BufReader::new(open(path)?), path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
