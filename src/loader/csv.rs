//! CSV loader: one row per identifier, with named identifier and group
//! columns. Other columns are ignored.

use std::io::Read;
use std::path::Path;

use groupcmp_core::{GroupLabel, Identifier, IdentifierGroupMap};

use super::{GroupSource, open};
use crate::error::LoadError;

/// Field values read as missing, matching the usual NA markers written by
/// dataframe and clustering tools.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Reads `identifier_column` / `group_column` pairs from a CSV file with a
/// header row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvLoader {
    identifier_column: String,
    group_column: String,
    delimiter: u8,
    null_values: Vec<String>,
}

impl CsvLoader {
    /// A comma-delimited loader for the given columns.
    #[must_use]
    pub fn new(identifier_column: impl Into<String>, group_column: impl Into<String>) -> Self {
        Self {
            identifier_column: identifier_column.into(),
            group_column: group_column.into(),
            delimiter: b',',
            null_values: DEFAULT_NULL_VALUES.iter().map(|v| (*v).to_owned()).collect(),
        }
    }

    /// Use `delimiter` instead of a comma.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Treat exactly these values as missing, replacing the defaults.
    /// Empty fields are always missing.
    #[must_use]
    pub fn with_null_values(mut self, null_values: Vec<String>) -> Self {
        self.null_values = null_values;
        self
    }

    /// The identifier column name.
    #[must_use]
    pub fn identifier_column(&self) -> &str {
        &self.identifier_column
    }

    /// The group column name.
    #[must_use]
    pub fn group_column(&self) -> &str {
        &self.group_column
    }

    /// Read a map from `reader`. `origin` only labels errors.
    ///
    /// Fields are trimmed. An empty identifier or group field, or one equal
    /// to a null marker (`NA`, `NaN`, `null`, ...), is a
    /// [`LoadError::MissingValue`]; a header without rows is a
    /// [`LoadError::EmptySource`].
    ///
    /// # Errors
    /// Returns [`LoadError`] for missing columns, empty input, empty values,
    /// malformed CSV, or an identifier listed under two groups.
    #[tracing::instrument(level = "debug", skip(self, reader), fields(path = %origin.display()))]
    pub fn read<R: Read>(&self, reader: R, origin: &Path) -> Result<IdentifierGroupMap, LoadError> {
        let csv_error = |source| LoadError::Csv {
            path: origin.to_owned(),
            source,
        };

        let mut rdr = ::csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(::csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(csv_error)?.clone();
        if headers.is_empty() {
            return Err(LoadError::EmptySource {
                path: origin.to_owned(),
            });
        }

        let id_idx = headers.iter().position(|h| h == self.identifier_column);
        let group_idx = headers.iter().position(|h| h == self.group_column);
        let (Some(id_idx), Some(group_idx)) = (id_idx, group_idx) else {
            let missing = [&self.identifier_column, &self.group_column]
                .into_iter()
                .filter(|name| !headers.iter().any(|h| h == name.as_str()))
                .cloned()
                .collect();
            return Err(LoadError::MissingColumns {
                path: origin.to_owned(),
                required: vec![self.identifier_column.clone(), self.group_column.clone()],
                missing,
            });
        };

        let mut map = IdentifierGroupMap::new();
        let mut rows = 0usize;
        for result in rdr.records() {
            let record = result.map_err(csv_error)?;
            let line = record.position().map_or(0, ::csv::Position::line);

            let identifier = self.present(record.get(id_idx), &self.identifier_column, line, origin)?;
            let group = self.present(record.get(group_idx), &self.group_column, line, origin)?;

            map.insert(Identifier::new(identifier), GroupLabel::new(group))
                .map_err(|source| LoadError::ConflictingLabel {
                    path: origin.to_owned(),
                    line,
                    source,
                })?;
            rows += 1;
        }

        if rows == 0 {
            return Err(LoadError::EmptySource {
                path: origin.to_owned(),
            });
        }

        tracing::debug!(rows, identifiers = map.len(), "loaded csv");
        Ok(map)
    }
}

impl CsvLoader {
    fn present<'r>(
        &self,
        value: Option<&'r str>,
        field: &str,
        line: u64,
        origin: &Path,
    ) -> Result<&'r str, LoadError> {
        match value {
            Some(v) if !v.is_empty() && !self.null_values.iter().any(|null| null == v) => Ok(v),
            _ => Err(LoadError::MissingValue {
                path: origin.to_owned(),
                line,
                field: field.to_owned(),
            }),
        }
    }
}

impl GroupSource for CsvLoader {
    fn load(&self, path: &Path) -> Result<IdentifierGroupMap, LoadError> {
        self.read(open(path)?, path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
