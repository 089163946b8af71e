//! Label correspondence between two equivalent partitions.
//!
//! A [`Correspondence`] maps each base label to the candidate label whose
//! identifier set is identical. It is derived purely from set equality; the
//! label text is never consulted.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::partition::Partition;
use super::types::GroupLabel;

// ---------------------------------------------------------------------------
// Correspondence
// ---------------------------------------------------------------------------

/// Base label → candidate label, for groups with identical identifier sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Correspondence {
    pairs: BTreeMap<GroupLabel, GroupLabel>,
}

impl Correspondence {
    /// The candidate label matched to `base`.
    #[must_use]
    pub fn get(&self, base: &GroupLabel) -> Option<&GroupLabel> {
        self.pairs.get(base)
    }

    /// Number of matched label pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pairs were matched (only for empty partitions).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate `(base, candidate)` pairs in base-label order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupLabel, &GroupLabel)> {
        self.pairs.iter()
    }

    /// Returns `true` if every base label maps to its own text.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.pairs.iter().all(|(base, candidate)| base == candidate)
    }

    /// The same correspondence read from the candidate side.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .map(|(base, candidate)| (candidate.clone(), base.clone()))
                .collect(),
        }
    }
}

impl<B, C> FromIterator<(B, C)> for Correspondence
where
    B: Into<GroupLabel>,
    C: Into<GroupLabel>,
{
    fn from_iter<I: IntoIterator<Item = (B, C)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(base, candidate)| (base.into(), candidate.into()))
                .collect(),
        }
    }
}

/// Renders as `{1: 10, 2: 36, 3: 7}`.
impl fmt::Display for Correspondence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (base, candidate)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{base}: {candidate}")?;
        }
        f.write_str("}")
    }
}

// ---------------------------------------------------------------------------
// CorrespondenceError
// ---------------------------------------------------------------------------

/// Why a one-to-one correspondence could not be built.
///
/// Neither variant can occur for partitions that [`equivalent`] accepted;
/// they signal that the caller skipped the check or fed malformed groups.
///
/// [`equivalent`]: crate::equivalent
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CorrespondenceError {
    /// No candidate group has the same identifiers as this base group.
    #[error("base group `{base}` has no candidate group with the same identifiers")]
    Unmatched {
        /// The unmatched base label.
        base: GroupLabel,
    },

    /// Several candidate groups have the same identifiers as this base group.
    #[error("base group `{base}` matches {} candidate groups", .candidates.len())]
    Ambiguous {
        /// The base label.
        base: GroupLabel,
        /// Every candidate label whose set equals the base set.
        candidates: Vec<GroupLabel>,
    },
}

// ---------------------------------------------------------------------------
// correspond
// ---------------------------------------------------------------------------

/// Pair every base label with the candidate label holding the same set.
///
/// Every candidate group is scanned for each base group, so nothing is
/// assumed about how many matches exist.
///
/// # Errors
/// Returns [`CorrespondenceError::Unmatched`] if a base set has no equal
/// candidate set, and [`CorrespondenceError::Ambiguous`] if it has more than
/// one. Call this only after [`equivalent`](crate::equivalent) returned
/// `true`.
pub fn correspond(
    base: &Partition,
    candidate: &Partition,
) -> Result<Correspondence, CorrespondenceError> {
    let mut pairs = BTreeMap::new();

    for (base_label, base_set) in base.iter() {
        let mut matches = candidate
            .iter()
            .filter(|(_, candidate_set)| *candidate_set == base_set)
            .map(|(label, _)| label);

        let Some(first) = matches.next() else {
            return Err(CorrespondenceError::Unmatched {
                base: base_label.clone(),
            });
        };
        let extra: Vec<GroupLabel> = matches.cloned().collect();
        if !extra.is_empty() {
            let mut candidates = Vec::with_capacity(extra.len() + 1);
            candidates.push(first.clone());
            candidates.extend(extra);
            return Err(CorrespondenceError::Ambiguous {
                base: base_label.clone(),
                candidates,
            });
        }

        pairs.insert(base_label.clone(), first.clone());
    }

    Ok(Correspondence { pairs })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
