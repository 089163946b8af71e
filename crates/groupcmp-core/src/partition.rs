//! Partition: the label → identifier-set view of an [`IdentifierGroupMap`].
//!
//! A [`Partition`] is derived, never loaded. Every label of the source map
//! becomes one key, the identifier sets are non-empty and pairwise disjoint,
//! and their union is exactly the source's identifier set.

use std::collections::{BTreeMap, BTreeSet};

use super::types::{GroupLabel, Identifier, IdentifierGroupMap};

/// Group label → the identifiers carrying that label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    groups: BTreeMap<GroupLabel, BTreeSet<Identifier>>,
}

/// Group the identifiers of `map` by their label.
///
/// Labels are kept as-is: two distinct labels always yield two distinct
/// groups, even if a caller might consider them "the same". An empty map
/// yields an empty partition.
#[must_use]
pub fn invert(map: &IdentifierGroupMap) -> Partition {
    let mut groups: BTreeMap<GroupLabel, BTreeSet<Identifier>> = BTreeMap::new();
    for (identifier, label) in map {
        groups
            .entry(label.clone())
            .or_default()
            .insert(identifier.clone());
    }
    Partition { groups }
}

impl From<&IdentifierGroupMap> for Partition {
    fn from(map: &IdentifierGroupMap) -> Self {
        invert(map)
    }
}

impl Partition {
    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The identifier set under `label`.
    #[must_use]
    pub fn group(&self, label: &GroupLabel) -> Option<&BTreeSet<Identifier>> {
        self.groups.get(label)
    }

    /// Iterate `(label, identifiers)` in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupLabel, &BTreeSet<Identifier>)> {
        self.groups.iter()
    }

    /// Iterate labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &GroupLabel> {
        self.groups.keys()
    }

    /// Total number of identifiers across all groups.
    #[must_use]
    pub fn identifier_count(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }

    /// Every identifier in the partition.
    #[must_use]
    pub fn identifiers(&self) -> BTreeSet<&Identifier> {
        self.groups.values().flatten().collect()
    }

    /// The label-free canonical form of this partition.
    ///
    /// Each group's identifiers are sorted, then the groups themselves are
    /// sorted lexicographically. Two partitions have equal canonical forms
    /// iff they hold the same multiset of identifier sets, regardless of
    /// labels or container iteration order.
    #[must_use]
    pub fn canonical_groups(&self) -> Vec<Vec<&Identifier>> {
        let mut canonical: Vec<Vec<&Identifier>> = self
            .groups
            .values()
            .map(|members| {
                let mut sorted: Vec<&Identifier> = members.iter().collect();
                sorted.sort_unstable();
                sorted
            })
            .collect();
        canonical.sort_unstable();
        canonical
    }

    /// Build a partition from raw groups without the invariants `invert`
    /// guarantees. Only for exercising malformed-input paths.
    #[cfg(test)]
    pub(crate) fn from_raw_groups<const N: usize>(groups: [(&str, &[&str]); N]) -> Self {
        Self {
            groups: groups
                .into_iter()
                .map(|(label, ids)| {
                    (
                        GroupLabel::from(label),
                        ids.iter().map(|id| Identifier::from(*id)).collect(),
                    )
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
