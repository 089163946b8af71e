//! Diagnostics for partitions that are not equivalent.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::partition::Partition;
use super::types::{GroupLabel, Identifier};

/// What differs between two non-equivalent partitions.
///
/// Purely descriptive: the verdict comes from the canonical comparison, this
/// only explains it. For two non-equivalent partitions at least one of the
/// `unmatched_*` maps is non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MismatchReport {
    /// Base groups with no identical candidate group, with their members.
    pub unmatched_base: BTreeMap<GroupLabel, Vec<Identifier>>,
    /// Candidate groups with no identical base group, with their members.
    pub unmatched_candidate: BTreeMap<GroupLabel, Vec<Identifier>>,
    /// Identifiers that appear only in the base partition.
    pub only_in_base: Vec<Identifier>,
    /// Identifiers that appear only in the candidate partition.
    pub only_in_candidate: Vec<Identifier>,
}

impl MismatchReport {
    /// Describe the differences between `base` and `candidate`.
    #[must_use]
    pub fn between(base: &Partition, candidate: &Partition) -> Self {
        let base_sets: BTreeSet<&BTreeSet<Identifier>> = base.iter().map(|(_, s)| s).collect();
        let candidate_sets: BTreeSet<&BTreeSet<Identifier>> =
            candidate.iter().map(|(_, s)| s).collect();

        let base_ids = base.identifiers();
        let candidate_ids = candidate.identifiers();

        Self {
            unmatched_base: unmatched(base, &candidate_sets),
            unmatched_candidate: unmatched(candidate, &base_sets),
            only_in_base: base_ids.difference(&candidate_ids).map(|id| (*id).clone()).collect(),
            only_in_candidate: candidate_ids
                .difference(&base_ids)
                .map(|id| (*id).clone())
                .collect(),
        }
    }

    /// Returns `true` if nothing differs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unmatched_base.is_empty()
            && self.unmatched_candidate.is_empty()
            && self.only_in_base.is_empty()
            && self.only_in_candidate.is_empty()
    }
}

fn unmatched(
    side: &Partition,
    other_sets: &BTreeSet<&BTreeSet<Identifier>>,
) -> BTreeMap<GroupLabel, Vec<Identifier>> {
    side.iter()
        .filter(|(_, members)| !other_sets.contains(members))
        .map(|(label, members)| (label.clone(), members.iter().cloned().collect()))
        .collect()
}
