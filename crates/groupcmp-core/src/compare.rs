//! Partition equivalence: the comparison entry point.
//!
//! Two partitions are equivalent when they hold the same multiset of
//! identifier sets, whatever labels either side used. [`compare`] inverts both
//! maps, decides equivalence on their canonical forms and, only when they are
//! equivalent, derives the label [`Correspondence`].
//!
//! There are exactly two outcomes and no intermediate state:
//!
//! - [`Comparison::Equivalent`]: carries the correspondence (empty when both
//!   inputs are empty).
//! - [`Comparison::NotEquivalent`]: carries no correspondence, only a
//!   [`MismatchReport`] describing the difference.

use super::correspondence::{Correspondence, correspond};
use super::partition::{Partition, invert};
use super::report::MismatchReport;
use super::types::IdentifierGroupMap;

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// The result of comparing a base partition against a candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// Same groups on both sides.
    Equivalent {
        /// Base label → candidate label for every group.
        correspondence: Correspondence,
    },
    /// The groupings differ.
    NotEquivalent {
        /// Which groups and identifiers failed to match.
        report: MismatchReport,
    },
}

impl Comparison {
    /// Returns `true` for [`Comparison::Equivalent`].
    #[must_use]
    pub const fn is_equivalent(&self) -> bool {
        matches!(self, Self::Equivalent { .. })
    }

    /// The label correspondence, or `None` if the partitions differ.
    ///
    /// `Some` of an empty correspondence means two empty partitions matched;
    /// `None` means there is no correspondence at all.
    #[must_use]
    pub const fn correspondence(&self) -> Option<&Correspondence> {
        match self {
            Self::Equivalent { correspondence } => Some(correspondence),
            Self::NotEquivalent { .. } => None,
        }
    }

    /// Consume the comparison, keeping only the correspondence.
    #[must_use]
    pub fn into_correspondence(self) -> Option<Correspondence> {
        match self {
            Self::Equivalent { correspondence } => Some(correspondence),
            Self::NotEquivalent { .. } => None,
        }
    }

    /// The mismatch report, or `None` if the partitions are equivalent.
    #[must_use]
    pub const fn mismatch(&self) -> Option<&MismatchReport> {
        match self {
            Self::Equivalent { .. } => None,
            Self::NotEquivalent { report } => Some(report),
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Compare the grouping in `base` with the grouping in `candidate`.
///
/// Pure and total: it only reads its inputs, so it is safe to call from
/// several threads on independent maps.
#[must_use]
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(base_ids = base.len(), candidate_ids = candidate.len())
)]
pub fn compare(base: &IdentifierGroupMap, candidate: &IdentifierGroupMap) -> Comparison {
    let base = invert(base);
    let candidate = invert(candidate);
    compare_partitions(&base, &candidate)
}

/// [`compare`] for partitions that are already inverted.
#[must_use]
pub fn compare_partitions(base: &Partition, candidate: &Partition) -> Comparison {
    tracing::debug!(
        base_groups = base.len(),
        candidate_groups = candidate.len(),
        "comparing partitions"
    );

    if !equivalent(base, candidate) {
        return Comparison::NotEquivalent {
            report: MismatchReport::between(base, candidate),
        };
    }

    match correspond(base, candidate) {
        Ok(correspondence) => Comparison::Equivalent { correspondence },
        Err(err) => {
            // Unreachable for partitions built by `invert`: equal canonical
            // forms of disjoint groups pair up one-to-one.
            tracing::warn!(%err, "equivalent partitions did not pair up one-to-one");
            Comparison::NotEquivalent {
                report: MismatchReport::between(base, candidate),
            }
        }
    }
}

/// Returns `true` if both partitions hold the same multiset of identifier
/// sets, ignoring labels.
///
/// Decided on [`Partition::canonical_groups`], so the answer never depends on
/// iteration order.
#[must_use]
pub fn equivalent(base: &Partition, candidate: &Partition) -> bool {
    if base.len() != candidate.len() || base.identifier_count() != candidate.identifier_count() {
        return false;
    }
    base.canonical_groups() == candidate.canonical_groups()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::types::{GroupLabel, Identifier};
    use proptest::prelude::*;

    fn map(pairs: &[(&str, &str)]) -> IdentifierGroupMap {
        IdentifierGroupMap::try_from_pairs(pairs.iter().copied()).unwrap()
    }

    // -- Concrete scenarios --

    #[test]
    fn relabeled_letters_are_equivalent() {
        let base = map(&[
            ("A", "5"),
            ("B", "2"),
            ("C", "3"),
            ("D", "3"),
            ("G", "2"),
            ("K", "5"),
            ("L", "4"),
            ("M", "2"),
        ]);
        let candidate = map(&[
            ("A", "X"),
            ("B", "Y"),
            ("C", "Z"),
            ("D", "Z"),
            ("G", "Y"),
            ("K", "X"),
            ("L", "W"),
            ("M", "Y"),
        ]);

        let result = compare(&base, &candidate);

        assert!(result.is_equivalent());
        assert_eq!(
            result.correspondence(),
            Some(&Correspondence::from_iter([
                ("5", "X"),
                ("2", "Y"),
                ("3", "Z"),
                ("4", "W"),
            ]))
        );
        assert!(result.mismatch().is_none());
    }

    #[test]
    fn relabeled_patterns_are_equivalent() {
        let base = map(&[
            ("Pattern1", "1"),
            ("Pattern2", "2"),
            ("Pattern3", "1"),
            ("Pattern4", "3"),
            ("Pattern5", "3"),
            ("Pattern6", "2"),
        ]);
        let candidate = map(&[
            ("Pattern1", "10"),
            ("Pattern2", "36"),
            ("Pattern3", "10"),
            ("Pattern4", "7"),
            ("Pattern5", "7"),
            ("Pattern6", "36"),
        ]);

        let corr = compare(&base, &candidate).into_correspondence().unwrap();
        assert_eq!(
            corr,
            Correspondence::from_iter([("1", "10"), ("2", "36"), ("3", "7")])
        );
    }

    #[test]
    fn moved_identifier_is_not_equivalent() {
        let base = map(&[("A", "1"), ("C", "1"), ("B", "2")]);
        let candidate = map(&[("A", "1"), ("B", "2"), ("C", "2")]);

        let result = compare(&base, &candidate);

        assert!(!result.is_equivalent());
        assert_eq!(result.correspondence(), None);
        assert!(!result.mismatch().unwrap().is_empty());
    }

    #[test]
    fn empty_versus_empty_is_equivalent_with_empty_correspondence() {
        let result = compare(&IdentifierGroupMap::new(), &IdentifierGroupMap::new());
        assert!(result.is_equivalent());
        assert_eq!(result.correspondence(), Some(&Correspondence::default()));
    }

    #[test]
    fn empty_versus_non_empty_is_not_equivalent() {
        let result = compare(&IdentifierGroupMap::new(), &map(&[("A", "1")]));
        assert!(!result.is_equivalent());
        let report = result.mismatch().unwrap();
        assert_eq!(report.only_in_candidate, vec![Identifier::from("A")]);
    }

    #[test]
    fn same_group_sizes_with_different_members_are_not_equivalent() {
        // Both sides have groups of sizes {2, 1}; membership differs.
        let base = map(&[("A", "1"), ("B", "1"), ("C", "2")]);
        let candidate = map(&[("A", "1"), ("C", "1"), ("B", "2")]);
        assert!(!compare(&base, &candidate).is_equivalent());
    }

    #[test]
    fn identifier_missing_from_candidate_is_not_equivalent() {
        let base = map(&[("A", "1"), ("B", "1"), ("C", "2")]);
        let candidate = map(&[("A", "1"), ("B", "1")]);

        let result = compare(&base, &candidate);
        assert!(!result.is_equivalent());
        assert_eq!(result.mismatch().unwrap().only_in_base, vec![Identifier::from("C")]);
    }

    #[test]
    fn swapped_identifier_keeps_counts_but_is_not_equivalent() {
        // Same number of groups and identifiers, C replaced by D.
        let base = map(&[("A", "1"), ("B", "1"), ("C", "2")]);
        let candidate = map(&[("A", "1"), ("B", "1"), ("D", "2")]);
        assert!(!compare(&base, &candidate).is_equivalent());
    }

    #[test]
    fn compare_partitions_matches_compare() {
        let base = map(&[("A", "1"), ("B", "2")]);
        let candidate = map(&[("A", "q"), ("B", "r")]);
        assert_eq!(
            compare(&base, &candidate),
            compare_partitions(&invert(&base), &invert(&candidate))
        );
    }

    // -- Properties --

    fn arb_map() -> impl Strategy<Value = IdentifierGroupMap> {
        prop::collection::btree_map("[a-h]{1,3}", 0u8..5, 0..30).prop_map(|entries| {
            IdentifierGroupMap::try_from_pairs(
                entries.into_iter().map(|(id, label)| (id, label.to_string())),
            )
            .unwrap()
        })
    }

    /// A map together with a bijective renaming of its labels.
    fn arb_map_and_renaming() -> impl Strategy<Value = (IdentifierGroupMap, BTreeMap<GroupLabel, GroupLabel>)>
    {
        (arb_map(), any::<u64>()).prop_map(|(map, salt)| {
            let labels: std::collections::BTreeSet<GroupLabel> =
                map.iter().map(|(_, l)| l.clone()).collect();
            let count = labels.len();
            // Rotate the label list by a salt-chosen offset and suffix it so
            // new labels never collide with old ones textually.
            let offset = if count == 0 {
                0
            } else {
                usize::try_from(salt % count as u64).unwrap()
            };
            let targets: Vec<GroupLabel> = labels
                .iter()
                .cycle()
                .skip(offset)
                .take(count)
                .map(|l| GroupLabel::new(format!("{l}'")))
                .collect();
            let renaming = labels.into_iter().zip(targets).collect();
            (map, renaming)
        })
    }

    fn rename(map: &IdentifierGroupMap, renaming: &BTreeMap<GroupLabel, GroupLabel>) -> IdentifierGroupMap {
        IdentifierGroupMap::try_from_pairs(
            map.iter().map(|(id, label)| (id.clone(), renaming[label].clone())),
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn prop_reflexive_with_identity(m in arb_map()) {
            let result = compare(&m, &m);
            prop_assert!(result.is_equivalent());
            let corr = result.into_correspondence().unwrap();
            prop_assert!(corr.is_identity());
            prop_assert_eq!(corr.len(), invert(&m).len());
        }

        #[test]
        fn prop_symmetric(a in arb_map(), b in arb_map()) {
            prop_assert_eq!(
                compare(&a, &b).is_equivalent(),
                compare(&b, &a).is_equivalent()
            );
        }

        #[test]
        fn prop_renaming_is_recovered((m, renaming) in arb_map_and_renaming()) {
            let renamed = rename(&m, &renaming);
            let result = compare(&m, &renamed);
            prop_assert!(result.is_equivalent());
            let corr = result.into_correspondence().unwrap();
            let recovered: BTreeMap<GroupLabel, GroupLabel> =
                corr.iter().map(|(b, c)| (b.clone(), c.clone())).collect();
            prop_assert_eq!(recovered, renaming);
        }

        #[test]
        fn prop_extra_identifier_breaks_equivalence(m in arb_map(), label in 0u8..5) {
            let mut extended = m.clone();
            // Upper-case never collides with the generated lower-case ids.
            extended.insert(Identifier::from("EXTRA"), GroupLabel::new(label.to_string())).unwrap();
            prop_assert!(!compare(&m, &extended).is_equivalent());
            prop_assert!(!compare(&extended, &m).is_equivalent());
        }

        #[test]
        fn prop_splitting_a_group_breaks_equivalence(m in arb_map()) {
            let partition = invert(&m);
            // Split the first group with at least two members.
            let Some((label, members)) = partition.iter().find(|(_, s)| s.len() >= 2) else {
                return Ok(());
            };
            let Some(moved) = members.iter().next() else {
                return Ok(());
            };
            let fresh = GroupLabel::new(format!("{label}-split"));
            let split = IdentifierGroupMap::try_from_pairs(m.iter().map(|(id, l)| {
                if id == moved { (id.clone(), fresh.clone()) } else { (id.clone(), l.clone()) }
            }))
            .unwrap();

            prop_assert!(!compare(&m, &split).is_equivalent());
            prop_assert!(compare(&m, &split).correspondence().is_none());
        }

        #[test]
        fn prop_not_equivalent_always_explains_itself(a in arb_map(), b in arb_map()) {
            if let Comparison::NotEquivalent { report } = compare(&a, &b) {
                prop_assert!(!report.unmatched_base.is_empty() || !report.unmatched_candidate.is_empty());
            }
        }
    }
}
