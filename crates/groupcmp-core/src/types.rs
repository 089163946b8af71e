//! Foundation types: identifiers, group labels, and the identifier → label map
//! that loaders produce and the comparator consumes.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// An opaque token naming one entity that gets grouped.
///
/// Ordered by its text (byte-wise), which is the total order used when
/// partitions are canonicalized.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Wrap a token as an identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Return the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// GroupLabel
// ---------------------------------------------------------------------------

/// The group ID a source assigned to an identifier.
///
/// Labels are only meaningful inside the source that produced them: `"3"` in
/// one file has nothing to do with `"3"` in another.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupLabel(String);

impl GroupLabel {
    /// Wrap a token as a group label.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Return the label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for GroupLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// LabelConflict
// ---------------------------------------------------------------------------

/// An identifier was assigned two different labels by the same source.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("identifier `{identifier}` is assigned to both group `{existing}` and group `{conflicting}`")]
pub struct LabelConflict {
    /// The identifier seen twice.
    pub identifier: Identifier,
    /// The label recorded first.
    pub existing: GroupLabel,
    /// The label that disagreed with it.
    pub conflicting: GroupLabel,
}

// ---------------------------------------------------------------------------
// IdentifierGroupMap
// ---------------------------------------------------------------------------

/// Identifier → group label, as read from one source.
///
/// A total function: every identifier present has exactly one label. The only
/// way to add an entry is [`insert`](Self::insert), which refuses to relabel
/// an identifier, so a map can never silently lose a row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdentifierGroupMap {
    entries: BTreeMap<Identifier, GroupLabel>,
}

impl IdentifierGroupMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(identifier, label)` pairs.
    ///
    /// # Errors
    /// Returns [`LabelConflict`] if an identifier appears twice with
    /// different labels. Exact repeats are accepted.
    pub fn try_from_pairs<I, K, V>(pairs: I) -> Result<Self, LabelConflict>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Identifier>,
        V: Into<GroupLabel>,
    {
        let mut map = Self::new();
        for (identifier, label) in pairs {
            map.insert(identifier.into(), label.into())?;
        }
        Ok(map)
    }

    /// Record that `identifier` belongs to `label`.
    ///
    /// Re-inserting the same pair is a no-op.
    ///
    /// # Errors
    /// Returns [`LabelConflict`] if `identifier` already has another label.
    pub fn insert(&mut self, identifier: Identifier, label: GroupLabel) -> Result<(), LabelConflict> {
        match self.entries.entry(identifier) {
            Entry::Vacant(slot) => {
                slot.insert(label);
                Ok(())
            }
            Entry::Occupied(slot) if *slot.get() == label => Ok(()),
            Entry::Occupied(slot) => Err(LabelConflict {
                identifier: slot.key().clone(),
                existing: slot.get().clone(),
                conflicting: label,
            }),
        }
    }

    /// The label of `identifier`, if present.
    #[must_use]
    pub fn get(&self, identifier: &Identifier) -> Option<&GroupLabel> {
        self.entries.get(identifier)
    }

    /// Returns `true` if `identifier` is present.
    #[must_use]
    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(identifier, label)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &GroupLabel)> {
        self.entries.iter()
    }

    /// Iterate identifiers in order.
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.keys()
    }
}

impl<'a> IntoIterator for &'a IdentifierGroupMap {
    type Item = (&'a Identifier, &'a GroupLabel);
    type IntoIter = std::collections::btree_map::Iter<'a, Identifier, GroupLabel>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut map = IdentifierGroupMap::new();
        map.insert("A".into(), "5".into()).unwrap();
        map.insert("B".into(), "2".into()).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"A".into()), Some(&GroupLabel::from("5")));
        assert!(map.contains(&"B".into()));
        assert!(!map.contains(&"C".into()));
    }

    #[test]
    fn repeated_identical_pair_is_idempotent() {
        let map = IdentifierGroupMap::try_from_pairs([("A", "1"), ("A", "1")]).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn relabeling_an_identifier_is_rejected() {
        let err = IdentifierGroupMap::try_from_pairs([("A", "1"), ("B", "2"), ("A", "3")])
            .unwrap_err();
        assert_eq!(
            err,
            LabelConflict {
                identifier: "A".into(),
                existing: "1".into(),
                conflicting: "3".into(),
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("`A`"), "{msg}");
        assert!(msg.contains("`1`") && msg.contains("`3`"), "{msg}");
    }

    #[test]
    fn iteration_is_ordered_by_identifier() {
        let map = IdentifierGroupMap::try_from_pairs([("M", "2"), ("A", "5"), ("G", "2")]).unwrap();
        let ids: Vec<&str> = map.identifiers().map(Identifier::as_str).collect();
        assert_eq!(ids, vec!["A", "G", "M"]);
    }

    #[test]
    fn serializes_as_plain_object() {
        let map = IdentifierGroupMap::try_from_pairs([("B", "2"), ("A", "1")]).unwrap();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"A":"1","B":"2"}"#);
    }
}
