//! groupcmp-core: partition equivalence for grouping pipelines.
//!
//! Given two identifier → group-label maps produced by independent runs, decide
//! whether they describe the same grouping and, if so, which label on one side
//! corresponds to which label on the other. Labels are treated as opaque
//! tokens: only identifier-set equality matters.
//!
//! ```
//! use groupcmp_core::{IdentifierGroupMap, compare};
//!
//! let base = IdentifierGroupMap::try_from_pairs([("A", "1"), ("B", "1"), ("C", "2")]).unwrap();
//! let candidate = IdentifierGroupMap::try_from_pairs([("A", "x"), ("B", "x"), ("C", "y")]).unwrap();
//!
//! let result = compare(&base, &candidate);
//! assert!(result.is_equivalent());
//! assert_eq!(result.correspondence().unwrap().to_string(), "{1: x, 2: y}");
//! ```
//!
//! No I/O happens here; loading maps from files is the caller's business.

pub mod compare;
pub mod correspondence;
pub mod partition;
pub mod report;
pub mod types;

pub use compare::{Comparison, compare, compare_partitions, equivalent};
pub use correspondence::{Correspondence, CorrespondenceError, correspond};
pub use partition::{Partition, invert};
pub use report::MismatchReport;
pub use types::{GroupLabel, Identifier, IdentifierGroupMap, LabelConflict};
