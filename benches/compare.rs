//! Comparison benchmarks.
//!
//! Measures partition inversion, the full equivalent/mismatch comparison, and
//! CSV loading on synthetic maps built by the `generate` helpers.
//!
//! # Running
//!
//! ```bash
//! cargo bench --bench compare
//! # With a custom filter:
//! cargo bench --bench compare -- compare/equivalent
//! ```
//!
//! # Report
//!
//! HTML report is generated in `target/criterion/` by criterion when
//! `--features html_reports` is active (enabled by default via Cargo.toml).

use std::fmt::Write as _;
use std::path::Path;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng as _;
use rand::rngs::StdRng;

use groupcmp::generate::{assign_groups, perturb, relabel};
use groupcmp::loader::CsvLoader;
use groupcmp_core::{IdentifierGroupMap, compare, invert};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const SIZES: &[usize] = &[1_000, 10_000, 100_000];

fn groups_for(rows: usize) -> usize {
    (rows / 50).max(2)
}

fn to_map(labels: &[usize]) -> IdentifierGroupMap {
    IdentifierGroupMap::try_from_pairs(
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| (format!("ID_{i}"), label.to_string())),
    )
    .expect("generated ids are unique")
}

/// A base map and a relabeled candidate; `moves` rows are moved afterwards.
fn pair(rows: usize, moves: usize) -> (IdentifierGroupMap, IdentifierGroupMap) {
    let mut rng = StdRng::seed_from_u64(rows as u64);
    let groups = groups_for(rows);
    let base = assign_groups(rows, groups, &mut rng);
    let mut candidate = base.clone();
    relabel(&mut candidate, groups, &mut rng);
    perturb(&mut candidate, moves, &mut rng);
    (to_map(&base), to_map(&candidate))
}

// ---------------------------------------------------------------------------
// Benchmark: invert
// ---------------------------------------------------------------------------

fn bench_invert(c: &mut Criterion) {
    let mut group = c.benchmark_group("invert");
    for &n in SIZES {
        let (base, _) = pair(n, 0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("rows", n), &base, |b, map| {
            b.iter(|| invert(map));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: compare
// ---------------------------------------------------------------------------

fn bench_compare_equivalent(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare/equivalent");
    for &n in SIZES {
        let (base, candidate) = pair(n, 0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("rows", n), &n, |b, _| {
            b.iter(|| compare(&base, &candidate));
        });
    }
    group.finish();
}

/// Mismatches also build the report, so they are measured separately.
fn bench_compare_mismatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare/mismatch");
    for &n in SIZES {
        let (base, candidate) = pair(n, 10);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("rows", n), &n, |b, _| {
            b.iter(|| compare(&base, &candidate));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: CSV loading
// ---------------------------------------------------------------------------

fn bench_csv_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("load/csv");
    let loader = CsvLoader::new("IdentifierID", "GroupID");
    for &n in SIZES {
        let mut rng = StdRng::seed_from_u64(n as u64);
        let labels = assign_groups(n, groups_for(n), &mut rng);
        let mut text = String::from("IdentifierID,GroupID\n");
        for (i, label) in labels.iter().enumerate() {
            let _ = writeln!(text, "ID_{i},{label}");
        }

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", n), &text, |b, text| {
            b.iter(|| {
                loader
                    .read(text.as_bytes(), Path::new("bench.csv"))
                    .expect("valid csv")
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_invert,
    bench_compare_equivalent,
    bench_compare_mismatch,
    bench_csv_read,
);
criterion_main!(benches);
