//! `groupcmp generate`: synthetic CSV fixtures.
//!
//! Writes a base file with `rows` identifiers (`ID_0`, `ID_1`, ...) spread
//! over `groups` group IDs, and optionally a candidate file holding the same
//! partition under shuffled row order, a random relabeling, and/or a number
//! of identifiers moved into another group.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::Args;
use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;
use rand::{Rng, SeedableRng as _};

/// Generate CSV files for exercising `groupcmp compare`
///
/// Examples:
///   groupcmp generate --rows 1000 --groups 20 --out base.csv
///   groupcmp generate --rows 1000 --groups 20 --out base.csv --candidate cand.csv --relabel
///   groupcmp generate --rows 1000 --groups 20 --out base.csv --candidate cand.csv --perturb 3 --seed 7
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of identifiers
    #[arg(long, default_value_t = 100)]
    pub rows: usize,

    /// Number of distinct group IDs (every group gets at least one identifier)
    #[arg(long, default_value_t = 5)]
    pub groups: usize,

    /// Base file to write
    #[arg(short = 'o', long)]
    pub out: PathBuf,

    /// Candidate file to write alongside the base
    #[arg(long)]
    pub candidate: Option<PathBuf>,

    /// Give the candidate's groups a random bijective relabeling
    #[arg(long)]
    pub relabel: bool,

    /// Move this many identifiers to another group in the candidate
    #[arg(long, default_value_t = 0)]
    pub perturb: usize,

    /// RNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Identifier column header
    #[arg(long, default_value = "IdentifierID")]
    pub identifier_column: String,

    /// Group column header
    #[arg(long, default_value = "GroupID")]
    pub group_column: String,
}

impl GenerateArgs {
    fn validate(&self) -> Result<()> {
        if self.groups == 0 {
            bail!("--groups must be at least 1.");
        }
        if self.groups > self.rows {
            bail!(
                "--groups ({}) cannot exceed --rows ({}): every group needs an identifier.",
                self.groups,
                self.rows
            );
        }
        if self.candidate.is_none() && (self.relabel || self.perturb > 0) {
            bail!(
                "--relabel and --perturb change the candidate file.\n  \
                 To fix: add --candidate <PATH>."
            );
        }
        if self.perturb > 0 && self.groups < 2 {
            bail!("--perturb needs at least 2 groups to move identifiers between.");
        }
        if self.perturb > self.rows {
            bail!(
                "--perturb ({}) cannot exceed --rows ({}).",
                self.perturb,
                self.rows
            );
        }
        Ok(())
    }
}

pub fn run(args: &GenerateArgs) -> Result<()> {
    args.validate()?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let base = assign_groups(args.rows, args.groups, &mut rng);
    let order: Vec<usize> = (0..args.rows).collect();
    write_csv(&args.out, args, &base, &order)?;
    tracing::info!(path = %args.out.display(), rows = args.rows, groups = args.groups, "wrote base");

    let Some(candidate_path) = &args.candidate else {
        println!("Wrote {}", args.out.display());
        return Ok(());
    };

    let mut candidate = base.clone();
    if args.relabel {
        relabel(&mut candidate, args.groups, &mut rng);
    }
    let moved = perturb(&mut candidate, args.perturb, &mut rng);
    let mut order = order;
    order.shuffle(&mut rng);
    write_csv(candidate_path, args, &candidate, &order)?;
    tracing::info!(
        path = %candidate_path.display(),
        relabel = args.relabel,
        moved,
        "wrote candidate"
    );

    println!(
        "Wrote {} and {}",
        args.out.display(),
        candidate_path.display()
    );
    Ok(())
}

/// Group index per row. The first `groups` rows seed one group each, then the
/// whole assignment is shuffled.
pub fn assign_groups<R: Rng>(rows: usize, groups: usize, rng: &mut R) -> Vec<usize> {
    let mut labels: Vec<usize> = (0..rows)
        .map(|i| if i < groups { i } else { rng.random_range(0..groups) })
        .collect();
    labels.shuffle(rng);
    labels
}

/// Apply a random permutation of `0..groups` to every label.
pub fn relabel<R: Rng>(labels: &mut [usize], groups: usize, rng: &mut R) {
    let mut permutation: Vec<usize> = (0..groups).collect();
    permutation.shuffle(rng);
    for label in labels.iter_mut() {
        *label = permutation[*label];
    }
}

/// Move up to `count` distinct rows into a different, already populated
/// group. Returns how many rows moved.
///
/// A single move always changes the partition; several moves can in rare
/// cases land back on an equivalent one.
pub fn perturb<R: Rng>(labels: &mut [usize], count: usize, rng: &mut R) -> usize {
    let mut rows: Vec<usize> = (0..labels.len()).collect();
    rows.shuffle(rng);

    let mut moved = 0;
    for &row in rows.iter().take(count) {
        let mut targets: Vec<usize> = labels
            .iter()
            .copied()
            .filter(|&label| label != labels[row])
            .collect();
        targets.sort_unstable();
        targets.dedup();
        if targets.is_empty() {
            tracing::warn!(row, "no other group to move identifier into");
            continue;
        }
        labels[row] = targets[rng.random_range(0..targets.len())];
        moved += 1;
    }
    moved
}

fn write_csv(path: &Path, args: &GenerateArgs, labels: &[usize], order: &[usize]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer
        .write_record([args.identifier_column.as_str(), args.group_column.as_str()])
        .with_context(|| format!("failed to write {}", path.display()))?;
    for &row in order {
        writer
            .write_record([format!("ID_{row}"), labels[row].to_string()])
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
