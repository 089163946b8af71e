use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Result, bail};
use groupcmp_core::{Comparison, Correspondence, Identifier, MismatchReport, Partition};
use serde::{Deserialize, Serialize};

/// Longest list of identifiers or groups printed in text mode.
const MAX_LISTED: usize = 10;

/// Output format for comparison results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable verdict and mapping
    #[default]
    Text,
    /// JSON - machine-parseable
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => bail!("Invalid format '{s}'. Use: text or json"),
        }
    }
}

/// Everything reported about one comparison.
#[derive(Debug, Serialize)]
pub struct ComparisonEnvelope<'a> {
    pub equivalent: bool,
    pub base_file: String,
    pub compare_file: String,
    pub base_groups: usize,
    pub compare_groups: usize,
    pub base_identifiers: usize,
    pub compare_identifiers: usize,
    pub correspondence: Option<&'a Correspondence>,
    pub mismatch: Option<&'a MismatchReport>,
}

impl<'a> ComparisonEnvelope<'a> {
    #[must_use]
    pub fn new(
        base_file: &Path,
        compare_file: &Path,
        base: &Partition,
        candidate: &Partition,
        comparison: &'a Comparison,
    ) -> Self {
        Self {
            equivalent: comparison.is_equivalent(),
            base_file: base_file.display().to_string(),
            compare_file: compare_file.display().to_string(),
            base_groups: base.len(),
            compare_groups: candidate.len(),
            base_identifiers: base.identifier_count(),
            compare_identifiers: candidate.identifier_count(),
            correspondence: comparison.correspondence(),
            mismatch: comparison.mismatch(),
        }
    }
}

impl OutputFormat {
    /// Render a comparison in this format (always newline-terminated).
    pub fn render(self, envelope: &ComparisonEnvelope<'_>) -> Result<String> {
        match self {
            Self::Json => {
                let mut out = serde_json::to_string_pretty(envelope)
                    .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
                out.push('\n');
                Ok(out)
            }
            Self::Text => Ok(render_text(envelope)),
        }
    }
}

fn render_text(env: &ComparisonEnvelope<'_>) -> String {
    let mut out = String::new();
    if let Some(correspondence) = env.correspondence {
        let _ = writeln!(out, "Success: Groupings match!");
        let _ = writeln!(out, "Group ID Mapping: {correspondence}");
        return out;
    }

    let _ = writeln!(out, "Failure: Groupings do not match!");
    let _ = writeln!(
        out,
        "  base:    {} groups, {} identifiers ({})",
        env.base_groups, env.base_identifiers, env.base_file
    );
    let _ = writeln!(
        out,
        "  compare: {} groups, {} identifiers ({})",
        env.compare_groups, env.compare_identifiers, env.compare_file
    );

    let Some(report) = env.mismatch else {
        return out;
    };
    if !report.only_in_base.is_empty() {
        let _ = writeln!(
            out,
            "  only in base ({}): {}",
            report.only_in_base.len(),
            list(&report.only_in_base)
        );
    }
    if !report.only_in_candidate.is_empty() {
        let _ = writeln!(
            out,
            "  only in compare ({}): {}",
            report.only_in_candidate.len(),
            list(&report.only_in_candidate)
        );
    }
    for (side, groups) in [
        ("base", &report.unmatched_base),
        ("compare", &report.unmatched_candidate),
    ] {
        if groups.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  unmatched {side} groups ({}):", groups.len());
        for (label, members) in groups.iter().take(MAX_LISTED) {
            let _ = writeln!(out, "    {label}: {{{}}}", list(members));
        }
        if groups.len() > MAX_LISTED {
            let _ = writeln!(out, "    ... and {} more", groups.len() - MAX_LISTED);
        }
    }
    out
}

fn list(ids: &[Identifier]) -> String {
    let mut shown: Vec<&str> = ids.iter().take(MAX_LISTED).map(Identifier::as_str).collect();
    if ids.len() > MAX_LISTED {
        shown.push("...");
    }
    shown.join(", ")
}
