use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Args;
use groupcmp_core::{compare_partitions, invert};

use crate::config::GroupcmpConfig;
use crate::error::ExitCodeError;
use crate::format::{ComparisonEnvelope, OutputFormat};
use crate::loader::{CsvLoader, FileType, GroupSource, Loader, TxtLayout, TxtLoader};

/// Exit status when the groupings differ.
pub const MISMATCH_EXIT_CODE: u8 = 1;

/// Compare the groupings of identifiers in two files
///
/// Group IDs are ignored: the files match when every group of identifiers in
/// one file has a group with exactly the same identifiers in the other. On a
/// match the group ID correspondence is printed and the exit code is 0; on a
/// mismatch the exit code is 1.
///
/// Examples:
///   groupcmp compare -b base.csv -c run2.csv -p IdentifierID GroupID
///   groupcmp compare -b base.txt -c run2.txt -p Class_id
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Base (golden) file
    #[arg(short = 'b', long = "base-file", visible_alias = "base")]
    pub base_file: PathBuf,

    /// File to compare against the base
    #[arg(short = 'c', long = "compare-file", visible_alias = "candidate")]
    pub compare_file: PathBuf,

    /// File type (default: inferred from the base file's extension)
    #[arg(short = 't', long = "type", value_enum)]
    pub file_type: Option<FileType>,

    /// Property names: <IDENTIFIER_COLUMN> <GROUP_COLUMN> for CSV, <GROUP_PROPERTY> for TXT
    #[arg(short = 'p', long = "property-names", num_args = 1.., value_name = "NAME")]
    pub property_names: Vec<String>,

    /// CSV field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// TXT record layout
    #[arg(long, value_enum)]
    pub layout: Option<TxtLayout>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    pub json: bool,
}

pub fn run(args: &CompareArgs, config: &GroupcmpConfig) -> Result<()> {
    let file_type = resolve_file_type(args.file_type, &args.base_file)?;
    check_extensions(file_type, &args.base_file, &args.compare_file)?;
    let loader = build_loader(file_type, args, config)?;

    let base = loader.load(&args.base_file)?;
    let candidate = loader.load(&args.compare_file)?;

    let base = invert(&base);
    let candidate = invert(&candidate);
    let comparison = compare_partitions(&base, &candidate);

    tracing::info!(
        equivalent = comparison.is_equivalent(),
        base_groups = base.len(),
        compare_groups = candidate.len(),
        "comparison finished"
    );

    let format = if args.json {
        OutputFormat::Json
    } else {
        args.format.unwrap_or(config.output.format)
    };
    let envelope = ComparisonEnvelope::new(
        &args.base_file,
        &args.compare_file,
        &base,
        &candidate,
        &comparison,
    );
    print!("{}", format.render(&envelope)?);

    if !comparison.is_equivalent() {
        return Err(ExitCodeError(MISMATCH_EXIT_CODE).into());
    }
    Ok(())
}

/// Use the explicit type, or infer it from the base file's extension.
pub fn resolve_file_type(explicit: Option<FileType>, base_file: &Path) -> Result<FileType> {
    if let Some(file_type) = explicit {
        return Ok(file_type);
    }
    match FileType::from_path(base_file) {
        Some(file_type) => Ok(file_type),
        None => bail!(
            "Cannot tell the file type of '{}'.\n  \
             To fix: pass --type csv or --type txt, or use a .csv/.txt extension.",
            base_file.display()
        ),
    }
}

/// Both files must carry the extension of the chosen type.
pub fn check_extensions(file_type: FileType, base_file: &Path, compare_file: &Path) -> Result<()> {
    if !file_type.matches(base_file) || !file_type.matches(compare_file) {
        bail!(
            "The file type is specified as {}, but one or both input files do not have a .{} extension.",
            file_type.extension().to_uppercase(),
            file_type.extension()
        );
    }
    Ok(())
}

/// Build the loader from flags, falling back to the config file.
pub fn build_loader(
    file_type: FileType,
    args: &CompareArgs,
    config: &GroupcmpConfig,
) -> Result<Loader> {
    let names = &args.property_names;
    match file_type {
        FileType::Csv => {
            let (identifier_column, group_column) = match names.as_slice() {
                [id, group] => (id.clone(), group.clone()),
                [] => match (&config.csv.identifier_column, &config.csv.group_column) {
                    (Some(id), Some(group)) => (id.clone(), group.clone()),
                    _ => bail!(
                        "CSV files need an identifier column and a group column.\n  \
                         To fix: pass --property-names <IDENTIFIER_COLUMN> <GROUP_COLUMN>,\n  \
                         or set csv.identifier_column and csv.group_column in groupcmp.toml."
                    ),
                },
                _ => bail!(
                    "CSV files should have exactly 2 property names (identifier and group property), got {}.",
                    names.len()
                ),
            };
            let delimiter = args.delimiter.unwrap_or(config.csv.delimiter);
            let Ok(delimiter) = u8::try_from(delimiter) else {
                bail!("The CSV delimiter must be a single ASCII character, got '{delimiter}'.");
            };
            if !delimiter.is_ascii() {
                bail!(
                    "The CSV delimiter must be a single ASCII character, got '{}'.",
                    char::from(delimiter)
                );
            }
            let mut loader =
                CsvLoader::new(identifier_column, group_column).with_delimiter(delimiter);
            if let Some(null_values) = &config.csv.null_values {
                loader = loader.with_null_values(null_values.clone());
            }
            Ok(Loader::Csv(loader))
        }
        FileType::Txt => {
            let group_property = match names.as_slice() {
                [property] => property.clone(),
                [] => match &config.txt.group_property {
                    Some(property) => property.clone(),
                    None => bail!(
                        "TXT files need a group property.\n  \
                         To fix: pass --property-names <GROUP_PROPERTY>,\n  \
                         or set txt.group_property in groupcmp.toml."
                    ),
                },
                _ => bail!(
                    "TXT files should have exactly 1 property name (the group property), got {}.",
                    names.len()
                ),
            };
            let layout = args.layout.unwrap_or(config.txt.layout);
            Ok(Loader::Txt(TxtLoader::new(group_property).with_layout(layout)))
        }
    }
}
