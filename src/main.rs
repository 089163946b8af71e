use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory as _, Parser, Subcommand};

use groupcmp::compare_cmd::{self, CompareArgs};
use groupcmp::config::GroupcmpConfig;
use groupcmp::error::ExitCodeError;
use groupcmp::generate::{self, GenerateArgs};
use groupcmp::telemetry;

/// Exit status for loader, config, and usage errors.
const ERROR_EXIT_CODE: u8 = 2;

/// Check whether two grouping files describe the same grouping
///
/// Grouping pipelines assign each identifier a group ID. Two runs can produce
/// the same groups under different IDs; groupcmp ignores the IDs and compares
/// the sets of identifiers that share one.
///
/// QUICK START:
///
///   groupcmp compare -b base.csv -c run2.csv -p IdentifierID GroupID
///   groupcmp compare -b base.txt -c run2.txt -p Class_id
///
/// EXIT CODES:
///
///   0  groupings match (the group ID mapping is printed)
///   1  groupings differ
///   2  an input or option could not be used
///
/// Defaults for property names, the CSV delimiter, the TXT layout, and the
/// output format can be set in groupcmp.toml.
#[derive(Parser)]
#[command(name = "groupcmp")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(
    after_help = "See 'groupcmp <command> --help' for more information on a specific command."
)]
struct Cli {
    /// Config file (default: ./groupcmp.toml when present)
    #[arg(long, global = true, env = "GROUPCMP_CONFIG")]
    config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the groupings in two files
    Compare(CompareArgs),

    /// Write synthetic CSV files to compare
    Generate(GenerateArgs),

    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(exit) = err.downcast_ref::<ExitCodeError>() {
                return ExitCode::from(exit.0);
            }
            eprintln!("error: {err:#}");
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compare(ref args) => {
            let config = GroupcmpConfig::resolve(cli.config.as_deref())?;
            compare_cmd::run(args, &config)
        }
        Commands::Generate(ref args) => generate::run(args),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "groupcmp",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
