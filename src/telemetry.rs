//! Telemetry initialization.
//!
//! Controlled by `GROUPCMP_LOG`:
//! - unset → no-op (tracing disabled, zero overhead)
//! - `"stderr"` or `"json"` → JSON events to stderr
//! - `"pretty"` → human-readable events to stderr
//!
//! `RUST_LOG` filters events in either mode (default `info`). The `--verbose`
//! flag forces the pretty layer at `debug` regardless of `GROUPCMP_LOG`.
//! Events never go to stdout, which carries the comparison result.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Environment variable selecting the log sink.
pub const LOG_ENV: &str = "GROUPCMP_LOG";

/// Where tracing events go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogMode {
    /// No subscriber is installed.
    Off,
    /// JSON lines on stderr.
    Json,
    /// Human-readable lines on stderr.
    Pretty,
}

impl LogMode {
    /// Pick the mode from the `GROUPCMP_LOG` value and the verbose flag.
    #[must_use]
    pub fn select(env_value: Option<&str>, verbose: bool) -> Self {
        if verbose {
            return Self::Pretty;
        }
        match env_value.map(str::trim) {
            None | Some("") => Self::Off,
            Some(v) if v.eq_ignore_ascii_case("pretty") => Self::Pretty,
            Some(v) if v.eq_ignore_ascii_case("stderr") || v.eq_ignore_ascii_case("json") => {
                Self::Json
            }
            Some(other) => {
                eprintln!("warning: unknown {LOG_ENV} value '{other}', logging disabled");
                Self::Off
            }
        }
    }
}

/// Initialize telemetry from the environment and the verbose flag.
pub fn init(verbose: bool) {
    let env_value = std::env::var(LOG_ENV).ok();
    let mode = LogMode::select(env_value.as_deref(), verbose);
    let default_level = if verbose { "debug" } else { "info" };

    match mode {
        LogMode::Off => {}
        LogMode::Json => init_json(default_level),
        LogMode::Pretty => init_pretty(default_level),
    }
}

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// JSON events to stderr via tracing-subscriber's JSON formatter.
fn init_json(default_level: &str) {
    let result = tracing_subscriber::registry()
        .with(filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE),
        )
        .try_init();
    if let Err(e) = result {
        eprintln!("warning: failed to init telemetry: {e}");
    }
}

fn init_pretty(default_level: &str) {
    let result = tracing_subscriber::registry()
        .with(filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
    if let Err(e) = result {
        eprintln!("warning: failed to init telemetry: {e}");
    }
}
