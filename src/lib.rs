//! groupcmp library crate: loaders, configuration, and command drivers.
//!
//! The primary interface is the `groupcmp` binary. This lib.rs exposes the
//! modules behind it so that integration tests and benches can load files and
//! run comparisons without going through the CLI. The comparison itself lives
//! in `groupcmp-core`.

pub mod compare_cmd;
pub mod config;
pub mod error;
pub mod format;
pub mod generate;
pub mod loader;
pub mod telemetry;
