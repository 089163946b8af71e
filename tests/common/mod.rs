//! Shared test helpers for groupcmp integration tests.
//!
//! All tests use temp directories. Fixture files are written fresh for every
//! test and `groupcmp` runs with that directory as its working directory, so
//! no stray `groupcmp.toml` is picked up.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Base CSV: groups 5, 2, 3, 4 over letters.
pub const LETTERS_BASE: &str = "\
IdentifierID,GroupID
A,5
B,2
C,3
D,3
G,2
K,5
L,4
M,2
";

/// `LETTERS_BASE` with 5→X, 2→Y, 3→Z, 4→W and shuffled rows.
pub const LETTERS_RELABELED: &str = "\
IdentifierID,GroupID
M,Y
L,W
K,X
A,X
G,Y
B,Y
D,Z
C,Z
";

/// Base TXT: {Pattern1,Pattern3}→1, {Pattern2,Pattern6}→2, {Pattern4,Pattern5}→3.
pub const PATTERNS_BASE: &str = "\
Pattern1
Class_id: 1
Score: 0.93
Pattern2
Class_id: 2
Pattern3
Class_id: 1
Pattern4
Class_id: 3
Pattern5
Class_id: 3
Pattern6
Class_id: 2
";

/// `PATTERNS_BASE` with labels 10, 36, 7.
pub const PATTERNS_RELABELED: &str = "\
Pattern6
Class_id: 36
Pattern5
Class_id: 7
Pattern4
Class_id: 7
Pattern3
Class_id: 10
Score: 0.41
Pattern2
Class_id: 36
Pattern1
Class_id: 10
";

/// Create a temp dir holding the given `(name, contents)` files.
pub fn fixture_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    for (name, contents) in files {
        write_file(dir.path(), name, contents);
    }
    dir
}

/// Write `contents` to `dir/name`. Returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    path
}

/// Run groupcmp in `dir` and return the raw output.
pub fn groupcmp_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_groupcmp"))
        .args(args)
        .current_dir(dir)
        .env_remove("GROUPCMP_CONFIG")
        .env_remove("GROUPCMP_LOG")
        .output()
        .expect("failed to execute groupcmp")
}

/// Run groupcmp and assert it exits 0. Returns stdout as string.
pub fn groupcmp_ok(dir: &Path, args: &[&str]) -> String {
    let out = groupcmp_in(dir, args);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "groupcmp {} failed:\nstdout: {stdout}\nstderr: {stderr}",
        args.join(" "),
    );
    stdout.to_string()
}

/// Run groupcmp and assert it exits with `code`. Returns the output.
pub fn groupcmp_exits(dir: &Path, args: &[&str], code: i32) -> Output {
    let out = groupcmp_in(dir, args);
    assert_eq!(
        out.status.code(),
        Some(code),
        "groupcmp {}:\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr),
    );
    out
}

/// Run groupcmp and assert it reports a mismatch (exit 1). Returns stdout.
pub fn groupcmp_mismatch(dir: &Path, args: &[&str]) -> String {
    let out = groupcmp_exits(dir, args, 1);
    String::from_utf8_lossy(&out.stdout).to_string()
}

/// Run groupcmp and assert it fails with an error (exit 2). Returns stderr.
pub fn groupcmp_fails(dir: &Path, args: &[&str]) -> String {
    let out = groupcmp_exits(dir, args, 2);
    String::from_utf8_lossy(&out.stderr).to_string()
}
