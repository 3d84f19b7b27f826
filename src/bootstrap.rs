//! One-time setup of the `gir` checkout: submodule initialization, an
//! optional update, and a release build.
//!
//! Only used when the generator path is left at its default; a custom
//! `--gir-path` is expected to point at an already-built binary.

use crate::confirm::ConfirmationSource;
use anyhow::{ensure, Context, Result};
use std::path::Path;
use std::process::Command;

/// Run a collaborator command to completion, inheriting our streams.
/// Non-zero exit fails the whole run.
pub fn run(description: &str, command: &mut Command) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("failed to run {description}"))?;
    ensure!(status.success(), "{description} exited with {status}");
    Ok(())
}

/// Make sure the `gir` submodule in `gir_dir` is checked out and its
/// release binary at `gir_path` exists, rebuilding when it went stale.
pub fn ensure_generator(
    gir_dir: &Path,
    gir_path: &Path,
    confirm: &mut dyn ConfirmationSource,
) -> Result<()> {
    let mut rebuild = false;

    if !gir_dir.join("src").is_dir() {
        rebuild = true;
        println!("=> Initializing gir submodule...");
        run(
            "git submodule update",
            Command::new("git").args(["submodule", "update", "--init"]).arg(gir_dir),
        )?;
        println!("<= Done!");
    }

    if confirm.confirm("Do you want to update the gir submodule?")? {
        rebuild = true;
        println!("=> Updating gir submodule...");
        run(
            "git reset",
            Command::new("git")
                .args(["reset", "--hard", "HEAD"])
                .current_dir(gir_dir),
        )?;
        run(
            "git pull",
            Command::new("git")
                .args(["pull", "-f", "origin", "master"])
                .current_dir(gir_dir),
        )?;
        println!("<= Done!");
    }

    if rebuild || !gir_path.is_file() {
        println!("=> Building gir...");
        run(
            "cargo build",
            Command::new("cargo")
                .args(["build", "--release"])
                .current_dir(gir_dir),
        )?;
        println!("<= Done!");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_succeeds_on_zero_exit() {
        run("true", &mut Command::new("true")).unwrap();
    }

    #[test]
    fn run_fails_on_nonzero_exit() {
        let err = run("false", &mut Command::new("false")).unwrap_err();
        assert!(err.to_string().contains("false"), "got: {err}");
    }

    #[test]
    fn run_fails_on_missing_program() {
        let err = run("ghost", &mut Command::new("/nonexistent/ghost")).unwrap_err();
        assert!(err.to_string().contains("failed to run ghost"), "got: {err}");
    }
}
