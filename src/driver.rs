//! Eager dispatch and launch-order drain of generator processes.
//!
//! Every command is spawned as soon as it is built; nothing waits until the
//! whole batch is in flight. Draining then visits the processes strictly in
//! launch order, so the report reads the same no matter which process
//! finishes first. A process that finished early just sits with its output
//! buffered by the OS until its turn comes.

use crate::invoke::Invocation;
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// A generator process running in the background, not yet waited on.
#[derive(Debug)]
pub struct LaunchedProcess {
    pub description: String,
    child: Child,
}

/// Spawn an invocation without waiting for it. Both output streams are
/// piped so concurrent processes cannot garble each other's report.
pub fn spawn(program: &Path, invocation: Invocation) -> Result<LaunchedProcess> {
    let child = Command::new(program)
        .args(&invocation.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn `{}`", program.display()))?;
    Ok(LaunchedProcess {
        description: invocation.description,
        child,
    })
}

impl LaunchedProcess {
    /// Read the process to completion and wait for it to exit, returning
    /// its log (stderr) on success.
    ///
    /// The generator writes nothing to stdout; anything there means its
    /// reporting got interleaved or redirected and the run cannot be
    /// trusted, whatever the exit code says.
    pub fn drain(self) -> Result<String> {
        let output = self
            .child
            .wait_with_output()
            .context("failed to collect generator output")?;
        if !output.stdout.is_empty() {
            bail!(
                "generator wrote unexpected output to stdout: {}",
                String::from_utf8_lossy(&output.stdout).trim_end()
            );
        }
        if !output.status.success() {
            bail!(
                "generator process failed ({}):\n{}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }
        Ok(String::from_utf8_lossy(&output.stderr).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn shell(script: &str) -> Invocation {
        Invocation {
            description: format!("running `{script}`"),
            args: vec![OsString::from("-c"), script.into()],
        }
    }

    #[test]
    fn drain_returns_the_log_channel() {
        let process = spawn(Path::new("sh"), shell("echo regenerated >&2")).unwrap();
        assert_eq!(process.drain().unwrap(), "regenerated\n");
    }

    #[test]
    fn empty_output_is_fine() {
        let process = spawn(Path::new("sh"), shell("exit 0")).unwrap();
        assert_eq!(process.drain().unwrap(), "");
    }

    #[test]
    fn stdout_is_a_hard_error_even_on_success() {
        let process = spawn(Path::new("sh"), shell("echo oops; exit 0")).unwrap();
        let err = process.drain().unwrap_err().to_string();
        assert!(err.contains("stdout"), "got: {err}");
        assert!(err.contains("oops"), "got: {err}");
    }

    #[test]
    fn nonzero_exit_surfaces_the_log() {
        let process = spawn(Path::new("sh"), shell("echo broken >&2; exit 3")).unwrap();
        let err = process.drain().unwrap_err().to_string();
        assert!(err.contains("broken"), "got: {err}");
    }

    #[test]
    fn spawn_failure_names_the_program() {
        let err = spawn(Path::new("/nonexistent/generator"), shell("true")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/generator"));
    }

    #[test]
    fn processes_run_while_unattended() {
        // Both children run concurrently in the background; draining the
        // first does not serialize the second behind it.
        let started = std::time::Instant::now();
        let slow = spawn(Path::new("sh"), shell("sleep 0.4; echo slow >&2")).unwrap();
        let fast = spawn(Path::new("sh"), shell("sleep 0.4; echo fast >&2")).unwrap();
        assert_eq!(slow.drain().unwrap(), "slow\n");
        assert_eq!(fast.drain().unwrap(), "fast\n");
        assert!(
            started.elapsed() < std::time::Duration::from_millis(700),
            "children did not run concurrently: {:?}",
            started.elapsed()
        );
    }
}
