//! Process execution behind a swappable runner.

use std::io;
use std::path::PathBuf;
use std::process::{self, ExitStatus};

use crate::invocation::Invocation;

/// Which of the caller's standard streams the child shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stdio {
    /// stdin, stdout and stderr are all inherited.
    Interactive,
    /// stdout and stderr are inherited; stdin is closed.
    OutputOnly,
}

/// Executes invocations to completion.
///
/// Implementors must not return before the child has exited.
pub trait ProcessRunner {
    /// Runs the invocation and returns its exit status.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or waited on.
    fn run(&self, invocation: &Invocation, stdio: Stdio) -> io::Result<ExitStatus>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, invocation: &Invocation, stdio: Stdio) -> io::Result<ExitStatus> {
        (**self).run(invocation, stdio)
    }
}

/// Runner that spawns real processes with `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, stdio: Stdio) -> io::Result<ExitStatus> {
        tracing::debug!(program = %invocation.program, args = ?invocation.args, ?stdio, "spawning");
        let mut cmd = invocation.to_command();
        let _ = cmd
            .stdout(process::Stdio::inherit())
            .stderr(process::Stdio::inherit());
        let _ = match stdio {
            Stdio::Interactive => cmd.stdin(process::Stdio::inherit()),
            Stdio::OutputOnly => cmd.stdin(process::Stdio::null()),
        };
        let mut child = cmd.spawn()?;
        let status = child.wait()?;
        tracing::debug!(program = %invocation.program, %status, "process exited");
        Ok(status)
    }
}

/// Resolves the runtime executable on `PATH`.
///
/// Returns `None` if it cannot be found.
#[must_use]
pub fn runtime_path(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}
