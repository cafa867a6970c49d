//! Kill-then-run orchestration for a single applet.

use berth_common::config::LauncherConfig;
use berth_common::error::{BerthError, Result};
use berth_repo::Applet;

use crate::context::RuntimeContext;
use crate::invocation::{self, Invocation};
use crate::runner::{ProcessRunner, Stdio, SystemRunner};

/// Result of the best-effort stale-container kill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillOutcome {
    /// The kill command ran and succeeded.
    Killed,
    /// The kill command could not be launched or exited unsuccessfully;
    /// carries the cause as reported on stderr.
    Failed(String),
    /// The kill policy, or an empty applet name, skipped the kill.
    Skipped,
}

/// Launches applets through a [`ProcessRunner`].
///
/// Every call blocks until the child exits. A fresh [`RuntimeContext`] is
/// captured per call, so terminal detection reflects the current stdin.
#[derive(Debug, Clone)]
pub struct Launcher<R = SystemRunner> {
    config: LauncherConfig,
    runner: R,
}

impl Launcher<SystemRunner> {
    /// Creates a launcher that spawns real processes.
    #[must_use]
    pub fn new(config: LauncherConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: ProcessRunner> Launcher<R> {
    /// Creates a launcher with a custom runner.
    pub fn with_runner(config: LauncherConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Returns the launcher configuration.
    pub const fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Returns the underlying runner.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Invocation that kills the applet's container.
    pub fn kill_invocation(&self, applet: &Applet) -> Invocation {
        invocation::kill_invocation(&self.config.docker_exe, applet)
    }

    /// Invocation that runs the applet in the given context.
    ///
    /// # Errors
    ///
    /// Returns an error if the `env_filter` is rejected by the configured
    /// policy.
    pub fn run_invocation(
        &self,
        applet: &Applet,
        ctx: &RuntimeContext,
        extra: &[String],
    ) -> Result<Invocation> {
        invocation::run_invocation(
            &self.config.docker_exe,
            applet,
            ctx,
            extra,
            self.config.env_filter_policy,
        )
    }

    /// Whether the kill policy calls for a kill before running.
    pub fn should_pre_exec(&self, applet: &Applet) -> bool {
        if !self.config.kill_policy.applies(applet.kill) {
            return false;
        }
        if applet.name.is_empty() {
            tracing::warn!(image = %applet.image_ref(), "applet has no name, skipping kill");
            return false;
        }
        true
    }

    /// Kills any running container with the applet's name.
    ///
    /// Never fails: a missing container is the usual case, so a failure is
    /// written to stderr as `error killing <name>: <cause>` and returned in
    /// the outcome. The child gets the caller's stdout and stderr but no
    /// stdin.
    pub fn pre_exec(&self, applet: &Applet) -> KillOutcome {
        let inv = self.kill_invocation(applet);
        tracing::debug!(applet = %applet.name, args = ?inv.args, "killing stale container");
        let cause = match self.runner.run(&inv, Stdio::OutputOnly) {
            Ok(status) if status.success() => return KillOutcome::Killed,
            Ok(status) => status.to_string(),
            Err(e) => e.to_string(),
        };
        #[allow(clippy::print_stderr)]
        {
            eprintln!("error killing {}: {cause}", applet.name);
        }
        tracing::debug!(applet = %applet.name, %cause, "kill failed");
        KillOutcome::Failed(cause)
    }

    /// Runs the applet in a freshly captured context.
    ///
    /// # Errors
    ///
    /// See [`Launcher::exec_in`].
    pub fn exec(&self, applet: &Applet, extra: &[String]) -> Result<()> {
        self.exec_in(applet, &RuntimeContext::capture(), extra)
    }

    /// Runs the applet with the caller's stdin, stdout and stderr attached,
    /// blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`BerthError::Launch`] if the runtime cannot be started,
    /// [`BerthError::Exit`] if it exits unsuccessfully, or
    /// [`BerthError::InvalidEnvFilter`] under the strict filter policy.
    pub fn exec_in(&self, applet: &Applet, ctx: &RuntimeContext, extra: &[String]) -> Result<()> {
        let inv = self.run_invocation(applet, ctx, extra)?;
        tracing::info!(
            applet = %applet.name,
            program = %inv.program,
            args = ?inv.args,
            "running applet"
        );
        let status = self
            .runner
            .run(&inv, Stdio::Interactive)
            .map_err(|e| BerthError::Launch {
                applet: applet.name.clone(),
                program: inv.program.clone(),
                source: e,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(BerthError::Exit {
                applet: applet.name.clone(),
                status,
            })
        }
    }

    /// Kills per the configured policy, then runs the applet.
    ///
    /// Returns what happened to the kill; the run result is the error.
    ///
    /// # Errors
    ///
    /// See [`Launcher::exec`].
    pub fn launch(&self, applet: &Applet, extra: &[String]) -> Result<KillOutcome> {
        let outcome = if self.should_pre_exec(applet) {
            self.pre_exec(applet)
        } else {
            KillOutcome::Skipped
        };
        self.exec(applet, extra)?;
        Ok(outcome)
    }
}
