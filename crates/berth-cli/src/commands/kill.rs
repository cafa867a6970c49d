//! `berth kill` — Kill an applet's container.

use berth_common::config::LauncherConfig;
use berth_repo::Applet;
use berth_runtime::{KillOutcome, Launcher, ProcessRunner};
use clap::Args;

/// Arguments for the `kill` command.
#[derive(Args, Debug)]
pub struct KillArgs {
    /// Applet key in the repository file.
    pub applet: String,
}

/// Executes the `kill` command.
///
/// A failed kill is reported but is not an error.
///
/// # Errors
///
/// Returns an error if the repository cannot be loaded, the applet is
/// unknown, or it has no container name.
pub fn execute(args: KillArgs, config: LauncherConfig) -> anyhow::Result<()> {
    let repo = super::load_repository(&config)?;
    let applet = repo.get(&args.applet)?;
    let outcome = kill_applet(&Launcher::new(config), &args.applet, applet)?;
    tracing::debug!(applet = %args.applet, ?outcome, "kill finished");
    Ok(())
}

fn kill_applet<R: ProcessRunner>(
    launcher: &Launcher<R>,
    key: &str,
    applet: &Applet,
) -> anyhow::Result<KillOutcome> {
    if applet.name.is_empty() {
        anyhow::bail!("applet {key} has no container name to kill");
    }
    let outcome = launcher.pre_exec(applet);
    if outcome == KillOutcome::Killed {
        tracing::info!(applet = %applet.name, "container killed");
    }
    Ok(outcome)
}
