//! `berth run` — Kill any stale container, then run an applet.

use berth_common::config::LauncherConfig;
use berth_repo::Applet;
use berth_runtime::{Launcher, ProcessRunner};
use clap::Args;

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Applet key in the repository file.
    pub applet: String,

    /// Arguments replacing the applet's command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

/// Executes the `run` command.
///
/// The process exits with the container's exit code when it fails.
///
/// # Errors
///
/// Returns an error if the repository cannot be loaded, the applet is
/// unknown, or the runtime cannot be launched.
pub fn execute(args: RunArgs, config: LauncherConfig) -> anyhow::Result<()> {
    let repo = super::load_repository(&config)?;
    let applet = repo.get(&args.applet)?;
    let launcher = Launcher::new(config);

    if let Some(code) = run_applet(&launcher, applet, &args.extra)? {
        std::process::exit(code);
    }
    Ok(())
}

/// Launches the applet and returns the exit code to leave with when the
/// container exited unsuccessfully.
fn run_applet<R: ProcessRunner>(
    launcher: &Launcher<R>,
    applet: &Applet,
    extra: &[String],
) -> anyhow::Result<Option<i32>> {
    match launcher.launch(applet, extra) {
        Ok(outcome) => {
            tracing::debug!(applet = %applet.name, ?outcome, "applet finished");
            Ok(None)
        }
        Err(e) => match e.exit_code() {
            Some(code) => {
                tracing::error!(applet = %applet.name, "{e}");
                Ok(Some(code))
            }
            None => Err(e.into()),
        },
    }
}
