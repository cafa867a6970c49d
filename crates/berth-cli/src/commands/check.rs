//! `berth check` — Report where the container runtime resolves.

use berth_common::config::LauncherConfig;
use berth_runtime::runner::runtime_path;
use clap::Args;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {}

/// Executes the `check` command.
///
/// # Errors
///
/// Returns an error if the runtime executable is not on `PATH`.
pub fn execute(_args: CheckArgs, config: &LauncherConfig) -> anyhow::Result<()> {
    let Some(path) = runtime_path(&config.docker_exe) else {
        anyhow::bail!("container runtime '{}' not found on PATH", config.docker_exe);
    };
    println!("{} -> {}", config.docker_exe, path.display());
    println!("kill policy: {}", config.kill_policy);
    println!("env filter policy: {}", config.env_filter_policy);
    Ok(())
}
