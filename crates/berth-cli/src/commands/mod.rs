//! CLI command definitions and dispatch.

pub mod check;
pub mod kill;
pub mod list;
pub mod run;
pub mod show;

use std::path::PathBuf;

use berth_common::config::LauncherConfig;
use berth_common::constants::{
    DEFAULT_DOCKER_EXE, DEFAULT_REPO_FILE, DOCKER_ENV_VAR, REPO_FILE_ENV_VAR,
};
use berth_common::types::{EnvFilterPolicy, KillPolicy};
use berth_repo::{AppletRepository, validator};
use clap::{Parser, Subcommand};

/// berth — declarative launcher for containerized applets.
#[derive(Parser, Debug)]
#[command(name = "berth", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to the applet repository file.
    #[arg(short, long, global = true, env = REPO_FILE_ENV_VAR, default_value = DEFAULT_REPO_FILE)]
    pub file: PathBuf,

    /// Container runtime executable.
    #[arg(long, global = true, env = DOCKER_ENV_VAR, default_value = DEFAULT_DOCKER_EXE)]
    pub docker: String,

    /// When to kill a stale container before running: always, flagged, never.
    #[arg(long, global = true, default_value_t = KillPolicy::Always)]
    pub kill_policy: KillPolicy,

    /// How to treat an invalid env_filter: fail-open, strict.
    #[arg(long, global = true, default_value_t = EnvFilterPolicy::FailOpen)]
    pub env_filter_policy: EnvFilterPolicy,
}

impl Cli {
    /// Builds the launcher configuration from the global flags.
    fn config(&self) -> LauncherConfig {
        LauncherConfig {
            docker_exe: self.docker.clone(),
            repo_file: self.file.clone(),
            kill_policy: self.kill_policy,
            env_filter_policy: self.env_filter_policy,
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Kill any stale container, then run an applet.
    Run(run::RunArgs),
    /// Kill an applet's container.
    Kill(kill::KillArgs),
    /// Print the invocations for an applet without running them.
    Show(show::ShowArgs),
    /// List the applets in the repository.
    List(list::ListArgs),
    /// Report where the container runtime resolves.
    Check(check::CheckArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config();
    match cli.command {
        Command::Run(args) => run::execute(args, config),
        Command::Kill(args) => kill::execute(args, config),
        Command::Show(args) => show::execute(args, config),
        Command::List(args) => list::execute(args, &config),
        Command::Check(args) => check::execute(args, &config),
    }
}

/// Loads the repository named by the configuration and validates it.
fn load_repository(config: &LauncherConfig) -> anyhow::Result<AppletRepository> {
    let repo = AppletRepository::load(&config.repo_file)?;
    validator::validate(&repo, config.env_filter_policy)?;
    Ok(repo)
}
