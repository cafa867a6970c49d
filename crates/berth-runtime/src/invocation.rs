//! Compilation of applets into container runtime argument vectors.
//!
//! The run vector is assembled in a fixed order so that the same applet
//! and context always produce the same invocation:
//!
//! `run`, `--name`, `--workdir`, `--entrypoint`, `--restart`, `--network`,
//! `--rm`, `--interactive`, `--privileged`, `--detach`, `--tty`, forwarded
//! host variables, `-e`, `-v`, `-p`, `--env-file`, `--link`, `image:tag`,
//! then the command.

use std::fmt;

use berth_common::error::Result;
use berth_common::types::EnvFilterPolicy;
use berth_repo::Applet;

use crate::context::RuntimeContext;
use crate::env_filter::EnvFilter;
use crate::expand::expand;

/// A fully-formed external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to launch.
    pub program: String,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
}

impl Invocation {
    /// Builds a [`std::process::Command`] for this invocation.
    ///
    /// Standard streams are left for the caller to configure.
    #[must_use]
    pub fn to_command(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(&self.program);
        let _ = cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Quotes a word for display so it can be pasted into a POSIX shell.
fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Argument vector that kills the applet's container.
///
/// The name is used as is; an empty name is the caller's concern.
#[must_use]
pub fn compile_kill_args(applet: &Applet) -> Vec<String> {
    vec!["kill".to_string(), applet.name.clone()]
}

/// Argument vector that runs the applet.
///
/// `extra`, when non-empty, replaces the applet's `command` entirely.
///
/// # Errors
///
/// Returns an error only when `all_envs` is set, the `env_filter` does not
/// compile, and `policy` is [`EnvFilterPolicy::Strict`].
pub fn compile_run_args(
    applet: &Applet,
    ctx: &RuntimeContext,
    extra: &[String],
    policy: EnvFilterPolicy,
) -> Result<Vec<String>> {
    let mut args = vec!["run".to_string()];

    push_option(&mut args, "--name", &applet.name);
    if !applet.work_dir.is_empty() {
        push_pair(&mut args, "--workdir", expand(&applet.work_dir, ctx));
    }
    push_option(&mut args, "--entrypoint", &applet.entrypoint);
    push_option(&mut args, "--restart", &applet.restart);
    push_option(&mut args, "--network", &applet.network);

    push_flag(&mut args, "--rm", applet.rm);
    push_flag(&mut args, "--interactive", applet.interactive);
    push_flag(&mut args, "--privileged", applet.privileged);
    push_flag(&mut args, "--detach", applet.detach);
    push_flag(&mut args, "--tty", applet.tty && ctx.terminal_attached());

    if applet.all_envs {
        let filter = EnvFilter::compile(applet, policy)?;
        for entry in ctx.entries().filter(|e| filter.matches(e)) {
            push_pair(&mut args, "-e", entry);
        }
    }
    for entry in &applet.env {
        push_pair(&mut args, "-e", expand(entry, ctx));
    }
    for volume in &applet.volumes {
        push_pair(&mut args, "-v", expand(volume, ctx));
    }
    for port in &applet.ports {
        push_pair(&mut args, "-p", port.clone());
    }
    for file in &applet.env_file {
        push_pair(&mut args, "--env-file", file.clone());
    }
    for link in &applet.links {
        push_pair(&mut args, "--link", link.clone());
    }

    args.push(applet.image_ref());

    if extra.is_empty() {
        args.extend(applet.command.iter().cloned());
    } else {
        args.extend(extra.iter().cloned());
    }

    Ok(args)
}

/// Invocation that kills the applet's container.
#[must_use]
pub fn kill_invocation(program: &str, applet: &Applet) -> Invocation {
    Invocation {
        program: program.to_string(),
        args: compile_kill_args(applet),
    }
}

/// Invocation that runs the applet.
///
/// # Errors
///
/// Propagates errors from [`compile_run_args`].
pub fn run_invocation(
    program: &str,
    applet: &Applet,
    ctx: &RuntimeContext,
    extra: &[String],
    policy: EnvFilterPolicy,
) -> Result<Invocation> {
    Ok(Invocation {
        program: program.to_string(),
        args: compile_run_args(applet, ctx, extra, policy)?,
    })
}

fn push_option(args: &mut Vec<String>, flag: &str, value: &str) {
    if !value.is_empty() {
        push_pair(args, flag, value.to_string());
    }
}

fn push_pair(args: &mut Vec<String>, flag: &str, value: String) {
    args.push(flag.to_string());
    args.push(value);
}

fn push_flag(args: &mut Vec<String>, flag: &str, enabled: bool) {
    if enabled {
        args.push(flag.to_string());
    }
}
