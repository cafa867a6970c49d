//! `berth show` — Print the invocations for an applet without running them.

use berth_common::config::LauncherConfig;
use berth_common::error::Result;
use berth_repo::Applet;
use berth_runtime::{Invocation, Launcher, ProcessRunner, RuntimeContext};
use clap::Args;

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Applet key in the repository file.
    pub applet: String,

    /// Print argument vectors as JSON.
    #[arg(long)]
    pub json: bool,

    /// Arguments replacing the applet's command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

/// The invocations `berth run` would perform, in order.
#[derive(Debug)]
struct Plan {
    kill: Option<Invocation>,
    run: Invocation,
}

/// Executes the `show` command.
///
/// Compiles against the current environment and terminal, exactly as
/// `berth run` would at this moment.
///
/// # Errors
///
/// Returns an error if the repository cannot be loaded, the applet is
/// unknown, or its env filter is rejected.
pub fn execute(args: ShowArgs, config: LauncherConfig) -> anyhow::Result<()> {
    let repo = super::load_repository(&config)?;
    let applet = repo.get(&args.applet)?;
    let launcher = Launcher::new(config);
    let plan = plan(&launcher, applet, &RuntimeContext::capture(), &args.extra)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&render_json(&plan))?);
    } else {
        print!("{}", render_text(&plan));
    }
    Ok(())
}

fn plan<R: ProcessRunner>(
    launcher: &Launcher<R>,
    applet: &Applet,
    ctx: &RuntimeContext,
    extra: &[String],
) -> Result<Plan> {
    let kill = launcher
        .should_pre_exec(applet)
        .then(|| launcher.kill_invocation(applet));
    let run = launcher.run_invocation(applet, ctx, extra)?;
    Ok(Plan { kill, run })
}

/// `{"kill": [..] | null, "run": [..]}` with the program first in each vector.
fn render_json(plan: &Plan) -> serde_json::Value {
    serde_json::json!({
        "kill": plan.kill.as_ref().map(argv),
        "run": argv(&plan.run),
    })
}

/// One shell-quoted command line per invocation.
fn render_text(plan: &Plan) -> String {
    let mut out = String::new();
    if let Some(kill) = &plan.kill {
        out.push_str(&format!("{kill}\n"));
    }
    out.push_str(&format!("{}\n", plan.run));
    out
}

fn argv(inv: &Invocation) -> Vec<&str> {
    std::iter::once(inv.program.as_str())
        .chain(inv.args.iter().map(String::as_str))
        .collect()
}
