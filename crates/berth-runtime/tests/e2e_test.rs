//! End-to-end tests for the berth launcher.
//!
//! These tests cover the full pipeline:
//! 1. Load an applet repository from disk
//! 2. Validate it under the configured env filter policy
//! 3. Compile kill and run invocations against an explicit context
//! 4. Execute through the real process runner

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::io::Write;

use berth_common::config::LauncherConfig;
use berth_common::error::BerthError;
use berth_common::types::{EnvFilterPolicy, KillPolicy};
use berth_repo::{AppletRepository, validator};
use berth_runtime::invocation::{compile_kill_args, compile_run_args};
use berth_runtime::{Launcher, RuntimeContext};

const REPO: &str = r#"
web:
  name: web
  image: nginx
  image_tag: "1.25"
  ports: ["8080:80"]
  interactive: false
  tty: false

shell:
  name: shell
  image: alpine
  work_dir: $HOME
  volumes:
    - ${HOME}/.ssh:/root/.ssh:ro
  environment:
    - GREETING=hi $USER
  env_file: [$HOME/.env]
  command: [sh, -l]

aws:
  name: aws
  image: amazon/aws-cli
  all_envs: true
  env_filter: "^AWS_"
  rm: false
  interactive: false
  tty: false
  dependencies: [web]

broken:
  name: broken
  all_envs: true
  env_filter: "(unclosed"
"#;

fn load_repo() -> (tempfile::NamedTempFile, AppletRepository) {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(REPO.as_bytes()).expect("write repo");
    let repo = AppletRepository::load(file.path()).expect("load repo");
    (file, repo)
}

fn ctx(tty: bool) -> RuntimeContext {
    RuntimeContext::new(
        [
            ("HOME", "/home/dev"),
            ("USER", "dev"),
            ("AWS_REGION", "eu-west-1"),
            ("PATH", "/usr/bin"),
            ("AWS_PROFILE", "ops"),
        ],
        tty,
    )
}

fn run_args(repo: &AppletRepository, key: &str, tty: bool, extra: &[&str]) -> Vec<String> {
    let extra: Vec<String> = extra.iter().map(|s| (*s).to_string()).collect();
    compile_run_args(repo.get(key).unwrap(), &ctx(tty), &extra, EnvFilterPolicy::FailOpen)
        .expect("compile")
}

// ── Compilation ──────────────────────────────────────────────────────

#[test]
fn pipeline_web_applet_compiles_exactly() {
    let (_file, repo) = load_repo();
    assert_eq!(
        run_args(&repo, "web", true, &[]),
        vec!["run", "--name", "web", "--rm", "-p", "8080:80", "nginx:1.25"]
    );
    assert_eq!(compile_kill_args(repo.get("web").unwrap()), vec!["kill", "web"]);
}

#[test]
fn pipeline_defaults_and_expansion() {
    let (_file, repo) = load_repo();
    assert_eq!(
        run_args(&repo, "shell", true, &[]),
        vec![
            "run",
            "--name",
            "shell",
            "--workdir",
            "/home/dev",
            "--rm",
            "--interactive",
            "--tty",
            "-e",
            "GREETING=hi dev",
            "-v",
            "/home/dev/.ssh:/root/.ssh:ro",
            "--env-file",
            "$HOME/.env",
            "alpine:latest",
            "sh",
            "-l",
        ]
    );
}

#[test]
fn pipeline_tty_dropped_without_terminal() {
    let (_file, repo) = load_repo();
    let args = run_args(&repo, "shell", false, &[]);
    assert!(!args.iter().any(|a| a == "--tty"));
    assert!(args.iter().any(|a| a == "--interactive"));
}

#[test]
fn pipeline_extra_args_override_command() {
    let (_file, repo) = load_repo();
    let args = run_args(&repo, "shell", false, &["echo", "ok"]);
    let image_pos = args.iter().position(|a| a == "alpine:latest").unwrap();
    assert_eq!(&args[image_pos + 1..], ["echo", "ok"]);
}

#[test]
fn pipeline_all_envs_forwards_filtered_host_variables() {
    let (_file, repo) = load_repo();
    assert_eq!(
        run_args(&repo, "aws", false, &["s3", "ls"]),
        vec![
            "run",
            "--name",
            "aws",
            "-e",
            "AWS_REGION=eu-west-1",
            "-e",
            "AWS_PROFILE=ops",
            "amazon/aws-cli:latest",
            "s3",
            "ls",
        ]
    );
    assert_eq!(repo.dependencies("aws").unwrap(), ["web".to_string()]);
}

// ── Validation ───────────────────────────────────────────────────────

#[test]
fn pipeline_strict_policy_rejects_broken_filter_at_load() {
    let (_file, repo) = load_repo();
    assert!(validator::validate(&repo, EnvFilterPolicy::FailOpen).is_ok());
    let err = validator::validate(&repo, EnvFilterPolicy::Strict).unwrap_err();
    assert!(matches!(err, BerthError::InvalidEnvFilter { ref applet, .. } if applet == "broken"));
}

#[test]
fn pipeline_fail_open_forwards_nothing_for_broken_filter() {
    let (_file, repo) = load_repo();
    let args = run_args(&repo, "broken", false, &[]);
    assert!(!args.iter().any(|a| a == "-e"));
}

// ── Execution ────────────────────────────────────────────────────────

#[cfg(unix)]
fn launcher_for(program: &str, kill_policy: KillPolicy) -> Launcher {
    Launcher::new(LauncherConfig {
        docker_exe: program.into(),
        kill_policy,
        ..LauncherConfig::default()
    })
}

#[cfg(unix)]
#[test]
fn pipeline_exec_succeeds_when_runtime_succeeds() {
    let (_file, repo) = load_repo();
    let launcher = launcher_for("true", KillPolicy::Always);
    let outcome = launcher.launch(repo.get("web").unwrap(), &[]).unwrap();
    assert_eq!(outcome, berth_runtime::KillOutcome::Killed);
}

#[cfg(unix)]
#[test]
fn pipeline_exec_failure_carries_applet_name() {
    let (_file, repo) = load_repo();
    let launcher = launcher_for("false", KillPolicy::Never);
    let err = launcher.exec(repo.get("web").unwrap(), &[]).unwrap_err();
    assert!(matches!(err, BerthError::Exit { ref applet, .. } if applet == "web"));
    assert_eq!(err.exit_code(), Some(1));
}

#[cfg(unix)]
#[test]
fn pipeline_kill_failure_never_propagates() {
    let (_file, repo) = load_repo();
    let launcher = launcher_for("berth-no-such-runtime", KillPolicy::Always);
    match launcher.pre_exec(repo.get("web").unwrap()) {
        berth_runtime::KillOutcome::Failed(cause) => assert!(!cause.is_empty()),
        other => panic!("kill should fail without a runtime, got {other:?}"),
    }
    let err = launcher.exec(repo.get("web").unwrap(), &[]).unwrap_err();
    assert!(matches!(err, BerthError::Launch { .. }));
}
