//! Global configuration model for the launcher.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{EnvFilterPolicy, KillPolicy};

/// Root configuration for launching applets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Container runtime executable, looked up on `PATH` when not absolute.
    pub docker_exe: String,
    /// Path to the applet repository file.
    pub repo_file: PathBuf,
    /// When the stale-container kill runs.
    pub kill_policy: KillPolicy,
    /// How an invalid `env_filter` is treated.
    pub env_filter_policy: EnvFilterPolicy,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            docker_exe: crate::constants::DEFAULT_DOCKER_EXE.to_string(),
            repo_file: PathBuf::from(crate::constants::DEFAULT_REPO_FILE),
            kill_policy: KillPolicy::default(),
            env_filter_policy: EnvFilterPolicy::default(),
        }
    }
}
