//! Policy types that resolve launcher behavior left to configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BerthError;

/// When the stale-container kill runs before an applet is started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KillPolicy {
    /// Always kill before running.
    #[default]
    Always,
    /// Kill only when the applet sets `kill: true`.
    Flagged,
    /// Never kill.
    Never,
}

impl KillPolicy {
    /// Resolves the policy against an applet's `kill` flag.
    #[must_use]
    pub const fn applies(self, kill_flag: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Flagged => kill_flag,
            Self::Never => false,
        }
    }
}

impl fmt::Display for KillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::Flagged => write!(f, "flagged"),
            Self::Never => write!(f, "never"),
        }
    }
}

impl FromStr for KillPolicy {
    type Err = BerthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "flagged" => Ok(Self::Flagged),
            "never" => Ok(Self::Never),
            other => Err(BerthError::Config {
                message: format!("unknown kill policy '{other}' (expected always, flagged, never)"),
            }),
        }
    }
}

/// How an `env_filter` that fails to compile is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvFilterPolicy {
    /// Forward no host variables and keep going.
    #[default]
    FailOpen,
    /// Reject the applet as misconfigured.
    Strict,
}

impl fmt::Display for EnvFilterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailOpen => write!(f, "fail-open"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for EnvFilterPolicy {
    type Err = BerthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail-open" => Ok(Self::FailOpen),
            "strict" => Ok(Self::Strict),
            other => Err(BerthError::Config {
                message: format!(
                    "unknown env filter policy '{other}' (expected fail-open, strict)"
                ),
            }),
        }
    }
}
