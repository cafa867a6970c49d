//! Unified error types for the berth workspace.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BerthError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// The applet repository could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Repository file being parsed.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// An applet's `env_filter` is not a valid regular expression.
    #[error("invalid env_filter for applet {applet}: {source}")]
    InvalidEnvFilter {
        /// Name of the offending applet.
        applet: String,
        /// Regex compilation error.
        source: regex::Error,
    },

    /// The runtime executable could not be spawned or waited on.
    #[error("error running applet {applet}: {program}: {source}")]
    Launch {
        /// Name of the applet being run.
        applet: String,
        /// Executable that failed to launch.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The runtime executable ran but exited unsuccessfully.
    #[error("error running applet {applet}: {status}")]
    Exit {
        /// Name of the applet being run.
        applet: String,
        /// Exit status reported by the child.
        status: ExitStatus,
    },
}

impl BerthError {
    /// Returns the child's exit code when the error is an unsuccessful exit.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exit { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BerthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_error_names_applet_and_program() {
        let err = BerthError::Launch {
            applet: "web".into(),
            program: "docker".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("error running applet web:"));
        assert!(msg.contains("docker"));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn not_found_display() {
        let err = BerthError::NotFound {
            kind: "applet",
            id: "db".into(),
        };
        assert_eq!(err.to_string(), "applet not found: db");
    }
}
