//! Applet configuration records.
//!
//! Decoding is two-phase: YAML is read into a [`RawApplet`] whose fields
//! are all optional, then [`RawApplet::apply_defaults`] fills in the
//! documented defaults to produce an [`Applet`]. A field present in the
//! source, even as `false` or `""`, always wins over its default.

use berth_common::constants::DEFAULT_IMAGE_TAG;
use serde::{Deserialize, Serialize};

use crate::scalar;

/// An applet record exactly as written in the repository file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawApplet {
    /// Container name.
    #[serde(deserialize_with = "scalar::opt_string")]
    pub name: Option<String>,
    /// Working directory inside the container.
    #[serde(deserialize_with = "scalar::opt_string")]
    pub work_dir: Option<String>,
    /// Entrypoint override.
    #[serde(deserialize_with = "scalar::opt_string")]
    pub entrypoint: Option<String>,
    /// Restart policy.
    #[serde(deserialize_with = "scalar::opt_string")]
    pub restart: Option<String>,
    /// Network mode.
    #[serde(deserialize_with = "scalar::opt_string")]
    pub network: Option<String>,
    /// Pattern selecting host variables to forward.
    #[serde(deserialize_with = "scalar::opt_string")]
    pub env_filter: Option<String>,
    /// Remove the container after exit.
    pub rm: Option<bool>,
    /// Allocate a pseudo-terminal.
    pub tty: Option<bool>,
    /// Keep stdin open.
    pub interactive: Option<bool>,
    /// Run privileged.
    pub privileged: Option<bool>,
    /// Run in the background.
    pub detach: Option<bool>,
    /// Kill a stale container before running.
    pub kill: Option<bool>,
    /// Forward host variables matching `env_filter`.
    pub all_envs: Option<bool>,
    /// Explicit `KEY=VALUE` pairs.
    #[serde(rename = "environment", deserialize_with = "scalar::opt_string_seq")]
    pub env: Option<Vec<String>>,
    /// Bind-mount specs.
    #[serde(deserialize_with = "scalar::opt_string_seq")]
    pub volumes: Option<Vec<String>>,
    /// Port mappings.
    #[serde(deserialize_with = "scalar::opt_string_seq")]
    pub ports: Option<Vec<String>>,
    /// Env-file paths.
    #[serde(deserialize_with = "scalar::opt_string_seq")]
    pub env_file: Option<Vec<String>>,
    /// Declared dependency names.
    #[serde(deserialize_with = "scalar::opt_string_seq")]
    pub dependencies: Option<Vec<String>>,
    /// Legacy link specs.
    #[serde(deserialize_with = "scalar::opt_string_seq")]
    pub links: Option<Vec<String>>,
    /// Image repository.
    #[serde(deserialize_with = "scalar::opt_string")]
    pub image: Option<String>,
    /// Image tag.
    #[serde(rename = "image_tag", deserialize_with = "scalar::opt_string")]
    pub tag: Option<String>,
    /// Default command.
    #[serde(deserialize_with = "scalar::opt_string_seq")]
    pub command: Option<Vec<String>>,
}

impl RawApplet {
    /// Produces the final record, substituting defaults for absent fields.
    ///
    /// `rm`, `tty`, and `interactive` default to `true` and `image_tag` to
    /// `latest`; everything else defaults to its empty value.
    #[must_use]
    pub fn apply_defaults(self) -> Applet {
        Applet {
            name: self.name.unwrap_or_default(),
            work_dir: self.work_dir.unwrap_or_default(),
            entrypoint: self.entrypoint.unwrap_or_default(),
            restart: self.restart.unwrap_or_default(),
            network: self.network.unwrap_or_default(),
            env_filter: self.env_filter.unwrap_or_default(),
            rm: self.rm.unwrap_or(true),
            tty: self.tty.unwrap_or(true),
            interactive: self.interactive.unwrap_or(true),
            privileged: self.privileged.unwrap_or(false),
            detach: self.detach.unwrap_or(false),
            kill: self.kill.unwrap_or(false),
            all_envs: self.all_envs.unwrap_or(false),
            env: self.env.unwrap_or_default(),
            volumes: self.volumes.unwrap_or_default(),
            ports: self.ports.unwrap_or_default(),
            env_file: self.env_file.unwrap_or_default(),
            dependencies: self.dependencies.unwrap_or_default(),
            links: self.links.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            tag: self.tag.unwrap_or_else(|| DEFAULT_IMAGE_TAG.to_string()),
            command: self.command.unwrap_or_default(),
        }
    }
}

/// A fully-populated applet: how to invoke the container runtime for one
/// workload.
///
/// Values are produced once at load time and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawApplet")]
pub struct Applet {
    /// Container name, also the kill target.
    pub name: String,
    /// Working directory inside the container (environment-expanded).
    pub work_dir: String,
    /// Entrypoint override.
    pub entrypoint: String,
    /// Restart policy.
    pub restart: String,
    /// Network mode.
    pub network: String,
    /// Regular expression selecting host `KEY=VALUE` entries to forward.
    pub env_filter: String,
    /// Remove the container after exit.
    pub rm: bool,
    /// Allocate a pseudo-terminal when one is attached.
    pub tty: bool,
    /// Keep stdin open.
    pub interactive: bool,
    /// Run with elevated privileges.
    pub privileged: bool,
    /// Run in the background.
    pub detach: bool,
    /// Kill a stale container before running; consulted only under the
    /// `flagged` kill policy.
    pub kill: bool,
    /// Forward host variables matching `env_filter`.
    pub all_envs: bool,
    /// Explicit `KEY=VALUE` pairs (environment-expanded).
    #[serde(rename = "environment")]
    pub env: Vec<String>,
    /// Bind-mount specs (environment-expanded).
    pub volumes: Vec<String>,
    /// Port mappings, passed verbatim.
    pub ports: Vec<String>,
    /// Env-file paths, passed verbatim.
    pub env_file: Vec<String>,
    /// Declared dependency names. Carried as data only.
    pub dependencies: Vec<String>,
    /// Legacy link specs, passed verbatim.
    pub links: Vec<String>,
    /// Image repository.
    pub image: String,
    /// Image tag.
    #[serde(rename = "image_tag")]
    pub tag: String,
    /// Command appended when no extra arguments are supplied.
    pub command: Vec<String>,
}

impl Applet {
    /// Returns the `image:tag` reference passed to the runtime.
    ///
    /// No validation: empty parts stay empty, so an unset image yields
    /// `":latest"`.
    #[must_use]
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }
}

impl Default for Applet {
    fn default() -> Self {
        RawApplet::default().apply_defaults()
    }
}

impl From<RawApplet> for Applet {
    fn from(raw: RawApplet) -> Self {
        raw.apply_defaults()
    }
}
