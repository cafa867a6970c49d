//! Applet repository files.
//!
//! A repository is a YAML mapping from applet key to applet record:
//!
//! ```yaml
//! web:
//!   name: web
//!   image: nginx
//!   image_tag: "1.25"
//!   ports: ["8080:80"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use berth_common::error::{BerthError, Result};

use crate::applet::Applet;

/// The applets declared in one repository file, keyed by applet key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppletRepository {
    applets: BTreeMap<String, Applet>,
}

impl AppletRepository {
    /// Parses a repository from YAML text.
    ///
    /// An empty document yields an empty repository.
    ///
    /// # Errors
    ///
    /// Returns [`BerthError::Parse`] if the text is not a mapping of
    /// applet records.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("<inline>"))
    }

    /// Reads and parses a repository file.
    ///
    /// # Errors
    ///
    /// Returns [`BerthError::Io`] if the file cannot be read and
    /// [`BerthError::Parse`] if its contents are invalid.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading applet repository");
        let content = std::fs::read_to_string(path).map_err(|e| BerthError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let repo = Self::parse(&content, path)?;
        tracing::debug!(path = %path.display(), applets = repo.len(), "applet repository loaded");
        Ok(repo)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let applets: Option<BTreeMap<String, Applet>> =
            serde_yaml::from_str(content).map_err(|e| BerthError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self {
            applets: applets.unwrap_or_default(),
        })
    }

    /// Looks up an applet by key.
    ///
    /// # Errors
    ///
    /// Returns [`BerthError::NotFound`] if no applet has that key.
    pub fn get(&self, key: &str) -> Result<&Applet> {
        self.applets.get(key).ok_or_else(|| BerthError::NotFound {
            kind: "applet",
            id: key.to_string(),
        })
    }

    /// Returns the declared dependency names of an applet.
    ///
    /// These are informational; nothing orders or starts them.
    ///
    /// # Errors
    ///
    /// Returns [`BerthError::NotFound`] if no applet has that key.
    pub fn dependencies(&self, key: &str) -> Result<&[String]> {
        self.get(key).map(|a| a.dependencies.as_slice())
    }

    /// Iterates applet keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.applets.keys().map(String::as_str)
    }

    /// Iterates `(key, applet)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Applet)> {
        self.applets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of applets in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.applets.len()
    }

    /// Whether the repository declares no applets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applets.is_empty()
    }
}
