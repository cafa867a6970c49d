//! Selection of host environment entries forwarded with `all_envs`.

use berth_common::error::{BerthError, Result};
use berth_common::types::EnvFilterPolicy;
use berth_repo::Applet;
use regex::Regex;

/// A compiled `env_filter`.
///
/// Patterns are searched for anywhere in the `KEY=VALUE` entry; anchor
/// with `^` to match on the key. An empty pattern matches every entry.
#[derive(Debug, Clone)]
pub struct EnvFilter {
    pattern: Option<Regex>,
}

impl EnvFilter {
    /// Compiles the applet's `env_filter` under the given policy.
    ///
    /// # Errors
    ///
    /// Under [`EnvFilterPolicy::Strict`], returns
    /// [`BerthError::InvalidEnvFilter`] if the pattern does not compile.
    /// Under [`EnvFilterPolicy::FailOpen`] an invalid pattern yields a
    /// filter that matches nothing.
    pub fn compile(applet: &Applet, policy: EnvFilterPolicy) -> Result<Self> {
        match Regex::new(&applet.env_filter) {
            Ok(re) => Ok(Self { pattern: Some(re) }),
            Err(e) if policy == EnvFilterPolicy::Strict => Err(BerthError::InvalidEnvFilter {
                applet: applet.name.clone(),
                source: e,
            }),
            Err(e) => {
                tracing::warn!(
                    applet = %applet.name,
                    pattern = %applet.env_filter,
                    error = %e,
                    "invalid env_filter, forwarding no host variables"
                );
                Ok(Self { pattern: None })
            }
        }
    }

    /// Whether a `KEY=VALUE` entry should be forwarded.
    #[must_use]
    pub fn matches(&self, entry: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applet_with_filter(pattern: &str) -> Applet {
        Applet {
            name: "probe".into(),
            env_filter: pattern.into(),
            all_envs: true,
            ..Applet::default()
        }
    }

    #[test]
    fn anchored_pattern_selects_by_key() {
        let filter =
            EnvFilter::compile(&applet_with_filter("^AWS_"), EnvFilterPolicy::FailOpen).unwrap();
        assert!(filter.matches("AWS_REGION=eu-west-1"));
        assert!(!filter.matches("MY_AWS_KEY=x"));
    }

    #[test]
    fn unanchored_pattern_searches_whole_entry() {
        let filter =
            EnvFilter::compile(&applet_with_filter("prod"), EnvFilterPolicy::FailOpen).unwrap();
        assert!(filter.matches("STAGE=prod"));
    }

    #[test]
    fn empty_pattern_matches_everything() {
        let filter = EnvFilter::compile(&applet_with_filter(""), EnvFilterPolicy::Strict).unwrap();
        assert!(filter.matches("ANY=thing"));
    }

    #[test]
    fn invalid_pattern_fail_open_matches_nothing() {
        let filter =
            EnvFilter::compile(&applet_with_filter("(["), EnvFilterPolicy::FailOpen).unwrap();
        assert!(!filter.matches("ANY=thing"));
    }

    #[test]
    fn invalid_pattern_strict_is_error() {
        let err = EnvFilter::compile(&applet_with_filter("(["), EnvFilterPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, BerthError::InvalidEnvFilter { .. }));
    }
}
