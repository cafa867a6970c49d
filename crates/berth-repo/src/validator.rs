//! Load-time validation of applet repositories.
//!
//! Only the env filter is checked, and only under the strict policy.
//! Everything else (empty images, odd port specs) is left for the
//! container runtime to reject.

use berth_common::error::{BerthError, Result};
use berth_common::types::EnvFilterPolicy;

use crate::applet::Applet;
use crate::repository::AppletRepository;

/// Validates a single applet.
///
/// # Errors
///
/// Under [`EnvFilterPolicy::Strict`], returns
/// [`BerthError::InvalidEnvFilter`] if the applet forwards host variables
/// and its `env_filter` does not compile.
pub fn validate_applet(applet: &Applet, policy: EnvFilterPolicy) -> Result<()> {
    if policy != EnvFilterPolicy::Strict || !applet.all_envs {
        return Ok(());
    }
    regex::Regex::new(&applet.env_filter)
        .map(|_| ())
        .map_err(|e| BerthError::InvalidEnvFilter {
            applet: applet.name.clone(),
            source: e,
        })
}

/// Validates every applet in a repository, stopping at the first failure.
///
/// # Errors
///
/// Returns the first error reported by [`validate_applet`].
pub fn validate(repo: &AppletRepository, policy: EnvFilterPolicy) -> Result<()> {
    for (key, applet) in repo.iter() {
        validate_applet(applet, policy).inspect_err(|e| {
            tracing::error!(applet = key, error = %e, "applet failed validation");
        })?;
    }
    Ok(())
}
