//! System-wide constants and defaults.

/// Container runtime executable invoked when none is configured.
pub const DEFAULT_DOCKER_EXE: &str = "docker";

/// Applet repository file looked up when none is given.
pub const DEFAULT_REPO_FILE: &str = "berth.yml";

/// Image tag used when an applet omits `image_tag`.
pub const DEFAULT_IMAGE_TAG: &str = "latest";

/// Environment variable overriding the runtime executable.
pub const DOCKER_ENV_VAR: &str = "BERTH_DOCKER";

/// Environment variable overriding the repository file.
pub const REPO_FILE_ENV_VAR: &str = "BERTH_FILE";
