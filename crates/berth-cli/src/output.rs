//! Formatted output helpers for CLI commands.

use berth_repo::Applet;

/// Column width used for applet keys in listings.
const KEY_WIDTH: usize = 20;

/// Formats one listing row: key, image reference, and container name.
#[must_use]
pub fn format_applet_row(key: &str, applet: &Applet) -> String {
    let name = if applet.name.is_empty() {
        "-"
    } else {
        applet.name.as_str()
    };
    format!("{key:<KEY_WIDTH$} {:<40} {name}", applet.image_ref())
}

/// Header matching [`format_applet_row`].
#[must_use]
pub fn applet_header() -> String {
    format!("{:<KEY_WIDTH$} {:<40} {}", "APPLET", "IMAGE", "NAME")
}
