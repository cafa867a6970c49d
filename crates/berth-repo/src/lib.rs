//! # berth-repo
//!
//! Applet records and the repository files that declare them.
//!
//! Handles:
//! - **Applet**: the immutable configuration record for one containerized
//!   workload, built from a raw optional-field record with defaults applied.
//! - **Repository**: loading a YAML mapping of applet keys to records.
//! - **Validator**: load-time checks selected by the env filter policy.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod applet;
pub mod repository;
mod scalar;
pub mod validator;

pub use applet::{Applet, RawApplet};
pub use repository::AppletRepository;
