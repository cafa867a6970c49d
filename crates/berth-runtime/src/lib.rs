//! Applet invocation compiler and runner.
//!
//! Turns an [`Applet`](berth_repo::Applet) plus a [`RuntimeContext`] into
//! the argument vectors for `docker kill` and `docker run`, and executes
//! them with the caller's standard streams attached.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod context;
pub mod env_filter;
pub mod expand;
pub mod invocation;
pub mod launcher;
pub mod runner;

pub use context::RuntimeContext;
pub use invocation::Invocation;
pub use launcher::{KillOutcome, Launcher};
pub use runner::{ProcessRunner, Stdio, SystemRunner};
