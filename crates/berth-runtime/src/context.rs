//! Snapshot of the host state an invocation depends on.

use std::io::IsTerminal;

/// Host environment and terminal state at the moment of compilation.
///
/// Kept separate from the applet so the compiler never queries globals;
/// the launcher captures a fresh context for every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeContext {
    env: Vec<(String, String)>,
    terminal_attached: bool,
}

impl RuntimeContext {
    /// Builds a context from explicit values.
    pub fn new<I, K, V>(env: I, terminal_attached: bool) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            env: env.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            terminal_attached,
        }
    }

    /// Captures the current process environment and whether stdin is a
    /// terminal.
    ///
    /// Entries that are not valid UTF-8 are converted lossily.
    #[must_use]
    pub fn capture() -> Self {
        let env = std::env::vars_os().map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        });
        Self::new(env, std::io::stdin().is_terminal())
    }

    /// Looks up a variable. The first occurrence wins.
    #[must_use]
    pub fn var(&self, name: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Host variables as `KEY=VALUE` strings, in host enumeration order.
    pub fn entries(&self) -> impl Iterator<Item = String> + '_ {
        self.env.iter().map(|(k, v)| format!("{k}={v}"))
    }

    /// Whether stdin was attached to a terminal at capture time.
    #[must_use]
    pub const fn terminal_attached(&self) -> bool {
        self.terminal_attached
    }
}
