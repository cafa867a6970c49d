//! Shell-style `$VAR` / `${VAR}` expansion.
//!
//! Rules:
//! - `$NAME` takes the longest run of ASCII alphanumerics and `_`.
//! - `${NAME}` takes everything up to the closing brace.
//! - `$*`, `$#`, `$$`, `$@`, `$!`, `$?`, `$-` and `$0`..`$9` are one-character
//!   names, braced or not.
//! - Unset variables expand to nothing.
//! - A `$` not followed by a name is kept as is.
//! - `${}` is dropped; an unterminated `${` drops just the `${`.

use crate::context::RuntimeContext;

/// Expands variable references in `input` against the context's
/// environment.
#[must_use]
pub fn expand(input: &str, ctx: &RuntimeContext) -> String {
    expand_with(input, |name| ctx.var(name).map(str::to_string))
}

/// Expands variable references in `input` using `lookup` to resolve names.
pub fn expand_with<F>(input: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut literal_start = 0;
    let mut j = 0;
    while j < bytes.len() {
        if bytes[j] == b'$' && j + 1 < bytes.len() {
            out.push_str(&input[literal_start..j]);
            let (name, width) = shell_name(&input[j + 1..]);
            match name {
                Some(name) => out.push_str(&lookup(name).unwrap_or_default()),
                None if width > 0 => {}
                None => out.push('$'),
            }
            j += width;
            literal_start = j + 1;
        }
        j += 1;
    }
    out.push_str(&input[literal_start..]);
    out
}

/// Reads the variable name following a `$`.
///
/// Returns the name (if any) and how many bytes of `s` it consumed.
/// `(None, n)` with `n > 0` means malformed syntax that is swallowed.
fn shell_name(s: &str) -> (Option<&str>, usize) {
    let b = s.as_bytes();
    if b[0] == b'{' {
        if b.len() > 2 && is_special(b[1]) && b[2] == b'}' {
            return (Some(&s[1..2]), 3);
        }
        return match s[1..].find('}') {
            Some(0) => (None, 2),
            Some(end) => (Some(&s[1..=end]), end + 2),
            None => (None, 1),
        };
    }
    if is_special(b[0]) {
        return (Some(&s[..1]), 1);
    }
    let len = b
        .iter()
        .take_while(|c| c.is_ascii_alphanumeric() || **c == b'_')
        .count();
    if len == 0 { (None, 0) } else { (Some(&s[..len]), len) }
}

const fn is_special(c: u8) -> bool {
    matches!(c, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-' | b'0'..=b'9')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RuntimeContext {
        RuntimeContext::new(
            [("HOME", "/home/dev"), ("USER", "dev"), ("1", "first"), ("EMPTY", "")],
            false,
        )
    }

    #[test]
    fn plain_and_braced_references() {
        assert_eq!(expand("$HOME/.cache:/cache", &ctx()), "/home/dev/.cache:/cache");
        assert_eq!(expand("${HOME}data", &ctx()), "/home/devdata");
        assert_eq!(expand("USER=$USER", &ctx()), "USER=dev");
    }

    #[test]
    fn unset_variable_expands_to_nothing() {
        assert_eq!(expand("a${MISSING}b$MISSING", &ctx()), "ab");
        assert_eq!(expand("x$EMPTY", &ctx()), "x");
    }

    #[test]
    fn name_stops_at_non_alphanumeric() {
        assert_eq!(expand("$HOME.bak", &ctx()), "/home/dev.bak");
        assert_eq!(expand("$HOME_DIR", &ctx()), "");
    }

    #[test]
    fn special_single_character_names() {
        assert_eq!(expand("$1x", &ctx()), "firstx");
        assert_eq!(expand("${1}", &ctx()), "first");
        assert_eq!(expand("cost $$", &ctx()), "cost ");
    }

    #[test]
    fn dollar_without_name_is_literal() {
        assert_eq!(expand("price: 5$", &ctx()), "price: 5$");
        assert_eq!(expand("a $ b", &ctx()), "a $ b");
        assert_eq!(expand("$/x", &ctx()), "$/x");
    }

    #[test]
    fn malformed_braces_are_swallowed() {
        assert_eq!(expand("a${}b", &ctx()), "ab");
        assert_eq!(expand("a${HOME", &ctx()), "aHOME");
    }

    #[test]
    fn text_without_references_is_unchanged() {
        assert_eq!(expand("/srv/app", &ctx()), "/srv/app");
        assert_eq!(expand("", &ctx()), "");
        assert_eq!(expand("héllo $USER ü", &ctx()), "héllo dev ü");
    }
}
