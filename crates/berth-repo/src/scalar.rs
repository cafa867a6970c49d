//! Strict text decoding for string-typed applet fields.
//!
//! YAML resolves unquoted `1.10` to a float and `0x10` to an integer before
//! any field sees it, so the text the author wrote cannot be recovered.
//! Such scalars are rejected with a hint to quote them instead of being
//! printed back in a different form (`1.10` would come back as `1.1`).

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

fn scalar_to_string<E: serde::de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Err(E::custom(format!(
            "unquoted number `{n}` where text is expected; quote it to keep it as written"
        ))),
        Value::Bool(b) => Err(E::custom(format!(
            "unquoted boolean `{b}` where text is expected; quote it to keep it as written"
        ))),
        other => Err(E::custom(format!("expected text, found {other:?}"))),
    }
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)?
        .filter(|v| !v.is_null())
        .map(scalar_to_string)
        .transpose()
}

pub fn opt_string_seq<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .map(|items| items.into_iter().map(scalar_to_string).collect())
        .transpose()
}
