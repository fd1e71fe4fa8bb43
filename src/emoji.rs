//! The `emoji.list` payload and the rules applied to its entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Literal prefix marking an entry that points at another emoji.
pub const ALIAS_PREFIX: &str = "alias:";

/// Decoded `emoji.list` response.
///
/// `emoji` is only meaningful when `ok` is true; when it is false the API
/// puts its reason in `error` instead. Missing and `null` fields both decode
/// to their empty defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiList {
    /// Whether the API call succeeded.
    pub ok: bool,
    /// Emoji name to image URL or `alias:<name>`.
    #[serde(deserialize_with = "null_as_default")]
    pub emoji: BTreeMap<String, String>,
    /// Server-side cache timestamp, informational only.
    #[serde(deserialize_with = "null_as_default")]
    pub cache_ts: String,
    /// Failure reason, set when `ok` is false.
    #[serde(deserialize_with = "null_as_default")]
    pub error: String,
}

impl EmojiList {
    /// Iterates every `(name, value)` pair, aliases included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.emoji
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of alias entries.
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.emoji.values().filter(|value| is_alias(value)).count()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Returns true when `value` references another emoji rather than an image.
#[must_use]
pub fn is_alias(value: &str) -> bool {
    value.starts_with(ALIAS_PREFIX)
}
