use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Subscription tier of the business that owns a piece of content.
///
/// Variants are declared lowest to highest so the derived `Ord` matches
/// visibility priority: `Basic < Premium < Elite`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "Value")]
pub enum Tier {
    #[default]
    Basic,
    Premium,
    Elite,
}

impl Tier {
    /// Resolve a tier from the `tiers.name` column of a business record.
    ///
    /// Missing, empty or unrecognised names fall back to `Basic`.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("elite") => Tier::Elite,
            Some("premium") => Tier::Premium,
            _ => Tier::Basic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Premium => "premium",
            Tier::Elite => "elite",
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, Tier::Basic)
    }
}

/// Accepts a tier name, `null`, or the nested `tiers` record (`{"name": ...}`).
/// Any other shape is `Basic`.
impl From<Value> for Tier {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Tier::from_name(Some(name.as_str())),
            Value::Object(record) => {
                Tier::from_name(record.get("name").and_then(Value::as_str))
            }
            _ => Tier::Basic,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Natural ordering key used inside a tier (start time, date, position).
///
/// Numbers sort before text; `"09:00"` style times and ISO-8601 timestamps
/// sort correctly as text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortKey {
    Number(i64),
    Text(String),
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        SortKey::Number(value)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::Text(value.to_string())
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::Text(value)
    }
}

/// A sponsored event, entertainment listing or special ready to be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankableItem<K = SortKey> {
    pub id: String,
    #[serde(default)]
    pub tier: Tier,
    pub sort_key: K,
}

impl<K> RankableItem<K> {
    pub fn new(id: impl Into<String>, tier: Tier, sort_key: K) -> Self {
        Self {
            id: id.into(),
            tier,
            sort_key,
        }
    }
}
