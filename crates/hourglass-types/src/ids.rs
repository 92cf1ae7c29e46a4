//! Record identifiers.
//!
//! Trace producers are inconsistent about ids: some emit integers, some emit
//! strings. `RecordId` normalizes both to text so equality is well defined
//! regardless of how the id arrived on the wire.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque record identifier, compared by its text form.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id's text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    UInt(u64),
    Int(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireId::deserialize(deserializer)? {
            WireId::UInt(n) => Self(n.to_string()),
            WireId::Int(n) => Self(n.to_string()),
            WireId::Text(s) => Self(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_compare_equal() {
        let from_num: RecordId = serde_json::from_str("42").unwrap();
        let from_text: RecordId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_num, from_text);
        assert_eq!(from_num, RecordId::from(42u64));
    }

    #[test]
    fn full_width_and_negative_ids_load() {
        let wide: RecordId = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(wide, RecordId::from(u64::MAX));

        let negative: RecordId = serde_json::from_str("-7").unwrap();
        assert_eq!(negative.as_str(), "-7");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = RecordId::from("fetch-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"fetch-7\"");
        assert_eq!(format!("{id:?}"), "RecordId(fetch-7)");
    }
}
