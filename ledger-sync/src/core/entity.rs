//! Entity identity and the contract every synchronized record type fulfils.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identifier of a remote record: numeric or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{n}"),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Number(value)
    }
}

impl From<i32> for EntityId {
    fn from(value: i32) -> Self {
        EntityId::Number(i64::from(value))
    }
}

impl From<u32> for EntityId {
    fn from(value: u32) -> Self {
        EntityId::Number(i64::from(value))
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        EntityId::Text(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::Text(value.to_string())
    }
}

/// Parses command-line text: integers become `Number`, anything else `Text`.
impl FromStr for EntityId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => EntityId::Number(n),
            Err(_) => EntityId::Text(trimmed.to_string()),
        })
    }
}

/// A typed remote resource kept in sync by an entity slice.
///
/// `Default` must produce the empty record that a slice holds initially and
/// after a successful delete.
pub trait Entity:
    Clone + Default + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Slice name, the prefix of every operation identity (`expense`).
    const NAME: &'static str;
    /// Plural kebab-case collection segment under `/api` (`user-profiles`).
    const COLLECTION: &'static str;

    /// Identifier assigned by the server, absent for records not yet created.
    fn id(&self) -> Option<EntityId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids_as_numbers() {
        let id: EntityId = " 42 ".parse().expect("infallible");
        assert_eq!(id, EntityId::Number(42));
    }

    #[test]
    fn parses_other_ids_as_text() {
        let id: EntityId = "abc-1".parse().expect("infallible");
        assert_eq!(id, EntityId::Text("abc-1".to_string()));
        assert_eq!(id.to_string(), "abc-1");
    }

    #[test]
    fn serializes_untagged() {
        assert_eq!(
            serde_json::to_string(&EntityId::Number(7)).expect("json"),
            "7"
        );
        let parsed: EntityId = serde_json::from_str("\"x\"").expect("json");
        assert_eq!(parsed, EntityId::Text("x".to_string()));
    }
}
