//! Identifier and value types for lords-core

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// NewType pattern for Model ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(i64);

impl ModelId {
    /// Create from a raw server id
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner id
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ModelId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for ModelId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidModelId(s.to_string()))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single vote as sent to the server: `1` for up, `-1` for down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub fn as_i64(self) -> i64 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }

    /// The vote pointing the other way
    pub fn opposite(self) -> Self {
        match self {
            VoteValue::Up => VoteValue::Down,
            VoteValue::Down => VoteValue::Up,
        }
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(CoreError::InvalidVote(other)),
        }
    }
}

impl FromStr for VoteValue {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "like" | "+1" | "1" => Ok(VoteValue::Up),
            "down" | "dislike" | "-1" => Ok(VoteValue::Down),
            _ => Err(CoreError::InvalidVote(0)),
        }
    }
}

impl fmt::Display for VoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteValue::Up => write!(f, "up"),
            VoteValue::Down => write!(f, "down"),
        }
    }
}

impl Serialize for VoteValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

impl<'de> Deserialize<'de> for VoteValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        VoteValue::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_value_wire_format() {
        assert_eq!(serde_json::to_string(&VoteValue::Up).unwrap(), "1");
        assert_eq!(serde_json::to_string(&VoteValue::Down).unwrap(), "-1");

        let down: VoteValue = serde_json::from_str("-1").unwrap();
        assert_eq!(down, VoteValue::Down);
        assert!(serde_json::from_str::<VoteValue>("2").is_err());
    }

    #[test]
    fn test_vote_value_from_str() {
        assert_eq!("up".parse::<VoteValue>().unwrap(), VoteValue::Up);
        assert_eq!("Down".parse::<VoteValue>().unwrap(), VoteValue::Down);
        assert!("sideways".parse::<VoteValue>().is_err());
        assert_eq!(VoteValue::Up.opposite(), VoteValue::Down);
    }

    #[test]
    fn test_model_id_parse() {
        assert_eq!("42".parse::<ModelId>().unwrap(), ModelId::new(42));
        assert_eq!(
            "abc".parse::<ModelId>(),
            Err(CoreError::InvalidModelId("abc".to_string()))
        );
    }
}
