//! Graph node keys and composite cache keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// A node of the routing graph: the tour start, the tour end, or the
/// front point of a location.
///
/// Keys print and parse as `START`, `END` and `LOC:<id>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum NodeKey {
    /// Fixed tour start
    Start,
    /// Fixed tour end
    End,
    /// A pick location's front point
    Location(u64),
}

impl NodeKey {
    /// Location id, if this is a location node
    pub fn location_id(&self) -> Option<u64> {
        match self {
            Self::Location(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "START"),
            Self::End => write!(f, "END"),
            Self::Location(id) => write!(f, "LOC:{}", id),
        }
    }
}

impl FromStr for NodeKey {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "START" => Ok(Self::Start),
            "END" => Ok(Self::End),
            _ => s
                .strip_prefix("LOC:")
                .and_then(|id| id.parse().ok())
                .map(Self::Location)
                .ok_or_else(|| RouteError::InvalidInput(format!("malformed node key '{}'", s))),
        }
    }
}

impl From<NodeKey> for String {
    fn from(key: NodeKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for NodeKey {
    type Error = RouteError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Full identity of a cached distance: floor, geometry version and the
/// directed node pair. Nothing about the current picking task is part of
/// the key, so entries are shared by every task on the same floor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Warehouse
    pub warehouse_id: u64,
    /// Floor
    pub floor_id: u64,
    /// Layout fingerprint the distance was computed under
    pub layout_hash: String,
    /// Origin node
    pub from_key: NodeKey,
    /// Destination node
    pub to_key: NodeKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        for key in [NodeKey::Start, NodeKey::End, NodeKey::Location(42)] {
            assert_eq!(key.to_string().parse::<NodeKey>().unwrap(), key);
        }
        assert_eq!(NodeKey::Location(7).to_string(), "LOC:7");
    }

    #[test]
    fn test_malformed_keys_rejected() {
        for bad in ["", "LOC:", "LOC:x", "loc:1", "BEGIN"] {
            let err = bad.parse::<NodeKey>().unwrap_err();
            assert_eq!(err.code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&NodeKey::Location(3)).unwrap();
        assert_eq!(json, "\"LOC:3\"");
        let back: NodeKey = serde_json::from_str("\"END\"").unwrap();
        assert_eq!(back, NodeKey::End);
    }
}
