//! Corridor and node identity types.

use std::fmt;

/// Error returned when parsing an invalid corridor identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid corridor id: {reason}")]
pub struct InvalidCorridorId {
    reason: &'static str,
}

/// Identifier of a corridor (a fixed line route such as "1" or "9A").
///
/// Stored trimmed. Blank identifiers are rejected, so any `CorridorId`
/// names a real line.
///
/// # Examples
///
/// ```
/// use transit_server::domain::CorridorId;
///
/// let id = CorridorId::parse(" 9A ").unwrap();
/// assert_eq!(id.as_str(), "9A");
///
/// assert!(CorridorId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorridorId(String);

impl CorridorId {
    /// Parse a corridor identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidCorridorId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidCorridorId {
                reason: "must not be blank",
            });
        }
        Ok(CorridorId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CorridorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CorridorId({})", self.0)
    }
}

impl fmt::Display for CorridorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stop as served by one particular corridor.
///
/// A stop served by k corridors appears as k nodes. The pair
/// (stop name, corridor) is the identity of the node.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    stop: String,
    corridor: CorridorId,
}

impl Node {
    pub fn new(stop: impl Into<String>, corridor: CorridorId) -> Self {
        Self {
            stop: stop.into(),
            corridor,
        }
    }

    /// The stop name.
    pub fn stop(&self) -> &str {
        &self.stop
    }

    /// The corridor serving this stop.
    pub fn corridor(&self) -> &CorridorId {
        &self.corridor
    }

    /// True if both nodes are on the same corridor.
    pub fn same_corridor(&self, other: &Node) -> bool {
        self.corridor == other.corridor
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}@{})", self.stop, self.corridor)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.stop, self.corridor)
    }
}
