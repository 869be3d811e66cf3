//! Common ID Types
//!
//! Type-safe wrappers around the numeric (`BIGSERIAL`) primary keys.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, UserId};
/// let id: UserId = Id::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!("7".parse::<UserId>().unwrap(), id);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn value(&self) -> i64 {
        self.value
    }
}

// Manual impls so markers need no derives.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Path segment that is not a positive integer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a valid id")]
pub struct IdParseError(pub String);

impl<T> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self::new(value)),
            _ => Err(IdParseError(s.to_string())),
        }
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    pub struct User;

    pub struct Todo;
}

pub type UserId = Id<markers::User>;
pub type TodoId = Id<markers::Todo>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_id() {
        let id: TodoId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<TodoId>().is_err());
        assert!("0".parse::<TodoId>().is_err());
        assert!("-3".parse::<UserId>().is_err());
        assert!("".parse::<UserId>().is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let id: UserId = Id::new(5);
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(5));

        let back: UserId = serde_json::from_str("5").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ordering_follows_value() {
        let mut ids: Vec<TodoId> = vec![Id::new(3), Id::new(1), Id::new(2)];
        ids.sort();
        assert_eq!(ids.iter().map(|id| id.value()).collect::<Vec<_>>(), [1, 2, 3]);
    }
}
