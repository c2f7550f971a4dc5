//! Identifier - unique identifier value object
//!
//! Wraps a UUID token. Used as primary key of every entity and as foreign
//! reference between them (accounts, agents, schedules).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValueObject;
use crate::errors::{DomainError, DomainResult};

/// Length of the canonical hyphenated UUID form
const HYPHENATED_LEN: usize = 36;

/// Unique identifier for domain entities
///
/// UUID is just the internal representation; the storage layer sees the
/// canonical hyphenated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Generate a new unique identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its hyphenated UUID form
    pub fn parse(token: &str) -> DomainResult<Self> {
        if token.len() != HYPHENATED_LEN {
            return Err(DomainError::InvalidIdentifierFormat(token.to_string()));
        }
        Uuid::try_parse(token)
            .map(Self)
            .map_err(|_| DomainError::InvalidIdentifierFormat(token.to_string()))
    }

    /// Canonical string token
    pub fn as_string(&self) -> String {
        self.0.hyphenated().to_string()
    }

    /// Internal UUID representation
    /// NOTE: This should only be used by infrastructure layer
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl ValueObject for Identifier {}

impl Default for Identifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for Identifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for Identifier {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Identifier::parse(&token).map_err(serde::de::Error::custom)
    }
}
