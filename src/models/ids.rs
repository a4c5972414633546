//! Strongly-typed identifier for persisted entries
//!
//! The store assigns an `EntryId` on first save. Display uses a short
//! `ent-xxxxxxxx` form which the CLI also accepts as input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "ent-";

/// Identifier of a persisted financial entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a full UUID, with or without the display prefix
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Check whether a user-typed identifier refers to this ID
    ///
    /// Accepts the full UUID or any prefix of it of at least four hex
    /// characters, optionally written as `ent-xxxx`.
    pub fn matches_short(&self, identifier: &str) -> bool {
        let needle = identifier.trim();
        let needle = needle.strip_prefix(DISPLAY_PREFIX).unwrap_or(needle);
        needle.len() >= 4 && self.0.to_string().starts_with(&needle.to_ascii_lowercase())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, &self.0.to_string()[..8])
    }
}

impl From<Uuid> for EntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
