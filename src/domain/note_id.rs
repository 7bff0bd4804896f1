//! UUID-based note identifier with serde support.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use uuid::Uuid;

/// A stable identifier for a note, independent of its filename.
///
/// Assigned once — when a note is first saved, or when an existing file is
/// first seen without an index entry — and never regenerated afterwards, so
/// a note keeps its identity across any number of renames.
///
/// # Examples
///
/// ```
/// use driftnote::domain::NoteId;
///
/// let id = NoteId::new();
/// assert_eq!(id.to_string().len(), 36); // hyphenated UUID
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Creates a fresh random (v4) NoteId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

/// Error returned when parsing an invalid UUID string.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError {
    value: String,
    reason: String,
}

impl ParseNoteIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid UUID '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(NoteId).map_err(|e| ParseNoteIdError {
            value: s.to_string(),
            reason: e.to_string(),
        })
    }
}

// Manual serde impls keep the wire form a plain string, which also lets
// NoteId act as a JSON object key (the uuidToFilename map).
impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    const KNOWN_ID: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d479";

    #[test]
    fn new_creates_valid_uuid() {
        let id = NoteId::new();
        let s = id.to_string();
        assert_eq!(s.len(), 36, "UUID should be 36 characters hyphenated");
        assert!(s.parse::<NoteId>().is_ok(), "should round-trip via parse");
    }

    #[test]
    fn parse_valid_uuid_string() {
        let id: NoteId = KNOWN_ID.parse().expect("should parse valid UUID");
        assert_eq!(id.to_string(), KNOWN_ID);
    }

    #[test]
    fn parse_invalid_uuid_fails() {
        let result: Result<NoteId, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }

    #[test]
    fn parse_error_contains_invalid_value() {
        let err = "bad".parse::<NoteId>().unwrap_err();
        assert_eq!(err.invalid_value(), "bad");
        assert!(err.to_string().contains("'bad'"));
    }

    #[test]
    fn equality_and_hash_are_consistent() {
        let id1: NoteId = KNOWN_ID.parse().unwrap();
        let id2: NoteId = KNOWN_ID.parse().unwrap();
        let id3 = NoteId::new();

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);

        let mut set = HashSet::new();
        set.insert(id1);
        assert!(set.contains(&id2));
    }

    #[test]
    fn multiple_new_ids_are_unique() {
        let ids: Vec<NoteId> = (0..100).map(|_| NoteId::new()).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn serde_roundtrip() {
        let id: NoteId = KNOWN_ID.parse().unwrap();
        let json = serde_json::to_string(&id).expect("should serialize");
        assert_eq!(json, format!("\"{KNOWN_ID}\""));
        let parsed: NoteId = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_as_map_key() {
        use std::collections::HashMap;

        let id: NoteId = KNOWN_ID.parse().unwrap();
        let mut map = HashMap::new();
        map.insert(id.clone(), "Shopping List.md".to_string());

        let json = serde_json::to_string(&map).expect("should serialize map");
        assert!(json.contains(KNOWN_ID));

        let parsed: HashMap<NoteId, String> =
            serde_json::from_str(&json).expect("should deserialize map");
        assert_eq!(parsed.get(&id).map(String::as_str), Some("Shopping List.md"));
    }

    #[test]
    fn debug_format() {
        let id: NoteId = KNOWN_ID.parse().unwrap();
        assert_eq!(format!("{id:?}"), format!("NoteId(\"{KNOWN_ID}\")"));
    }
}
