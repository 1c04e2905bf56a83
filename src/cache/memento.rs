//! Cache state store
//!
//! Keeps the last committed coin sequence of every cache the player has
//! seen, keyed by the cell's stable serialization. Restoring is a plain
//! read: entries are never consumed, so a cache can be evicted and
//! recreated any number of times.
//!
//! The whole store serializes to a single JSON document for durable
//! storage:
//!
//! ```json
//! {"version":1,"checksum":"9f2c...","caches":{"3,4":["3:4#1"]}}
//! ```
//!
//! Documents without `checksum` or `caches`, and bare legacy
//! `{"3,4":[...]}` maps, are still accepted.

use crate::cache::token::Token;
use crate::error::{GeocoinError, GeocoinResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::debug;

/// Current document version
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    checksum: Option<String>,
    #[serde(default)]
    caches: BTreeMap<String, Vec<Token>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Persisted {
    Document(StoreDocument),
    Legacy(BTreeMap<String, Vec<Token>>),
}

/// Keyed archive of cache contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStateStore {
    entries: BTreeMap<String, Vec<Token>>,
}

impl CacheStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `tokens` as the state of `key`, replacing any previous entry
    pub fn save(&mut self, key: &str, tokens: &[Token]) {
        debug!("Saving {} coin(s) for cell {}", tokens.len(), key);
        self.entries.insert(key.to_string(), tokens.to_vec());
    }

    /// Last saved state of `key`, or `None` if it was never saved
    pub fn restore(&self, key: &str) -> Option<Vec<Token>> {
        self.entries.get(key).cloned()
    }

    /// Borrowing variant of [`restore`](Self::restore)
    pub fn get(&self, key: &str) -> Option<&[Token]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Forget the entry for `key`
    pub fn remove(&mut self, key: &str) -> Option<Vec<Token>> {
        self.entries.remove(key)
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Token])> {
        self.entries
            .iter()
            .map(|(key, tokens)| (key.as_str(), tokens.as_slice()))
    }

    /// Serialize the whole store to a flat JSON document
    pub fn serialize(&self) -> GeocoinResult<String> {
        let document = StoreDocument {
            version: FORMAT_VERSION,
            checksum: Some(checksum(&self.entries)?),
            caches: self.entries.clone(),
        };
        Ok(serde_json::to_string(&document)?)
    }

    /// Rebuild a store from [`serialize`](Self::serialize) output
    pub fn deserialize(content: &str) -> GeocoinResult<Self> {
        let persisted: Persisted = serde_json::from_str(content)
            .map_err(|e| GeocoinError::malformed("cache store", e.to_string()))?;

        let entries = match persisted {
            Persisted::Document(document) => {
                if document.version > FORMAT_VERSION {
                    return Err(GeocoinError::malformed(
                        "cache store",
                        format!("unsupported version {}", document.version),
                    ));
                }
                if let Some(expected) = document.checksum {
                    let actual = checksum(&document.caches)?;
                    if actual != expected {
                        return Err(GeocoinError::malformed(
                            "cache store",
                            format!("checksum mismatch: expected {}, found {}", expected, actual),
                        ));
                    }
                }
                document.caches
            }
            Persisted::Legacy(entries) => {
                debug!("Read legacy cache store with {} entries", entries.len());
                entries
            }
        };

        Ok(Self { entries })
    }
}

/// Short SHA-256 fingerprint of the entries
fn checksum(entries: &BTreeMap<String, Vec<Token>>) -> GeocoinResult<String> {
    let canonical = serde_json::to_vec(entries)?;
    let digest = Sha256::digest(&canonical);
    Ok(hex::encode(&digest[..8]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::cache::token::mint_all;

    fn tokens(ids: &[&str]) -> Vec<Token> {
        ids.iter().map(|id| Token::from_id(*id)).collect()
    }

    #[test]
    fn restore_missing_is_none() {
        let store = CacheStateStore::new();
        assert_eq!(store.restore("0,0"), None);
    }

    #[test]
    fn restore_distinguishes_empty_from_missing() {
        let mut store = CacheStateStore::new();
        store.save("1,1", &[]);
        assert_eq!(store.restore("1,1"), Some(vec![]));
        assert_eq!(store.restore("1,2"), None);
    }

    #[test]
    fn save_overwrites() {
        let mut store = CacheStateStore::new();
        store.save("3,4", &tokens(&["3:4#1", "3:4#2"]));
        store.save("3,4", &tokens(&["3:4#1"]));
        assert_eq!(store.restore("3,4"), Some(tokens(&["3:4#1"])));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn restore_is_repeatable() {
        let mut store = CacheStateStore::new();
        store.save("3,4", &tokens(&["3:4#1"]));
        let first = store.restore("3,4");
        let second = store.restore("3,4");
        assert_eq!(first, second);
        assert!(store.contains("3,4"));
    }

    #[test]
    fn serialize_round_trip() {
        let mut store = CacheStateStore::new();
        store.save("3,4", &tokens(&["3:4#1", "9:9#7"]));
        store.save("-1,0", &[]);
        store.save("5,5", &mint_all(&Cell::new(5, 5), 40));

        let restored = CacheStateStore::deserialize(&store.serialize().unwrap()).unwrap();
        for (key, saved) in store.iter() {
            assert_eq!(restored.get(key), Some(saved));
        }
        assert_eq!(restored, store);
    }

    #[test]
    fn deserialize_accepts_missing_fields() {
        let store = CacheStateStore::deserialize(r#"{"version":1}"#).unwrap();
        assert!(store.is_empty());

        let store =
            CacheStateStore::deserialize(r#"{"version":1,"caches":{"2,2":["2:2#1"]}}"#).unwrap();
        assert_eq!(store.restore("2,2"), Some(tokens(&["2:2#1"])));
    }

    #[test]
    fn deserialize_accepts_legacy_map() {
        let store = CacheStateStore::deserialize(r#"{"3,4":["3:4#1"],"0,1":[]}"#).unwrap();
        assert_eq!(store.restore("3,4"), Some(tokens(&["3:4#1"])));
        assert_eq!(store.restore("0,1"), Some(vec![]));
    }

    #[test]
    fn deserialize_rejects_garbage() {
        for bad in ["", "not json", "[1,2,3]", r#"{"version":1,"caches":{"1,1":[7]}}"#] {
            let err = CacheStateStore::deserialize(bad).unwrap_err();
            assert!(matches!(err, GeocoinError::MalformedState { .. }), "{}", bad);
        }
    }

    #[test]
    fn deserialize_rejects_tampered_checksum() {
        let mut store = CacheStateStore::new();
        store.save("3,4", &tokens(&["3:4#1"]));
        let tampered = store.serialize().unwrap().replace("3:4#1", "3:4#9");
        let err = CacheStateStore::deserialize(&tampered).unwrap_err();
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn deserialize_rejects_future_version() {
        let err = CacheStateStore::deserialize(r#"{"version":99}"#).unwrap_err();
        assert!(err.to_string().contains("unsupported version"));
    }

    #[test]
    fn clear_and_remove() {
        let mut store = CacheStateStore::new();
        store.save("1,1", &tokens(&["1:1#1"]));
        store.save("2,2", &tokens(&["2:2#1"]));
        assert_eq!(store.remove("1,1"), Some(tokens(&["1:1#1"])));
        store.clear();
        assert!(store.is_empty());
    }
}
