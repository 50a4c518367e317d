use crate::errors::StoreError;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Client-side key/value storage where every entry carries its own expiry.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Drops entries whose expiry is at or before `now`. Stores whose host
    /// enforces expiry on its own (a browser cookie jar) leave this a no-op.
    fn expire(&mut self, _now: DateTime<Utc>) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, StoredEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, key: &str) -> Option<&StoredEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), StoreError> {
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    fn expire(&mut self, now: DateTime<Utc>) {
        self.entries.retain(|_, entry| entry.expires_at > now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn set_then_get_returns_value() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut store = MemoryStore::new();
        store.set("lastVisit", "x", now + Duration::days(1)).unwrap();
        assert_eq!(store.get("lastVisit").as_deref(), Some("x"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn expire_drops_entries_past_their_horizon() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut store = MemoryStore::new();
        store.set("short", "1", now + Duration::days(1)).unwrap();
        store.set("long", "2", now + Duration::days(7)).unwrap();

        store.expire(now + Duration::hours(23));
        assert_eq!(store.len(), 2);

        store.expire(now + Duration::days(1));
        assert!(store.get("short").is_none());
        assert_eq!(store.get("long").as_deref(), Some("2"));
    }

    #[test]
    fn overwrite_replaces_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut store = MemoryStore::new();
        store.set("k", "a", now + Duration::days(1)).unwrap();
        store.set("k", "b", now + Duration::days(10)).unwrap();
        let entry = store.entry("k").expect("missing entry");
        assert_eq!(entry.value, "b");
        assert_eq!(entry.expires_at, now + Duration::days(10));
    }
}
