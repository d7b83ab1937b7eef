//! Sleep journal.
//!
//! Entries live as one JSON array under [`ENTRIES_KEY`], newest first. The
//! [`Journal`] caches the list and writes the whole array back after every
//! change.

mod entry;

pub use entry::{Draft, JournalEntry, UNTITLED};

use crate::error::StoreError;
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};

/// Store key holding the serialized entry list.
pub const ENTRIES_KEY: &str = "sleep-journal-entries";

pub struct Journal<S: KeyValueStore> {
    store: S,
    entries: Vec<JournalEntry>,
}

impl<S: KeyValueStore> Journal<S> {
    /// Reads the entry list from `store`.
    ///
    /// A stored list that fails to parse is logged and treated as empty; it
    /// is only overwritten by the next save.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let entries = match store.get(ENTRIES_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<JournalEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load journal entries");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        tracing::debug!(count = entries.len(), "journal loaded");
        Ok(Self { store, entries })
    }

    /// Saves the draft now. See [`Journal::save_at`].
    pub fn save(&mut self, draft: Draft) -> Result<Option<JournalEntry>, StoreError> {
        self.save_at(draft, Utc::now())
    }

    /// Saves the draft as of `now`.
    ///
    /// A draft with neither title nor body is dropped and `None` returned.
    /// Editing keeps the entry's id, position and creation time. A new entry
    /// goes to the front of the list.
    pub fn save_at(
        &mut self,
        draft: Draft,
        now: DateTime<Utc>,
    ) -> Result<Option<JournalEntry>, StoreError> {
        if draft.is_blank() {
            return Ok(None);
        }

        let title = draft.title_or_default();
        let mut entries = self.entries.clone();
        let saved = match &draft.id {
            Some(id) => {
                let entry = entries
                    .iter_mut()
                    .find(|entry| &entry.id == id)
                    .ok_or_else(|| StoreError::NotFound(id.clone()))?;
                entry.title = title;
                entry.body = draft.body;
                entry.updated_at = now;
                entry.ai_advice = draft.ai_advice;
                entry.clone()
            }
            None => {
                let entry = JournalEntry {
                    id: self.fresh_id(now),
                    title,
                    body: draft.body,
                    created_at: now,
                    updated_at: now,
                    ai_advice: draft.ai_advice,
                };
                entries.insert(0, entry.clone());
                entry
            }
        };

        self.commit(entries)?;
        tracing::info!(id = %saved.id, "journal entry saved");
        Ok(Some(saved))
    }

    fn fresh_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        while self.entries.iter().any(|e| e.id == millis.to_string()) {
            millis += 1;
        }
        millis.to_string()
    }

    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// All entries, newest first.
    pub fn list(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes the entry. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        let mut entries = self.entries.clone();
        entries.retain(|entry| entry.id != id);
        self.commit(entries)?;
        tracing::info!(id, "journal entry deleted");
        Ok(true)
    }

    /// Attaches a generated reply to an existing entry.
    pub fn set_note(&mut self, id: &str, note: impl Into<String>) -> Result<(), StoreError> {
        let mut entries = self.entries.clone();
        let entry = entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.ai_advice = Some(note.into());
        self.commit(entries)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Writes `entries` to the store, then adopts them as the cached list.
    /// On failure the cache keeps the last list that reached the store.
    fn commit(&mut self, entries: Vec<JournalEntry>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&entries)?;
        self.store.set(ENTRIES_KEY, &json)?;
        self.entries = entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;
    use std::io;

    /// Accepts writes until `fail` is set, then rejects them like a full disk.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Io(io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_blank_draft_not_saved() {
        let mut journal = Journal::load(MemoryStore::new()).unwrap();
        assert_eq!(journal.save(Draft::new(" ", "")).unwrap(), None);
        assert!(journal.is_empty());
        assert_eq!(journal.store().get(ENTRIES_KEY).unwrap(), None);
    }

    #[test]
    fn test_new_entries_go_first() {
        let mut journal = Journal::load(MemoryStore::new()).unwrap();
        journal.save_at(Draft::new("first", "a"), at(100)).unwrap();
        journal.save_at(Draft::new("second", "b"), at(200)).unwrap();

        let titles: Vec<_> = journal.list().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(journal.list()[1].id, "100000");
    }

    #[test]
    fn test_untitled_default() {
        let mut journal = Journal::load(MemoryStore::new()).unwrap();
        let saved = journal.save_at(Draft::new("", "thoughts"), at(1)).unwrap().unwrap();
        assert_eq!(saved.title, UNTITLED);
    }

    #[test]
    fn test_edit_keeps_created_at() {
        let mut journal = Journal::load(MemoryStore::new()).unwrap();
        let saved = journal.save_at(Draft::new("t", "b"), at(10)).unwrap().unwrap();

        let edited = journal
            .save_at(Draft::new("t2", "b2").editing(&saved.id), at(20))
            .unwrap()
            .unwrap();
        assert_eq!(edited.id, saved.id);
        assert_eq!(edited.created_at, at(10));
        assert_eq!(edited.updated_at, at(20));
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn test_edit_unknown_id_fails() {
        let mut journal = Journal::load(MemoryStore::new()).unwrap();
        let result = journal.save_at(Draft::new("t", "b").editing("404"), at(1));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_same_millisecond_ids_are_unique() {
        let mut journal = Journal::load(MemoryStore::new()).unwrap();
        let a = journal.save_at(Draft::new("a", ""), at(5)).unwrap().unwrap();
        let b = journal.save_at(Draft::new("b", ""), at(5)).unwrap().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_delete_and_note() {
        let mut journal = Journal::load(MemoryStore::new()).unwrap();
        let saved = journal.save_at(Draft::new("t", "b"), at(1)).unwrap().unwrap();

        journal.set_note(&saved.id, "Rest now.").unwrap();
        assert_eq!(journal.get(&saved.id).and_then(|e| e.note()), Some("Rest now."));

        assert!(journal.delete(&saved.id).unwrap());
        assert!(!journal.delete(&saved.id).unwrap());
        assert!(journal.set_note(&saved.id, "x").is_err());
    }

    #[test]
    fn test_unreadable_list_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(ENTRIES_KEY, "[{broken").unwrap();
        let journal = Journal::load(store).unwrap();
        assert!(journal.is_empty());
    }

    #[test]
    fn test_reload_from_store() {
        let mut journal = Journal::load(MemoryStore::new()).unwrap();
        journal.save_at(Draft::new("kept", "b"), at(3)).unwrap();

        let reloaded = Journal::load(journal.into_store()).unwrap();
        assert_eq!(reloaded.list()[0].title, "kept");
    }

    #[test]
    fn test_failed_write_leaves_entries_untouched() {
        let mut journal = Journal::load(FlakyStore::default()).unwrap();
        let kept = journal.save_at(Draft::new("kept", "b"), at(1)).unwrap().unwrap();
        journal.store.fail = true;

        assert!(journal.save_at(Draft::new("lost", "b"), at(2)).is_err());
        assert!(journal
            .save_at(Draft::new("renamed", "b").editing(&kept.id), at(3))
            .is_err());
        assert!(journal.set_note(&kept.id, "unsaved").is_err());
        assert!(journal.delete(&kept.id).is_err());

        assert_eq!(journal.list(), std::slice::from_ref(&kept));
        assert_eq!(journal.get(&kept.id).and_then(|e| e.note()), None);

        journal.store.fail = false;
        let reloaded = Journal::load(journal.into_store()).unwrap();
        assert_eq!(reloaded.list(), std::slice::from_ref(&kept));
    }
}
