use drift::journal::{Draft, ENTRIES_KEY, Journal};
use drift::onboarding;
use drift::store::{FileStore, KeyValueStore};
use std::fs;
use std::path::PathBuf;

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("drift-journal-{}", uuid::Uuid::new_v4()));
        Self(dir)
    }

    fn store_path(&self) -> PathBuf {
        self.0.join("store.json")
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_entries_persist_across_reopen() {
    let dir = TempDir::new();

    let id = {
        let mut journal = Journal::load(FileStore::open(dir.store_path()).unwrap()).unwrap();
        journal.save(Draft::new("Tomorrow", "Presentation at nine")).unwrap();
        let saved = journal
            .save(Draft::new("", "Did I lock the door?"))
            .unwrap()
            .unwrap();
        journal.set_note(&saved.id, "The door can wait until morning.").unwrap();
        saved.id
    };

    let journal = Journal::load(FileStore::open(dir.store_path()).unwrap()).unwrap();
    assert_eq!(journal.len(), 2);
    let newest = &journal.list()[0];
    assert_eq!(newest.id, id);
    assert_eq!(newest.title, "Untitled Thought");
    assert_eq!(newest.note(), Some("The door can wait until morning."));
}

#[test]
fn test_store_file_uses_browser_layout() {
    let dir = TempDir::new();
    let mut journal = Journal::load(FileStore::open(dir.store_path()).unwrap()).unwrap();
    journal.save(Draft::new("t", "b")).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.store_path()).unwrap()).unwrap();
    let entries: serde_json::Value =
        serde_json::from_str(raw[ENTRIES_KEY].as_str().unwrap()).unwrap();

    assert_eq!(entries[0]["title"], "t");
    assert!(entries[0]["createdAt"].is_string());
    assert!(entries[0]["updatedAt"].is_string());
}

#[test]
fn test_onboarding_and_journal_share_a_store() {
    let dir = TempDir::new();
    let mut store = FileStore::open(dir.store_path()).unwrap();
    assert!(!onboarding::seen(&store).unwrap());
    onboarding::mark_seen(&mut store).unwrap();

    let mut journal = Journal::load(&mut store).unwrap();
    journal.save(Draft::new("t", "b")).unwrap();
    drop(journal);

    let reopened = FileStore::open(dir.store_path()).unwrap();
    assert!(onboarding::seen(&reopened).unwrap());
    assert!(reopened.get(ENTRIES_KEY).unwrap().is_some());
}

#[test]
fn test_entries_written_elsewhere_are_readable() {
    let dir = TempDir::new();
    let mut store = FileStore::open(dir.store_path()).unwrap();
    store
        .set(
            ENTRIES_KEY,
            r#"[{"id":"1700000000000","createdAt":"2023-11-14T22:13:20.000Z","title":"Noise","body":"Neighbours","updatedAt":"2023-11-14T22:13:20.000Z","aiAdvice":"Let the sounds drift past."}]"#,
        )
        .unwrap();

    let mut journal = Journal::load(store).unwrap();
    assert_eq!(journal.get("1700000000000").and_then(|e| e.note()), Some("Let the sounds drift past."));

    let edited = journal
        .save(Draft::new("Noise", "Neighbours again").editing("1700000000000"))
        .unwrap()
        .unwrap();
    assert_eq!(edited.created_at.timestamp_millis(), 1_700_000_000_000);
    assert!(edited.updated_at > edited.created_at);
}
