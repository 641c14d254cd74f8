use moodlog_core::db::{open_db, open_db_in_memory};
use moodlog_core::{parse_timestamp, MoodEntry, MoodStore, SqliteStorage, StorageAdapter, STORAGE_KEY};
use rusqlite::Connection;

fn sample_entries() -> Vec<MoodEntry> {
    vec![
        MoodEntry::with_id(
            "a".to_string(),
            2,
            "quiet day",
            parse_timestamp("2024-01-01T08:00:00Z").unwrap(),
        ),
        MoodEntry::with_id(
            "b".to_string(),
            5,
            "hike, \"summit\" reached",
            parse_timestamp("2024-01-02T18:45:00Z").unwrap(),
        ),
    ]
}

#[test]
fn save_then_load_round_trips_the_collection() {
    let storage = SqliteStorage::new(open_db_in_memory().unwrap());
    let entries = sample_entries();

    storage.save(&entries);
    assert_eq!(storage.load(), entries);
}

#[test]
fn load_of_absent_key_is_empty() {
    let storage = SqliteStorage::new(open_db_in_memory().unwrap());
    assert!(storage.load().is_empty());
}

#[test]
fn save_overwrites_the_single_key() {
    let storage = SqliteStorage::new(open_db_in_memory().unwrap());
    let entries = sample_entries();

    storage.save(&entries);
    storage.save(&entries[..1]);
    assert_eq!(storage.load().len(), 1);
}

#[test]
fn corrupt_blob_degrades_to_empty_collection() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2);",
        rusqlite::params![STORAGE_KEY, "{not valid json"],
    )
    .unwrap();

    let storage = SqliteStorage::new(conn);
    assert!(storage.load().is_empty());
}

#[test]
fn save_against_broken_storage_does_not_panic() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE kv_store;").unwrap();

    let storage = SqliteStorage::new(conn);
    storage.save(&sample_entries());
    assert!(storage.load().is_empty());
}

#[test]
fn persisted_blob_is_a_json_array_with_iso_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moodlog.db");

    let storage = SqliteStorage::new(open_db(&path).unwrap());
    storage.save(&sample_entries());
    drop(storage);

    let inspector = Connection::open(&path).unwrap();
    let blob: String = inspector
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1;",
            [STORAGE_KEY],
            |row| row.get(0),
        )
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);

    for item in items {
        let object = item.as_object().unwrap();
        assert!(object.contains_key("id"));
        assert!(object.contains_key("level"));
        assert!(object.contains_key("notes"));
        let timestamp = object["timestamp"].as_str().unwrap();
        assert!(parse_timestamp(timestamp).is_some());
    }
}

#[test]
fn committed_entries_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moodlog.db");

    let created = {
        let conn = open_db(&path).unwrap();
        let mut store = MoodStore::open(SqliteStorage::new(conn));
        store.add(4, "written through").unwrap()
    };

    let conn = open_db(&path).unwrap();
    let store = MoodStore::open(SqliteStorage::new(conn));
    let all = store.get_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, created.id);
    assert_eq!(all[0].notes, "written through");
    assert_eq!(all[0].timestamp, created.timestamp);
}
