use minitodo_core::db::{open_db, open_db_in_memory};
use minitodo_core::{SnapshotRepository, SqliteSnapshotRepository, Task, SNAPSHOT_SLOT};
use rusqlite::Connection;

fn in_memory_repo() -> SqliteSnapshotRepository {
    SqliteSnapshotRepository::new(open_db_in_memory().unwrap())
}

fn sample_tasks() -> Vec<Task> {
    let mut tasks = vec![Task::new("buy milk"), Task::new("walk dog")];
    tasks[0].completed = true;
    tasks
}

#[test]
fn load_from_absent_slot_returns_empty() {
    let repo = in_memory_repo();

    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn save_then_load_roundtrip_is_lossless() {
    let repo = in_memory_repo();
    let tasks = sample_tasks();

    repo.save(&tasks).unwrap();
    let loaded = repo.load().unwrap();

    assert_eq!(loaded, tasks);
}

#[test]
fn save_fully_overwrites_previous_snapshot() {
    let repo = in_memory_repo();
    let tasks = sample_tasks();

    repo.save(&tasks).unwrap();
    repo.save(&tasks[1..]).unwrap();

    let loaded = repo.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].text, "walk dog");
}

#[test]
fn save_of_empty_collection_persists_empty() {
    let repo = in_memory_repo();

    repo.save(&sample_tasks()).unwrap();
    repo.save(&[]).unwrap();

    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn unparseable_slot_value_degrades_to_empty() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO snapshots (name, value) VALUES (?1, ?2);",
        [SNAPSHOT_SLOT, "{not json"],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::new(conn);
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn slot_with_empty_task_text_degrades_to_empty() {
    let conn = open_db_in_memory().unwrap();
    let value = r#"{"tasks":[{"id":"11111111-2222-4333-8444-555555555555","text":"   "}]}"#;
    conn.execute(
        "INSERT INTO snapshots (name, value) VALUES (?1, ?2);",
        [SNAPSHOT_SLOT, value],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::new(conn);
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn slot_with_duplicate_ids_degrades_to_empty() {
    let conn = open_db_in_memory().unwrap();
    let value = r#"{"tasks":[
        {"id":"11111111-2222-4333-8444-555555555555","text":"one"},
        {"id":"11111111-2222-4333-8444-555555555555","text":"two"}
    ]}"#;
    conn.execute(
        "INSERT INTO snapshots (name, value) VALUES (?1, ?2);",
        [SNAPSHOT_SLOT, value],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::new(conn);
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn slot_value_on_disk_uses_expected_wire_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("minitodo.sqlite3");

    let repo = SqliteSnapshotRepository::new(open_db(&path).unwrap());
    let tasks = sample_tasks();
    repo.save(&tasks).unwrap();
    drop(repo);

    let conn = Connection::open(&path).unwrap();
    let raw: String = conn
        .query_row(
            "SELECT value FROM snapshots WHERE name = ?1;",
            [SNAPSHOT_SLOT],
            |row| row.get(0),
        )
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let wire_tasks = json["tasks"].as_array().unwrap();
    assert_eq!(wire_tasks.len(), 2);
    assert_eq!(wire_tasks[0]["id"], tasks[0].id.to_string());
    assert_eq!(wire_tasks[0]["text"], "buy milk");
    assert_eq!(wire_tasks[0]["completed"], true);
    assert!(wire_tasks[0]["createdAt"].is_string());
}

#[test]
fn reopening_database_preserves_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("minitodo.sqlite3");
    let tasks = sample_tasks();

    let repo = SqliteSnapshotRepository::new(open_db(&path).unwrap());
    repo.save(&tasks).unwrap();
    drop(repo);

    let repo = SqliteSnapshotRepository::new(open_db(&path).unwrap());
    assert_eq!(repo.load().unwrap(), tasks);
}
