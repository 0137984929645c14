use dayplan_core::db::{open_db, open_db_in_memory};
use dayplan_core::{
    RepoError, SnapshotRepository, SqliteSnapshotRepository, Todo, TodoStore, SNAPSHOT_KEY,
};
use rusqlite::Connection;

#[test]
fn load_with_no_stored_snapshot_yields_empty_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn save_then_load_reproduces_the_exact_collection() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    let todos = vec![Todo::new("newest"), Todo::new("older")];
    repo.save(&todos).unwrap();

    assert_eq!(repo.load().unwrap(), todos);
}

#[test]
fn save_overwrites_the_previous_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    repo.save(&[Todo::new("first write")]).unwrap();
    let replacement = vec![Todo::new("second write")];
    repo.save(&replacement).unwrap();

    let loaded = repo.load().unwrap();
    assert_eq!(loaded, replacement);

    let row_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(row_count, 1, "only the fixed slot key is used");
}

#[test]
fn malformed_stored_value_degrades_to_empty_list() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO slots (key, value) VALUES (?1, 'not valid json{');",
        [SNAPSHOT_KEY],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn store_over_a_corrupt_slot_starts_empty_and_recovers_on_first_write() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO slots (key, value) VALUES (?1, '[{\"id\":1}]');",
        [SNAPSHOT_KEY],
    )
    .unwrap();

    let mut store = TodoStore::new(SqliteSnapshotRepository::try_new(&conn).unwrap());
    assert!(store.todos().is_empty());

    store.add("fresh start");

    let reread = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let loaded = reread.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title, "fresh start");
}

#[test]
fn snapshot_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dayplan.db");

    {
        let conn = open_db(&path).unwrap();
        let mut store = TodoStore::new(SqliteSnapshotRepository::try_new(&conn).unwrap());
        store.add("persisted across sessions");
    }

    let conn = open_db(&path).unwrap();
    let store = TodoStore::new(SqliteSnapshotRepository::try_new(&conn).unwrap());
    assert_eq!(store.todos().len(), 1);
    assert_eq!(store.todos()[0].title, "persisted across sessions");
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteSnapshotRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => {
            assert!(expected_version > 0);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("raw connection must be rejected"),
    }
}
