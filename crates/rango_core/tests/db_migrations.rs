use rango_core::db::migrations::{apply_migrations, latest_version};
use rango_core::db::{open_db_in_memory, DbError};
use rango_core::{RepoError, SqliteEventRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in [
        "events",
        "food_items",
        "families",
        "assignments",
        "assignment_items",
    ] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn applying_migrations_twice_is_idempotent() {
    let mut conn = open_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    let err = SqliteEventRepository::try_new(&mut conn)
        .err()
        .expect("unmigrated connection must be rejected");
    assert!(matches!(err, RepoError::MissingRequiredTable("events")));
}

#[test]
fn deleting_event_cascades_to_its_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO events (uuid, title, event_date) VALUES ('e1', 'Picnic', '2026-03-01');
         INSERT INTO food_items (uuid, event_uuid, position, name, quantity)
             VALUES ('i1', 'e1', 0, 'Soda', 2);
         INSERT INTO families (uuid, event_uuid, position, name) VALUES ('f1', 'e1', 0, 'A');
         INSERT INTO assignments (event_uuid, position, family_uuid, family_name)
             VALUES ('e1', 0, 'f1', 'A');
         INSERT INTO assignment_items (event_uuid, assignment_position, item_position, label)
             VALUES ('e1', 0, 0, 'Soda (1)');
         DELETE FROM events WHERE uuid = 'e1';",
    )
    .unwrap();

    for table in ["food_items", "families", "assignments", "assignment_items"] {
        let rows: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(rows, 0, "rows left in {table}");
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
