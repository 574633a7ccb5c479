//! Hub registry database.
//!
//! A single SQLite file holding projects and hubs. Opened once at startup
//! and shared behind the registry's connection lock.

use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;

/// Open (or create) the registry database at `path` and run migrations.
/// Missing parent directories are created.
pub fn open_app_database(path: &Path) -> Result<Connection, DatabaseError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    run_app_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory registry database (for testing).
pub fn open_memory_app_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    run_app_migrations(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Versioned schema scripts, applied in order.
const MIGRATIONS: &[(i64, &str)] = &[(
    1,
    include_str!("../../resources/migrations/001_hub_registry.sql"),
)];

fn run_app_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let applied = schema_version(conn)?;

    for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > applied) {
        tracing::info!(version, "Applying registry migration");
        conn.execute_batch(sql)
            .map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
    }

    Ok(())
}

/// Highest applied migration, 0 on a fresh database.
fn schema_version(conn: &Connection) -> Result<i64, DatabaseError> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(0);
    }
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn fresh_database_gets_registry_schema() {
        let conn = open_memory_app_database().unwrap();
        assert_eq!(table_names(&conn), ["hubs", "projects", "schema_version"]);
        assert_eq!(schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn rerunning_migrations_is_a_no_op() {
        let conn = open_memory_app_database().unwrap();
        run_app_migrations(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let conn = open_memory_app_database().unwrap();
        let err = conn
            .execute(
                "INSERT INTO hubs (uuid, name, project_id) VALUES ('orphan', 'x', 999)",
                [],
            )
            .unwrap_err();
        assert!(err.to_string().contains("FOREIGN KEY"));
    }

    #[test]
    fn file_database_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("hubguard.db");

        let conn = open_app_database(&path).unwrap();
        assert!(path.exists());
        assert_eq!(table_names(&conn).len(), 3);
    }

    #[test]
    fn reopening_file_database_keeps_schema() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hubguard.db");

        drop(open_app_database(&path).unwrap());
        let conn = open_app_database(&path).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 1);
    }
}
