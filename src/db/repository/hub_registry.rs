//! Repository functions for projects and hubs.
//!
//! Projects and hubs are provisioned out of band; the request path only
//! reads hubs and touches their liveness columns.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::{Hub, LivenessUpdate, Project};

// ═══════════════════════════════════════════════════════════
// Projects
// ═══════════════════════════════════════════════════════════

/// Insert a project. Fails with `ConstraintViolation` if the key is taken.
///
/// `7` and `"7"` count as the same key, since paths cannot tell them apart.
pub fn insert_project(conn: &Connection, project: &Project) -> Result<(), DatabaseError> {
    let clashes: i64 = conn.query_row(
        "SELECT COUNT(*) FROM projects WHERE CAST(project_key AS TEXT) = ?1",
        params![project.key.to_string()],
        |row| row.get(0),
    )?;
    if clashes > 0 {
        return Err(DatabaseError::ConstraintViolation(format!(
            "project key {} already exists",
            project.key
        )));
    }

    conn.execute(
        "INSERT INTO projects (project_key, name) VALUES (?1, ?2)",
        params![project.key, project.name],
    )
    .map_err(|e| constraint_or(e, || format!("project key {} already exists", project.key)))?;
    Ok(())
}

// ═══════════════════════════════════════════════════════════
// Hubs
// ═══════════════════════════════════════════════════════════

const HUB_COLUMNS: &str = "h.uuid, h.name, p.project_key, h.last_seen_ts, h.last_hub_time";

fn hub_from_row(row: &Row<'_>) -> rusqlite::Result<Hub> {
    Ok(Hub {
        uuid: row.get(0)?,
        name: row.get(1)?,
        project_key: row.get(2)?,
        last_seen_ts: row.get(3)?,
        last_hub_time: row.get(4)?,
    })
}

/// Insert a hub under an existing project.
pub fn insert_hub(conn: &Connection, hub: &Hub) -> Result<(), DatabaseError> {
    let project_id: Option<i64> = conn
        .query_row(
            "SELECT id FROM projects WHERE project_key = ?1",
            params![hub.project_key],
            |row| row.get(0),
        )
        .optional()?;

    let project_id = project_id.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "project".into(),
        id: hub.project_key.to_string(),
    })?;

    conn.execute(
        "INSERT INTO hubs (uuid, name, project_id, last_seen_ts, last_hub_time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            hub.uuid,
            hub.name,
            project_id,
            hub.last_seen_ts,
            hub.last_hub_time,
        ],
    )
    .map_err(|e| constraint_or(e, || format!("hub {} already exists", hub.uuid)))?;
    Ok(())
}

/// Get a hub by its identity token.
pub fn get_hub_by_uuid(conn: &Connection, uuid: &str) -> Result<Option<Hub>, DatabaseError> {
    let sql = format!(
        "SELECT {HUB_COLUMNS} FROM hubs h JOIN projects p ON p.id = h.project_id WHERE h.uuid = ?1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let hub = stmt.query_row(params![uuid], hub_from_row).optional()?;
    Ok(hub)
}

/// Record liveness for a hub. Returns `false` if no hub has that uuid.
///
/// `last_hub_time` is only overwritten when the update carries a value.
pub fn touch_hub(conn: &Connection, uuid: &str, update: &LivenessUpdate) -> Result<bool, DatabaseError> {
    let updated = conn.execute(
        "UPDATE hubs
         SET last_seen_ts = ?2, last_hub_time = COALESCE(?3, last_hub_time)
         WHERE uuid = ?1",
        params![uuid, update.seen_at, update.hub_time],
    )?;
    Ok(updated > 0)
}

/// List every hub, ordered by uuid.
pub fn list_hubs(conn: &Connection) -> Result<Vec<Hub>, DatabaseError> {
    let sql = format!(
        "SELECT {HUB_COLUMNS} FROM hubs h JOIN projects p ON p.id = h.project_id ORDER BY h.uuid"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], hub_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// List hubs whose project key renders as `project_key`.
///
/// Compared as text so a numeric key matches its decimal path form.
pub fn list_hubs_for_project(conn: &Connection, project_key: &str) -> Result<Vec<Hub>, DatabaseError> {
    let sql = format!(
        "SELECT {HUB_COLUMNS} FROM hubs h JOIN projects p ON p.id = h.project_id
         WHERE CAST(p.project_key AS TEXT) = ?1
         ORDER BY h.uuid"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![project_key], hub_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn constraint_or(err: rusqlite::Error, detail: impl FnOnce() -> String) -> DatabaseError {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            DatabaseError::ConstraintViolation(detail())
        }
        other => DatabaseError::Sqlite(other),
    }
}
