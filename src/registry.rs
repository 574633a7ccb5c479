//! Hub registry: the one shared, mutable collaborator of the guards.
//!
//! The guards only need three things from storage: find a hub by uuid,
//! record liveness for a hub, and list hubs. `touch` is a single call so
//! an implementation can make lookup-update-reload atomic. Neither
//! implementation here versions rows; concurrent touches of the same hub
//! are last-writer-wins.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, RwLock};

use rusqlite::Connection;

use crate::db::{self, repository, DatabaseError};
use crate::models::{Hub, LivenessUpdate, Project};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("registry lock poisoned")]
    LockPoisoned,
}

/// Lookup and bookkeeping interface consumed by the guards.
pub trait HubRegistry: Send + Sync {
    /// Find a hub by identity token. `Ok(None)` means unknown, not failure.
    fn find_by_uuid(&self, uuid: &str) -> Result<Option<Hub>, RegistryError>;

    /// Apply `update` to the hub and return the stored result,
    /// or `Ok(None)` if no hub has that uuid.
    fn touch(&self, uuid: &str, update: &LivenessUpdate) -> Result<Option<Hub>, RegistryError>;

    /// List hubs, optionally restricted to a project (string comparison).
    fn list_hubs(&self, project_key: Option<&str>) -> Result<Vec<Hub>, RegistryError>;
}

// ═══════════════════════════════════════════════════════════
// SQLite-backed registry
// ═══════════════════════════════════════════════════════════

/// Registry over a single SQLite connection.
///
/// The connection lock is held for the whole of `touch`, so the update and
/// the reload see the same row state.
pub struct SqliteHubRegistry {
    conn: Mutex<Connection>,
}

impl SqliteHubRegistry {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open (or create) the registry database at `path`.
    pub fn open(path: &Path) -> Result<Self, RegistryError> {
        Ok(Self::new(db::open_app_database(path)?))
    }

    /// Fresh in-memory registry (for testing).
    pub fn open_in_memory() -> Result<Self, RegistryError> {
        Ok(Self::new(db::open_memory_app_database()?))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, RegistryError> {
        self.conn.lock().map_err(|_| RegistryError::LockPoisoned)
    }

    /// Provision a project.
    pub fn add_project(&self, project: &Project) -> Result<(), RegistryError> {
        let conn = self.lock()?;
        repository::insert_project(&conn, project)?;
        Ok(())
    }

    /// Provision a hub under an existing project.
    pub fn add_hub(&self, hub: &Hub) -> Result<(), RegistryError> {
        let conn = self.lock()?;
        repository::insert_hub(&conn, hub)?;
        Ok(())
    }
}

impl HubRegistry for SqliteHubRegistry {
    fn find_by_uuid(&self, uuid: &str) -> Result<Option<Hub>, RegistryError> {
        let conn = self.lock()?;
        Ok(repository::get_hub_by_uuid(&conn, uuid)?)
    }

    fn touch(&self, uuid: &str, update: &LivenessUpdate) -> Result<Option<Hub>, RegistryError> {
        let conn = self.lock()?;
        if !repository::touch_hub(&conn, uuid, update)? {
            return Ok(None);
        }
        Ok(repository::get_hub_by_uuid(&conn, uuid)?)
    }

    fn list_hubs(&self, project_key: Option<&str>) -> Result<Vec<Hub>, RegistryError> {
        let conn = self.lock()?;
        let hubs = match project_key {
            Some(key) => repository::list_hubs_for_project(&conn, key)?,
            None => repository::list_hubs(&conn)?,
        };
        Ok(hubs)
    }
}

// ═══════════════════════════════════════════════════════════
// In-memory registry
// ═══════════════════════════════════════════════════════════

/// Registry kept entirely in process memory, keyed by uuid.
#[derive(Default)]
pub struct MemoryHubRegistry {
    hubs: RwLock<HashMap<String, Hub>>,
}

impl MemoryHubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a hub.
    pub fn insert(&self, hub: Hub) -> Result<(), RegistryError> {
        let mut hubs = self.hubs.write().map_err(|_| RegistryError::LockPoisoned)?;
        hubs.insert(hub.uuid.clone(), hub);
        Ok(())
    }
}

impl HubRegistry for MemoryHubRegistry {
    fn find_by_uuid(&self, uuid: &str) -> Result<Option<Hub>, RegistryError> {
        let hubs = self.hubs.read().map_err(|_| RegistryError::LockPoisoned)?;
        Ok(hubs.get(uuid).cloned())
    }

    fn touch(&self, uuid: &str, update: &LivenessUpdate) -> Result<Option<Hub>, RegistryError> {
        let mut hubs = self.hubs.write().map_err(|_| RegistryError::LockPoisoned)?;
        Ok(hubs.get_mut(uuid).map(|hub| {
            hub.apply(update);
            hub.clone()
        }))
    }

    fn list_hubs(&self, project_key: Option<&str>) -> Result<Vec<Hub>, RegistryError> {
        let hubs = self.hubs.read().map_err(|_| RegistryError::LockPoisoned)?;
        let mut listed: Vec<Hub> = hubs
            .values()
            .filter(|hub| project_key.map_or(true, |key| hub.is_member_of(key)))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.uuid.cmp(&b.uuid));
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::ProjectKey;

    fn sqlite_registry() -> SqliteHubRegistry {
        let registry = SqliteHubRegistry::open_in_memory().unwrap();
        registry.add_project(&Project::new("42", "Field study")).unwrap();
        registry.add_project(&Project::new(7_i64, "Pilot")).unwrap();
        registry
            .add_hub(&Hub::new("abc-123", "Lobby", ProjectKey::from("42")))
            .unwrap();
        registry
            .add_hub(&Hub::new("def-456", "Roof", ProjectKey::Numeric(7)))
            .unwrap();
        registry
    }

    fn memory_registry() -> MemoryHubRegistry {
        let registry = MemoryHubRegistry::new();
        registry
            .insert(Hub::new("abc-123", "Lobby", ProjectKey::from("42")))
            .unwrap();
        registry
            .insert(Hub::new("def-456", "Roof", ProjectKey::Numeric(7)))
            .unwrap();
        registry
    }

    fn exercise(registry: &dyn HubRegistry) {
        assert!(registry.find_by_uuid("ghost").unwrap().is_none());
        assert_eq!(
            registry.find_by_uuid("abc-123").unwrap().unwrap().name,
            "Lobby"
        );

        let update = LivenessUpdate {
            seen_at: 1_700_000_000,
            hub_time: Some("1699999999".into()),
        };
        let touched = registry.touch("abc-123", &update).unwrap().unwrap();
        assert_eq!(touched.last_seen_ts, 1_700_000_000);
        assert_eq!(touched.last_hub_time.as_deref(), Some("1699999999"));

        let reloaded = registry.find_by_uuid("abc-123").unwrap().unwrap();
        assert_eq!(reloaded, touched);

        assert!(registry.touch("ghost", &update).unwrap().is_none());

        let pilot = registry.list_hubs(Some("7")).unwrap();
        assert_eq!(pilot.len(), 1);
        assert_eq!(pilot[0].uuid, "def-456");
        assert_eq!(registry.list_hubs(None).unwrap().len(), 2);
    }

    #[test]
    fn sqlite_registry_contract() {
        exercise(&sqlite_registry());
    }

    #[test]
    fn memory_registry_contract() {
        exercise(&memory_registry());
    }

    #[test]
    fn sqlite_registry_keeps_high_latin1_text_intact() {
        let registry = sqlite_registry();
        registry
            .add_hub(&Hub::new("hub-\u{e9}", "Caf\u{e9}", ProjectKey::from("42")))
            .unwrap();

        let update = LivenessUpdate {
            seen_at: 9,
            hub_time: Some("1\u{e9}".into()),
        };
        let touched = registry.touch("hub-\u{e9}", &update).unwrap().unwrap();
        assert_eq!(touched.last_hub_time.as_deref(), Some("1\u{e9}"));
        assert!(registry.find_by_uuid("hub-\u{e8}").unwrap().is_none());
    }

    #[test]
    fn sqlite_registry_persists_to_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hubguard.db");

        {
            let registry = SqliteHubRegistry::open(&path).unwrap();
            registry.add_project(&Project::new("42", "Field study")).unwrap();
            registry
                .add_hub(&Hub::new("abc-123", "Lobby", ProjectKey::from("42")))
                .unwrap();
            let update = LivenessUpdate {
                seen_at: 55,
                hub_time: None,
            };
            registry.touch("abc-123", &update).unwrap();
        }

        let reopened = SqliteHubRegistry::open(&path).unwrap();
        let hub = reopened.find_by_uuid("abc-123").unwrap().unwrap();
        assert_eq!(hub.last_seen_ts, 55);
    }

    #[test]
    fn concurrent_touches_are_last_writer_wins() {
        let registry = Arc::new(sqlite_registry());

        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let update = LivenessUpdate {
                        seen_at: i,
                        hub_time: Some(i.to_string()),
                    };
                    registry.touch("abc-123", &update).unwrap().unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Whichever write landed last, the row is internally consistent.
        let hub = registry.find_by_uuid("abc-123").unwrap().unwrap();
        assert_eq!(hub.last_hub_time, Some(hub.last_seen_ts.to_string()));
    }
}
