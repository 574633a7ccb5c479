//! Shared application state for the hub API.
//!
//! `CoreState` owns the configured guards and the hub registry. It is built
//! once at startup and wrapped in `Arc`; every request sees the same instance.

use std::sync::Arc;

use crate::auth::{AppKeyGuard, GodKeyGuard, HubIdentityGuard, ProjectMembershipGuard, SharedSecret};
use crate::clock::{Clock, SystemClock};
use crate::config::Settings;
use crate::registry::HubRegistry;

pub struct CoreState {
    pub app_key: AppKeyGuard,
    pub god_key: GodKeyGuard,
    pub hub_identity: HubIdentityGuard,
    pub membership: ProjectMembershipGuard,
    registry: Arc<dyn HubRegistry>,
}

impl CoreState {
    pub fn new(
        app_key: SharedSecret,
        god_key: SharedSecret,
        registry: Arc<dyn HubRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let god_key = GodKeyGuard::new(god_key);
        Self {
            app_key: AppKeyGuard::new(app_key),
            hub_identity: HubIdentityGuard::new(registry.clone(), clock),
            membership: ProjectMembershipGuard::new(god_key.clone(), registry.clone()),
            god_key,
            registry,
        }
    }

    /// Build from loaded settings with the wall clock.
    pub fn from_settings(settings: &Settings, registry: Arc<dyn HubRegistry>) -> Self {
        Self::new(
            settings.app_key.clone(),
            settings.god_key.clone(),
            registry,
            Arc::new(SystemClock),
        )
    }

    pub fn registry(&self) -> &dyn HubRegistry {
        self.registry.as_ref()
    }
}
