use super::ProjectKey;

/// A registered field device.
///
/// `uuid` is the identity token presented in `X-HUB-UUID`. Liveness
/// fields are written by the hub identity guard on every authenticated
/// request; everything else is set by provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hub {
    pub uuid: String,
    pub name: String,
    pub project_key: ProjectKey,
    /// Server time of the last authenticated request, seconds since epoch. 0 = never seen.
    pub last_seen_ts: i64,
    /// Device clock as reported in `X-HUB-TIME`, kept verbatim.
    pub last_hub_time: Option<String>,
}

impl Hub {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>, project_key: ProjectKey) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            project_key,
            last_seen_ts: 0,
            last_hub_time: None,
        }
    }

    /// Whether this hub belongs to the project named by a path parameter.
    pub fn is_member_of(&self, project_key: &str) -> bool {
        self.project_key.matches(project_key)
    }

    /// Apply a liveness update in place.
    pub fn apply(&mut self, update: &LivenessUpdate) {
        self.last_seen_ts = update.seen_at;
        if let Some(hub_time) = &update.hub_time {
            self.last_hub_time = Some(hub_time.clone());
        }
    }
}

/// Bookkeeping recorded for a hub on successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessUpdate {
    pub seen_at: i64,
    /// `None` leaves the stored device clock untouched.
    pub hub_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_hub_has_never_been_seen() {
        let hub = Hub::new("abc-123", "Lobby", ProjectKey::from("42"));
        assert_eq!(hub.last_seen_ts, 0);
        assert!(hub.last_hub_time.is_none());
    }

    #[test]
    fn membership_compares_string_renderings() {
        let numeric = Hub::new("abc-123", "Lobby", ProjectKey::Numeric(7));
        assert!(numeric.is_member_of("7"));
        assert!(!numeric.is_member_of("07"));

        let text = Hub::new("abc-124", "Lab", ProjectKey::from("42"));
        assert!(text.is_member_of("42"));
        assert!(!text.is_member_of("99"));
    }

    #[test]
    fn apply_without_hub_time_keeps_previous_value() {
        let mut hub = Hub::new("abc-123", "Lobby", ProjectKey::Numeric(1));
        hub.apply(&LivenessUpdate {
            seen_at: 100,
            hub_time: Some("1700000000123".into()),
        });
        hub.apply(&LivenessUpdate {
            seen_at: 200,
            hub_time: None,
        });

        assert_eq!(hub.last_seen_ts, 200);
        assert_eq!(hub.last_hub_time.as_deref(), Some("1700000000123"));
    }
}
