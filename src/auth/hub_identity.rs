use std::sync::Arc;

use axum::http::HeaderMap;

use super::error::AuthError;
use super::headers;
use crate::clock::Clock;
use crate::models::{Hub, LivenessUpdate};
use crate::registry::HubRegistry;

/// Authenticates a hub by `X-HUB-UUID` and records that it was seen.
///
/// A missing token and an unknown token are the same failure. On success
/// the hub's `last_seen_ts` is set to the server clock and, when the request
/// carries `X-HUB-TIME`, its raw value replaces `last_hub_time`. The update
/// is persisted before this returns. The god key is not honoured here.
#[derive(Clone)]
pub struct HubIdentityGuard {
    registry: Arc<dyn HubRegistry>,
    clock: Arc<dyn Clock>,
}

impl HubIdentityGuard {
    pub fn new(registry: Arc<dyn HubRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Hub, AuthError> {
        let uuid = headers::hub_uuid(headers).ok_or_else(|| {
            tracing::warn!("Request without hub identity");
            AuthError::IdentityUnknown
        })?;

        let update = LivenessUpdate {
            seen_at: self.clock.now_ts(),
            hub_time: headers::hub_time(headers),
        };

        match self.registry.touch(&uuid, &update)? {
            Some(hub) => {
                tracing::debug!(
                    hub_uuid = %hub.uuid,
                    project_key = %hub.project_key,
                    last_seen_ts = hub.last_seen_ts,
                    "Hub authenticated"
                );
                Ok(hub)
            }
            None => {
                tracing::warn!(hub_uuid = %uuid, "Unknown hub identity");
                Err(AuthError::IdentityUnknown)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::ProjectKey;
    use crate::registry::MemoryHubRegistry;
    use axum::http::HeaderValue;

    fn setup() -> (HubIdentityGuard, Arc<MemoryHubRegistry>, Arc<FixedClock>) {
        let registry = Arc::new(MemoryHubRegistry::new());
        registry
            .insert(Hub::new("abc-123", "Lobby", ProjectKey::from("42")))
            .unwrap();
        let clock = Arc::new(FixedClock::new(1_700_000_000));
        let guard = HubIdentityGuard::new(registry.clone(), clock.clone());
        (guard, registry, clock)
    }

    fn hub_headers(uuid: &'static str, hub_time: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(headers::HUB_UUID, HeaderValue::from_static(uuid));
        if let Some(t) = hub_time {
            headers.insert(headers::HUB_TIME, HeaderValue::from_static(t));
        }
        headers
    }

    #[test]
    fn known_hub_is_touched_and_returned() {
        let (guard, registry, _clock) = setup();

        let hub = guard
            .authenticate(&hub_headers("abc-123", Some("1699999990")))
            .unwrap();
        assert_eq!(hub.uuid, "abc-123");
        assert_eq!(hub.last_seen_ts, 1_700_000_000);
        assert_eq!(hub.last_hub_time.as_deref(), Some("1699999990"));

        let stored = registry.find_by_uuid("abc-123").unwrap().unwrap();
        assert_eq!(stored, hub);
    }

    #[test]
    fn last_seen_never_moves_backwards_across_requests() {
        let (guard, _registry, clock) = setup();

        let first = guard.authenticate(&hub_headers("abc-123", None)).unwrap();
        let same_second = guard.authenticate(&hub_headers("abc-123", None)).unwrap();
        clock.advance(3);
        let later = guard.authenticate(&hub_headers("abc-123", None)).unwrap();

        assert_eq!(same_second.last_seen_ts, first.last_seen_ts);
        assert_eq!(later.last_seen_ts, first.last_seen_ts + 3);
    }

    #[test]
    fn unparseable_hub_time_is_stored_as_is() {
        let (guard, _registry, _clock) = setup();
        let hub = guard
            .authenticate(&hub_headers("abc-123", Some("twelve o'clock")))
            .unwrap();
        assert_eq!(hub.last_hub_time.as_deref(), Some("twelve o'clock"));
    }

    #[test]
    fn absent_hub_time_keeps_previous_value() {
        let (guard, _registry, _clock) = setup();
        guard
            .authenticate(&hub_headers("abc-123", Some("111")))
            .unwrap();
        let hub = guard.authenticate(&hub_headers("abc-123", None)).unwrap();
        assert_eq!(hub.last_hub_time.as_deref(), Some("111"));
    }

    #[test]
    fn missing_and_unknown_identity_fail_the_same_way() {
        let (guard, registry, _clock) = setup();

        let missing = guard.authenticate(&HeaderMap::new()).unwrap_err();
        let unknown = guard.authenticate(&hub_headers("ghost", None)).unwrap_err();
        assert!(matches!(missing, AuthError::IdentityUnknown));
        assert!(matches!(unknown, AuthError::IdentityUnknown));

        // Nothing was touched.
        let stored = registry.find_by_uuid("abc-123").unwrap().unwrap();
        assert_eq!(stored.last_seen_ts, 0);
    }

    #[test]
    fn god_key_alone_does_not_identify_a_hub() {
        let (guard, _registry, _clock) = setup();
        let mut headers = HeaderMap::new();
        headers.insert(headers::GOD_KEY, HeaderValue::from_static("god-secret"));
        assert!(matches!(
            guard.authenticate(&headers).unwrap_err(),
            AuthError::IdentityUnknown
        ));
    }

    #[test]
    fn distinct_raw_hub_times_are_stored_distinctly() {
        let (guard, registry, _clock) = setup();

        let mut headers = hub_headers("abc-123", None);
        headers.insert(headers::HUB_TIME, HeaderValue::from_bytes(&[0x31, 0xE9]).unwrap());
        guard.authenticate(&headers).unwrap();
        let first = registry.find_by_uuid("abc-123").unwrap().unwrap().last_hub_time;

        headers.insert(headers::HUB_TIME, HeaderValue::from_bytes(&[0x31, 0xE8]).unwrap());
        guard.authenticate(&headers).unwrap();
        let second = registry.find_by_uuid("abc-123").unwrap().unwrap().last_hub_time;

        assert_eq!(first.as_deref(), Some("1\u{e9}"));
        assert_eq!(second.as_deref(), Some("1\u{e8}"));
    }

    #[test]
    fn non_ascii_hub_uuid_authenticates() {
        let (guard, registry, _clock) = setup();
        registry
            .insert(Hub::new("hub-\u{e9}", "Caf\u{e9}", ProjectKey::from("42")))
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(headers::HUB_UUID, HeaderValue::from_bytes(b"hub-\xE9").unwrap());
        let hub = guard.authenticate(&headers).unwrap();
        assert_eq!(hub.uuid, "hub-\u{e9}");
        assert_eq!(hub.last_seen_ts, 1_700_000_000);
    }
}
