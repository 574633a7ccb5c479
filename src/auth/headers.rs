//! Credential header names and readers.
//!
//! `HeaderMap` lookups are case-insensitive, so `X-HUB-UUID`, `x-hub-uuid`
//! and `X-Hub-Uuid` are the same header.
//!
//! Header values are decoded one byte per `char` (ISO-8859-1), so every
//! value `HeaderValue` accepts maps to a distinct string and back.

use axum::http::{HeaderMap, HeaderValue};

pub const APP_KEY: &str = "x-appkey";
pub const GOD_KEY: &str = "x-godkey";
pub const HUB_UUID: &str = "x-hub-uuid";
pub const HUB_TIME: &str = "x-hub-time";

/// The presented hub identity token.
pub fn hub_uuid(headers: &HeaderMap) -> Option<String> {
    headers.get(HUB_UUID).map(latin1)
}

/// The device-reported clock, verbatim. Never parsed or range-checked.
pub fn hub_time(headers: &HeaderMap) -> Option<String> {
    headers.get(HUB_TIME).map(latin1)
}

fn latin1(value: &HeaderValue) -> String {
    value.as_bytes().iter().map(|&b| char::from(b)).collect()
}
