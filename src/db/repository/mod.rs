//! Repository layer: entity-scoped database operations.
//!
//! Function-based: every operation takes a borrowed `Connection` so callers
//! decide how the connection is shared.

mod hub_registry;

pub use hub_registry::*;
