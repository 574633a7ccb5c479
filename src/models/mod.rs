pub mod hub;
pub mod project;

pub use hub::{Hub, LivenessUpdate};
pub use project::{Project, ProjectKey};
