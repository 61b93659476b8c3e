//! Event kinds and the listener registry.

mod kind;
mod registry;

pub use kind::EventKind;
pub use registry::{ListenerHub, ListenerRecord};
