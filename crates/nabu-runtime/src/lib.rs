//! Nabu runtime crate.
//!
//! This crate owns the embedded Lua environment and the event plumbing that
//! connects it to a host application loop: listener registries, the dispatch
//! core, and the `runtime` namespace exposed to bundle scripts.

pub mod events;
pub mod host;
pub mod logging;
pub mod runtime;

pub use host::{Host, NullHost, ProcResolver, ScreenInfo};
pub use runtime::Runtime;
