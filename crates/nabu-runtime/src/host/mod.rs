//! Host services queried by the scripted layer.
//!
//! The runtime itself never talks to the windowing system; whatever drives it
//! supplies a `Host` and the `runtime` namespace forwards display and GL
//! queries to it.

mod screen;

use std::ffi::{c_char, c_void};

pub use screen::ScreenInfo;

/// C-ABI symbol resolver: takes a NUL-terminated symbol name and returns its
/// address, or null when the symbol is unknown.
pub type ProcLoaderFn = unsafe extern "C" fn(name: *const c_char) -> *const c_void;

/// Native graphics-procedure resolver handed to the scripted layer as an
/// opaque pointer, so bundles can bind GL entry points dynamically.
#[derive(Debug, Copy, Clone)]
pub struct ProcResolver(ProcLoaderFn);

impl ProcResolver {
    pub fn new(loader: ProcLoaderFn) -> Self {
        Self(loader)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0 as *mut c_void
    }
}

/// Services the embedding driver provides to bundle scripts.
pub trait Host {
    /// Primary display snapshot, or `None` when no display is detected.
    fn screen_info(&self) -> Option<ScreenInfo>;

    /// GL symbol resolver, or `None` when the host has no GL context.
    fn proc_resolver(&self) -> Option<ProcResolver>;
}

/// Headless host: no display, no GL. Used by tests and tooling.
#[derive(Debug, Default)]
pub struct NullHost;

impl Host for NullHost {
    fn screen_info(&self) -> Option<ScreenInfo> {
        None
    }

    fn proc_resolver(&self) -> Option<ProcResolver> {
        None
    }
}
