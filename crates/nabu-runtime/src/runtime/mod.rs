//! The runtime core.
//!
//! Owns the Lua state, the listener hub, and one reusable argument table per
//! event kind. The external driver calls `dispatch_frame`/`dispatch_resize`;
//! bundle scripts call into the `runtime` namespace installed at boot.

mod bindings;
mod dispatch;

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use mlua::{Lua, LuaOptions, RegistryKey, StdLib, Table};

use crate::events::{EventKind, ListenerHub};
use crate::host::Host;

/// Embedded Lua runtime driven by a host loop.
///
/// Single-threaded by construction: the runtime and everything it owns are
/// touched only from the thread running the host's event loop. Dispatch is
/// synchronous; a listener that never returns blocks the host loop, which is
/// a known hazard of the design rather than something this layer guards
/// against.
pub struct Runtime {
    lua: Lua,
    hub: Rc<RefCell<ListenerHub>>,
    // One pinned argument table per event kind, created at boot and reused
    // for every dispatch so listeners cost no allocation per frame. Emptied
    // by close().
    args: [Option<RegistryKey>; EventKind::COUNT],
    closed: bool,
}

impl Runtime {
    /// Creates the Lua state, pins the argument tables, and installs the
    /// `runtime` namespace backed by `host`.
    ///
    /// Opens the safe standard library set; `utf8` is named explicitly since
    /// bundles rely on it for text handling.
    pub fn new(host: Rc<dyn Host>) -> Result<Self> {
        let lua = Lua::new_with(StdLib::ALL_SAFE | StdLib::UTF8, LuaOptions::default())
            .context("failed to create Lua state")?;

        let hub = Rc::new(RefCell::new(ListenerHub::new()));

        let mut args: [Option<RegistryKey>; EventKind::COUNT] = [None, None];
        for kind in EventKind::ALL {
            let table = lua
                .create_table()
                .context("failed to create event argument table")?;
            let key = lua
                .create_registry_value(table)
                .context("failed to pin event argument table")?;
            args[kind.index()] = Some(key);
        }

        bindings::install(&lua, &hub, host).context("failed to install runtime namespace")?;

        log::debug!("runtime booted");

        Ok(Self {
            lua,
            hub,
            args,
            closed: false,
        })
    }

    /// Reads and executes the bundle script.
    ///
    /// A failing bundle is returned as an error rather than handled here;
    /// the driver decides whether that is fatal.
    pub fn run_bundle(&self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read bundle {}", path.display()))?;

        self.lua
            .load(&source)
            .set_name(path.display().to_string())
            .exec()
            .with_context(|| format!("bundle {} raised an error", path.display()))
    }

    /// Dispatches one frame tick to every `enterFrame` listener.
    ///
    /// All listeners of a pass observe the same argument table; it is
    /// overwritten in place on the next dispatch, so scripted code must not
    /// retain it expecting historical values.
    pub fn dispatch_frame(&self, time: f64, width: u32, height: u32) {
        self.dispatch(EventKind::EnterFrame, &|table| {
            table.set("time", time)?;
            table.set("width", width)?;
            table.set("height", height)
        });
    }

    /// Dispatches a window-resize notification to every `resizeWindow`
    /// listener.
    pub fn dispatch_resize(&self, width: u32, height: u32) {
        self.dispatch(EventKind::ResizeWindow, &|table| {
            table.set("width", width)?;
            table.set("height", height)
        });
    }

    fn dispatch(&self, kind: EventKind, populate: &dyn Fn(&Table) -> mlua::Result<()>) {
        // After close() the argument tables are gone and dispatch is inert.
        let Some(key) = &self.args[kind.index()] else {
            return;
        };
        let Ok(table) = self.lua.registry_value::<Table>(key) else {
            return;
        };

        dispatch::run_pass(&self.lua, &self.hub, kind, &table, populate);
    }

    /// Releases every pinned reference held by the runtime.
    ///
    /// Safe to call more than once; the second call is a no-op. Invoked from
    /// `Drop` when not already called. The Lua state itself is destroyed when
    /// the runtime value drops.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        for slot in &mut self.args {
            if let Some(key) = slot.take() {
                let _ = self.lua.remove_registry_value(key);
            }
        }

        for key in self.hub.borrow_mut().drain_keys() {
            let _ = self.lua.remove_registry_value(key);
        }

        log::debug!("runtime closed");
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.close();
    }
}
