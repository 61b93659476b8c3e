use std::cell::RefCell;
use std::rc::Rc;

use mlua::{Function, LightUserData, Lua, Value};

use crate::events::{EventKind, ListenerHub};
use crate::host::Host;

/// Installs the global `runtime` namespace exposed to bundle scripts.
///
/// Every entry point is a closure over the listener hub and the host handle,
/// so a call site can never observe a missing owning instance.
pub(super) fn install(
    lua: &Lua,
    hub: &Rc<RefCell<ListenerHub>>,
    host: Rc<dyn Host>,
) -> mlua::Result<()> {
    let namespace = lua.create_table()?;

    let add_hub = hub.clone();
    namespace.set(
        "addEventListener",
        lua.create_function(move |lua, (name, callback): (String, Function)| {
            let kind = parse_kind(&name)?;
            let key = lua.create_registry_value(callback)?;
            Ok(add_hub.borrow_mut().register(kind, key))
        })?,
    )?;

    let remove_hub = hub.clone();
    namespace.set(
        "removeEventListener",
        lua.create_function(move |_, (name, id): (String, u64)| {
            let kind = parse_kind(&name)?;
            remove_hub.borrow_mut().unregister(kind, id);
            Ok(())
        })?,
    )?;

    let screen_host = host.clone();
    namespace.set(
        "getScreenInfo",
        lua.create_function(move |lua, ()| match screen_host.screen_info() {
            Some(info) => {
                let table = lua.create_table()?;
                table.set("dpi", info.dpi())?;
                Ok(Value::Table(table))
            }
            None => Ok(Value::Nil),
        })?,
    )?;

    namespace.set(
        "getProcAddress",
        lua.create_function(move |_, ()| {
            Ok(match host.proc_resolver() {
                Some(resolver) => Value::LightUserData(LightUserData(resolver.as_ptr())),
                None => Value::Nil,
            })
        })?,
    )?;

    lua.globals().set("runtime", namespace)
}

fn parse_kind(name: &str) -> mlua::Result<EventKind> {
    EventKind::from_name(name)
        .ok_or_else(|| mlua::Error::RuntimeError(format!("unknown event name: {name:?}")))
}
