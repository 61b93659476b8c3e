use std::cell::RefCell;

use mlua::{Function, Lua, RegistryKey, Table};

use crate::events::{EventKind, ListenerHub};

enum Action {
    Release(Option<RegistryKey>),
    Invoke(Function),
}

/// Runs one dispatch pass over the registry for `kind`.
///
/// Iterates from the newest record to the oldest so that erase-by-index
/// compaction never skips or revisits a not-yet-visited entry. Invalid or
/// stale records are released and removed; live ones get the shared argument
/// table refreshed via `populate` and are then called with it.
///
/// The registry borrow is dropped before the callback runs, so listeners may
/// register or unregister listeners of any kind mid-pass. Records appended
/// mid-pass land past the scan's starting index and are first visited on the
/// next pass.
///
/// A callback error is reported to the log and never stops the pass.
pub(super) fn run_pass(
    lua: &Lua,
    hub: &RefCell<ListenerHub>,
    kind: EventKind,
    args: &Table,
    populate: &dyn Fn(&Table) -> mlua::Result<()>,
) {
    let mut index = hub.borrow().len(kind);

    while index > 0 {
        index -= 1;

        let action = {
            let mut hub = hub.borrow_mut();
            let records = hub.records_mut(kind);
            let Some(record) = records.get_mut(index) else {
                continue;
            };

            if !record.is_valid() {
                let key = record.take_key();
                records.remove(index);
                Action::Release(key)
            } else {
                // A pinned reference that no longer resolves to a function
                // means the record went stale; purge it without calling.
                match record
                    .key()
                    .and_then(|key| lua.registry_value::<Function>(key).ok())
                {
                    Some(callback) => Action::Invoke(callback),
                    None => {
                        let key = record.take_key();
                        records.remove(index);
                        Action::Release(key)
                    }
                }
            }
        };

        match action {
            Action::Release(Some(key)) => {
                let _ = lua.remove_registry_value(key);
            }
            Action::Release(None) => {}
            Action::Invoke(callback) => {
                let outcome = populate(args).and_then(|()| callback.call::<()>(args.clone()));
                if let Err(err) = outcome {
                    log::error!("{} listener raised an error: {err}", kind.name());
                }
            }
        }
    }
}
