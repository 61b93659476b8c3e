use mlua::RegistryKey;

use super::EventKind;

/// One registered listener: a pinned reference to the Lua callback, a stable
/// id handed back to the bundle, and a validity flag.
///
/// Unregistration only flips `valid`; the pinned reference is released by the
/// next dispatch pass that visits the record, or at shutdown.
#[derive(Debug)]
pub struct ListenerRecord {
    id: u64,
    key: Option<RegistryKey>,
    valid: bool,
}

impl ListenerRecord {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub(crate) fn key(&self) -> Option<&RegistryKey> {
        self.key.as_ref()
    }

    pub(crate) fn key_mut(&mut self) -> Option<&mut RegistryKey> {
        self.key.as_mut()
    }

    pub(crate) fn take_key(&mut self) -> Option<RegistryKey> {
        self.key.take()
    }
}

/// Listener registries for every event kind plus the shared id counter.
///
/// Ids are unique for the lifetime of the owning runtime and never reused,
/// so a stale id held by the bundle can at worst be a no-op.
#[derive(Debug)]
pub struct ListenerHub {
    registries: [Vec<ListenerRecord>; EventKind::COUNT],
    next_id: u64,
}

impl ListenerHub {
    pub fn new() -> Self {
        Self {
            registries: [Vec::new(), Vec::new()],
            next_id: 1,
        }
    }

    /// Appends a valid record for `kind` and returns its assigned id.
    pub fn register(&mut self, kind: EventKind, key: RegistryKey) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.registries[kind.index()].push(ListenerRecord {
            id,
            key: Some(key),
            valid: true,
        });

        id
    }

    /// Marks the record with `id` invalid in place.
    ///
    /// Unknown ids are ignored, so double-removal is harmless. Physical
    /// removal happens during the next dispatch pass over this registry.
    pub fn unregister(&mut self, kind: EventKind, id: u64) {
        if let Some(record) = self.registries[kind.index()]
            .iter_mut()
            .find(|record| record.id == id)
        {
            record.valid = false;
        }
    }

    pub fn len(&self, kind: EventKind) -> usize {
        self.registries[kind.index()].len()
    }

    pub fn is_empty(&self, kind: EventKind) -> bool {
        self.registries[kind.index()].is_empty()
    }

    pub fn records(&self, kind: EventKind) -> &[ListenerRecord] {
        &self.registries[kind.index()]
    }

    pub(crate) fn records_mut(&mut self, kind: EventKind) -> &mut Vec<ListenerRecord> {
        &mut self.registries[kind.index()]
    }

    /// Empties every registry and hands back the pinned references so the
    /// owner can release them against its Lua state.
    pub(crate) fn drain_keys(&mut self) -> Vec<RegistryKey> {
        let mut keys = Vec::new();
        for registry in &mut self.registries {
            for mut record in registry.drain(..) {
                if let Some(key) = record.take_key() {
                    keys.push(key);
                }
            }
        }
        keys
    }
}

impl Default for ListenerHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlua::{Function, Lua};

    fn callback_key(lua: &Lua) -> RegistryKey {
        let f = lua.load("function() end").eval::<Function>().unwrap();
        lua.create_registry_value(f).unwrap()
    }

    // ── ids ───────────────────────────────────────────────────────────────

    #[test]
    fn ids_start_at_one_and_increase_across_kinds() {
        let lua = Lua::new();
        let mut hub = ListenerHub::new();

        let a = hub.register(EventKind::EnterFrame, callback_key(&lua));
        let b = hub.register(EventKind::ResizeWindow, callback_key(&lua));
        let c = hub.register(EventKind::EnterFrame, callback_key(&lua));

        assert_eq!((a, b, c), (1, 2, 3));
    }

    // ── unregister ────────────────────────────────────────────────────────

    #[test]
    fn unregister_marks_invalid_without_removing() {
        let lua = Lua::new();
        let mut hub = ListenerHub::new();

        let id = hub.register(EventKind::EnterFrame, callback_key(&lua));
        hub.unregister(EventKind::EnterFrame, id);

        assert_eq!(hub.len(EventKind::EnterFrame), 1);
        assert!(!hub.records(EventKind::EnterFrame)[0].is_valid());
    }

    #[test]
    fn unregister_unknown_id_is_a_noop() {
        let lua = Lua::new();
        let mut hub = ListenerHub::new();

        let id = hub.register(EventKind::EnterFrame, callback_key(&lua));
        hub.unregister(EventKind::EnterFrame, 999);
        hub.unregister(EventKind::ResizeWindow, id);

        assert!(hub.records(EventKind::EnterFrame)[0].is_valid());
    }

    // ── drain ─────────────────────────────────────────────────────────────

    #[test]
    fn drain_keys_empties_every_registry() {
        let lua = Lua::new();
        let mut hub = ListenerHub::new();

        hub.register(EventKind::EnterFrame, callback_key(&lua));
        hub.register(EventKind::EnterFrame, callback_key(&lua));
        hub.register(EventKind::ResizeWindow, callback_key(&lua));

        let keys = hub.drain_keys();

        assert_eq!(keys.len(), 3);
        assert!(hub.is_empty(EventKind::EnterFrame));
        assert!(hub.is_empty(EventKind::ResizeWindow));
    }
}
