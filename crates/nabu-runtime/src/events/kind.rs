/// Native notifications a bundle can subscribe to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// Fired once per iteration of the host render loop.
    EnterFrame,
    /// Fired when the host window framebuffer changes size.
    ResizeWindow,
}

impl EventKind {
    pub const COUNT: usize = 2;
    pub const ALL: [EventKind; Self::COUNT] = [EventKind::EnterFrame, EventKind::ResizeWindow];

    /// Name used by the scripted layer when subscribing.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::EnterFrame => "enterFrame",
            EventKind::ResizeWindow => "resizeWindow",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            EventKind::EnterFrame => 0,
            EventKind::ResizeWindow => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(EventKind::from_name("mouseDown"), None);
        assert_eq!(EventKind::from_name(""), None);
        assert_eq!(EventKind::from_name("EnterFrame"), None);
    }
}
