//! System handles.

/// Handle returned when a system is registered; pass it back to remove the
/// system.
///
/// Handles are unique within the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(pub(crate) u64);

impl SystemId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "System({})", self.0)
    }
}

/// Issues [`SystemId`]s in registration order, starting at 1.
#[derive(Debug, Default)]
pub(crate) struct SystemIdAllocator {
    last: u64,
}

impl SystemIdAllocator {
    pub(crate) fn allocate(&mut self) -> SystemId {
        self.last += 1;
        SystemId(self.last)
    }
}
