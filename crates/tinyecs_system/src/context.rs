//! Per-tick execution context provided to list systems.

use tinyecs_scene::Scene;

use crate::id::SystemId;
use crate::list::SystemList;

/// Context handed to a [`SystemList`] system on each tick.
///
/// Besides the scene, the context exposes the list that is running the
/// system. Systems registered or destroyed through it take effect from the
/// next tick; the current tick keeps running the set of systems it started
/// with.
pub struct TickContext<'a> {
    /// The scene being updated.
    pub scene: &'a mut Scene,
    /// The list running this tick.
    pub systems: &'a mut SystemList,
    pub(crate) tick_id: u64,
    pub(crate) system: SystemId,
}

impl TickContext<'_> {
    /// The tick counter of the running list, starting at 1.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Handle of the system currently executing.
    #[must_use]
    pub fn system_id(&self) -> SystemId {
        self.system
    }
}

impl std::fmt::Debug for TickContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickContext")
            .field("tick_id", &self.tick_id)
            .field("system", &self.system)
            .finish_non_exhaustive()
    }
}
