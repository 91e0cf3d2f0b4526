//! Ordered system list.
//!
//! [`SystemList::tick`] calls every registered system once, in registration
//! order. The list is copied before the first system runs, so systems that
//! register or destroy systems through their [`TickContext`] never disturb
//! the tick in progress.

use std::cell::RefCell;
use std::rc::Rc;

use tinyecs_scene::Scene;
use tracing::{debug, warn};

use crate::context::TickContext;
use crate::group::SystemGroup;
use crate::id::{SystemId, SystemIdAllocator};

type SharedSystem = Rc<RefCell<dyn FnMut(&mut TickContext<'_>)>>;

/// A mutable, ordered collection of systems run once per tick.
#[derive(Default)]
pub struct SystemList {
    ids: SystemIdAllocator,
    tick_id: u64,
    systems: Vec<(SystemId, SharedSystem)>,
}

impl SystemList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system. It runs after every system registered before it.
    pub fn add<F>(&mut self, system: F) -> SystemId
    where
        F: FnMut(&mut TickContext<'_>) + 'static,
    {
        let id = self.ids.allocate();
        self.systems.push((id, Rc::new(RefCell::new(system))));
        debug!(%id, systems = self.systems.len(), "system added");
        id
    }

    /// Append a whole [`SystemGroup`] as a single system.
    pub fn add_group(&mut self, mut group: SystemGroup) -> SystemId {
        self.add(move |ctx| group.run(ctx.scene))
    }

    /// Remove a system. Returns `false` if it was not registered.
    pub fn destroy(&mut self, id: SystemId) -> bool {
        let Some(pos) = self.systems.iter().position(|(sid, _)| *sid == id) else {
            return false;
        };
        self.systems.remove(pos);
        debug!(%id, systems = self.systems.len(), "system destroyed");
        true
    }

    #[must_use]
    pub fn contains(&self, id: SystemId) -> bool {
        self.systems.iter().any(|(sid, _)| *sid == id)
    }

    /// Registered systems, in run order.
    #[must_use]
    pub fn ids(&self) -> Vec<SystemId> {
        self.systems.iter().map(|(id, _)| *id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Number of ticks started so far.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Run every system once against `scene`.
    ///
    /// A system that is already executing (because it called `tick` on this
    /// list from inside itself) is skipped rather than re-entered.
    pub fn tick(&mut self, scene: &mut Scene) {
        self.tick_id += 1;
        let tick_id = self.tick_id;
        let snapshot = self.systems.clone();

        debug!(tick_id, systems = snapshot.len(), "tick start");

        for (id, system) in snapshot {
            let Ok(mut run) = system.try_borrow_mut() else {
                warn!(%id, tick_id, "system already running, skipping re-entrant call");
                continue;
            };
            let mut ctx = TickContext {
                scene: &mut *scene,
                systems: &mut *self,
                tick_id,
                system: id,
            };
            (&mut *run)(&mut ctx);
        }
    }
}

impl std::fmt::Debug for SystemList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemList")
            .field("tick_id", &self.tick_id)
            .field("systems", &self.ids())
            .finish()
    }
}
