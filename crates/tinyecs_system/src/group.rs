//! Signature-grouped systems.
//!
//! A [`SystemGroup`] holds two kinds of systems:
//!
//! - **global** systems, called with the scene alone;
//! - **subscribed** systems, registered under an explicit [`Signature`] and
//!   called with the rows of that signature's join.
//!
//! On [`SystemGroup::run`] every global system runs once, in registration
//! order. Then each signature is joined once and its rows are handed to every
//! system subscribed to it, in registration order. Signatures are visited in
//! the order they were first subscribed to.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use tinyecs_scene::{ComponentTypeId, Entity, Scene, SceneError, Signature};
use tracing::{debug, trace, warn};

use crate::id::{SystemId, SystemIdAllocator};

type GlobalSystem = Box<dyn FnMut(&mut Scene)>;
type SubscribedSystem<S> = Box<dyn FnMut(&mut Scene, &[(Entity, S)])>;

/// The systems subscribed to one signature, with their row type erased.
trait Subscription {
    fn signature(&self) -> &[ComponentTypeId];
    fn run(&mut self, scene: &mut Scene);
    fn destroy(&mut self, id: SystemId) -> bool;
    fn ids(&self) -> Vec<SystemId>;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Subscribers<S: Signature> {
    signature: Vec<ComponentTypeId>,
    systems: Vec<(SystemId, SubscribedSystem<S>)>,
}

impl<S: Signature> Subscribers<S> {
    fn new() -> Self {
        Self {
            signature: S::type_ids(),
            systems: Vec::new(),
        }
    }
}

impl<S: Signature> Subscription for Subscribers<S> {
    fn signature(&self) -> &[ComponentTypeId] {
        &self.signature
    }

    fn run(&mut self, scene: &mut Scene) {
        if self.systems.is_empty() {
            return;
        }
        let rows = match scene.match_rows::<S>() {
            Ok(rows) => rows,
            Err(err) => {
                warn!(%err, signature = ?self.signature, "skipping signature");
                return;
            }
        };
        trace!(signature = ?self.signature, rows = rows.len(), "signature joined");
        for (_, system) in &mut self.systems {
            system(scene, &rows);
        }
    }

    fn destroy(&mut self, id: SystemId) -> bool {
        let before = self.systems.len();
        self.systems.retain(|(sid, _)| *sid != id);
        self.systems.len() != before
    }

    fn ids(&self) -> Vec<SystemId> {
        self.systems.iter().map(|(id, _)| *id).collect()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Systems grouped by the component signature they subscribe to.
#[derive(Default)]
pub struct SystemGroup {
    ids: SystemIdAllocator,
    globals: Vec<(SystemId, GlobalSystem)>,
    subscriptions: Vec<Box<dyn Subscription>>,
    by_signature: HashMap<TypeId, usize>,
}

impl SystemGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system that takes only the scene.
    pub fn add_global<F>(&mut self, system: F) -> SystemId
    where
        F: FnMut(&mut Scene) + 'static,
    {
        let id = self.ids.allocate();
        self.globals.push((id, Box::new(system)));
        debug!(%id, "global system added");
        id
    }

    /// Register a system under signature `S`.
    ///
    /// The signature is always named by the caller, e.g.
    /// `group.add::<(Position, Velocity), _>(move_system)`.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidQuery`] if `S` names no component types.
    pub fn add<S, F>(&mut self, system: F) -> Result<SystemId, SceneError>
    where
        S: Signature,
        F: FnMut(&mut Scene, &[(Entity, S)]) + 'static,
    {
        if S::type_ids().is_empty() {
            return Err(SceneError::InvalidQuery);
        }

        let subscriptions = &mut self.subscriptions;
        let slot = *self
            .by_signature
            .entry(TypeId::of::<S>())
            .or_insert_with(|| {
                subscriptions.push(Box::new(Subscribers::<S>::new()));
                subscriptions.len() - 1
            });
        let subscribers = self.subscriptions[slot]
            .as_any_mut()
            .downcast_mut::<Subscribers<S>>()
            .expect("subscription stored under a foreign signature");

        let id = self.ids.allocate();
        subscribers.systems.push((id, Box::new(system)));
        debug!(%id, signature = ?subscribers.signature, "subscribed system added");
        Ok(id)
    }

    /// Remove a global or subscribed system. Returns `false` if it was not
    /// registered.
    pub fn destroy(&mut self, id: SystemId) -> bool {
        let before = self.globals.len();
        self.globals.retain(|(sid, _)| *sid != id);
        if self.globals.len() != before {
            debug!(%id, "global system destroyed");
            return true;
        }
        let removed = self
            .subscriptions
            .iter_mut()
            .any(|subscription| subscription.destroy(id));
        if removed {
            debug!(%id, "subscribed system destroyed");
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, id: SystemId) -> bool {
        self.globals.iter().any(|(sid, _)| *sid == id)
            || self
                .subscriptions
                .iter()
                .any(|subscription| subscription.ids().contains(&id))
    }

    /// Total number of registered systems, global and subscribed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.globals.len()
            + self
                .subscriptions
                .iter()
                .map(|subscription| subscription.ids().len())
                .sum::<usize>()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Signatures with at least one subscribed system, in visiting order.
    #[must_use]
    pub fn signatures(&self) -> Vec<Vec<ComponentTypeId>> {
        self.subscriptions
            .iter()
            .filter(|subscription| !subscription.ids().is_empty())
            .map(|subscription| subscription.signature().to_vec())
            .collect()
    }

    /// Run every global system, then every signature's subscribers.
    pub fn run(&mut self, scene: &mut Scene) {
        for (_, system) in &mut self.globals {
            system(scene);
        }
        for subscription in &mut self.subscriptions {
            subscription.run(scene);
        }
    }
}

impl std::fmt::Debug for SystemGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemGroup")
            .field(
                "globals",
                &self.globals.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            )
            .field("signatures", &self.signatures())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Position(i32);

    #[derive(Debug, Clone, PartialEq)]
    struct Velocity(i32);

    type Log = Rc<RefCell<Vec<String>>>;

    #[test]
    fn test_globals_run_before_subscribers() {
        let log = Log::default();
        let mut scene = Scene::new();
        scene.add_entity((Position(0), Velocity(1)));

        let mut group = SystemGroup::new();
        let sub_log = Rc::clone(&log);
        group
            .add::<(Position,), _>(move |_, rows| {
                sub_log.borrow_mut().push(format!("sub:{}", rows.len()));
            })
            .unwrap();
        let global_log = Rc::clone(&log);
        group.add_global(move |_| global_log.borrow_mut().push("global".to_string()));

        group.run(&mut scene);
        assert_eq!(*log.borrow(), vec!["global", "sub:1"]);
    }

    #[test]
    fn test_subscribers_share_one_join_in_registration_order() {
        let log = Log::default();
        let mut scene = Scene::new();
        scene.add_entity((Position(0), Velocity(1)));
        scene.add_entity((Position(5),));

        let mut group = SystemGroup::new();
        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            group
                .add::<(Position, Velocity), _>(move |_, rows| {
                    log.borrow_mut().push(format!("{name}:{}", rows.len()));
                })
                .unwrap();
        }
        group.run(&mut scene);

        assert_eq!(*log.borrow(), vec!["first:1", "second:1"]);
        assert_eq!(group.signatures().len(), 1);
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_subscriber_writes_back_through_scene() {
        let mut scene = Scene::new();
        let mover = scene.add_entity((Position(0), Velocity(2)));
        let still = scene.add_entity((Position(7),));

        let mut group = SystemGroup::new();
        group
            .add::<(Position, Velocity), _>(|scene, rows| {
                for (entity, (pos, vel)) in rows {
                    scene.add_component(*entity, Position(pos.0 + vel.0));
                }
            })
            .unwrap();

        group.run(&mut scene);
        group.run(&mut scene);
        assert_eq!(scene.get_component::<Position>(mover), Ok(&Position(4)));
        assert_eq!(scene.get_component::<Position>(still), Ok(&Position(7)));
    }

    #[test]
    fn test_rows_are_a_snapshot() {
        let mut scene = Scene::new();
        scene.add_entity((Position(1),));
        scene.add_entity((Position(2),));

        let mut group = SystemGroup::new();
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);
        group
            .add::<(Position,), _>(move |scene, rows| {
                // Destroying everything mid-iteration leaves `rows` intact.
                for (entity, _) in rows {
                    scene.destroy_entity(*entity);
                }
                *counter.borrow_mut() += rows.len();
            })
            .unwrap();

        group.run(&mut scene);
        assert_eq!(*seen.borrow(), 2);
        assert_eq!(scene.component_count::<Position>(), 0);
    }

    #[test]
    fn test_distinct_signature_order_is_distinct_subscription() {
        let mut group = SystemGroup::new();
        group.add::<(Position, Velocity), _>(|_, _| {}).unwrap();
        group.add::<(Velocity, Position), _>(|_, _| {}).unwrap();
        assert_eq!(group.signatures().len(), 2);
    }

    #[test]
    fn test_signatures_run_in_first_subscription_order() {
        let log = Log::default();
        let mut scene = Scene::new();
        scene.add_entity((Position(0), Velocity(1)));

        let mut group = SystemGroup::new();
        let velocity_log = Rc::clone(&log);
        group
            .add::<(Velocity,), _>(move |_, _| velocity_log.borrow_mut().push("velocity".into()))
            .unwrap();
        let position_log = Rc::clone(&log);
        group
            .add::<(Position,), _>(move |_, _| position_log.borrow_mut().push("position".into()))
            .unwrap();
        // Joins an existing signature, so it runs with the first one.
        let late_log = Rc::clone(&log);
        group
            .add::<(Velocity,), _>(move |_, _| late_log.borrow_mut().push("velocity late".into()))
            .unwrap();

        group.run(&mut scene);
        assert_eq!(*log.borrow(), vec!["velocity", "velocity late", "position"]);
        assert_eq!(
            group.signatures(),
            vec![
                vec![ComponentTypeId::of::<Velocity>()],
                vec![ComponentTypeId::of::<Position>()],
            ]
        );
    }

    #[test]
    fn test_empty_signature_rejected() {
        let mut group = SystemGroup::new();
        assert_eq!(
            group.add::<(), _>(|_, _| {}),
            Err(SceneError::InvalidQuery)
        );
        assert!(group.is_empty());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let log = Log::default();
        let mut scene = Scene::new();
        scene.add_entity((Position(0),));

        let mut group = SystemGroup::new();
        let global_log = Rc::clone(&log);
        let global = group.add_global(move |_| global_log.borrow_mut().push("g".into()));
        let sub_log = Rc::clone(&log);
        let sub = group
            .add::<(Position,), _>(move |_, _| sub_log.borrow_mut().push("s".into()))
            .unwrap();

        assert!(group.contains(global) && group.contains(sub));
        assert!(group.destroy(global));
        assert!(!group.destroy(global));
        assert!(group.destroy(sub));
        assert!(!group.destroy(sub));
        assert!(!group.destroy(SystemId(999)));
        assert!(group.is_empty());
        assert!(group.signatures().is_empty());

        group.run(&mut scene);
        assert!(log.borrow().is_empty());
    }
}
