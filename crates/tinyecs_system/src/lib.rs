//! # tinyecs_system
//!
//! Registries that invoke systems against a [`Scene`](tinyecs_scene::Scene).
//! Neither registry owns a timer; the host decides when a tick happens.
//!
//! - [`SystemList`] — ordered systems, each called with a [`TickContext`].
//!   Safe to modify from inside a running system.
//! - [`SystemGroup`] — global systems plus systems subscribed to an explicit
//!   component signature, fed one shared join per signature.
//!
//! ## Usage
//!
//! ```rust
//! use tinyecs_scene::Scene;
//! use tinyecs_system::{SystemGroup, SystemList};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Position(i32);
//! #[derive(Debug, Clone, PartialEq)]
//! struct Velocity(i32);
//!
//! let mut scene = Scene::new();
//! let ball = scene.add_entity((Position(0), Velocity(3)));
//!
//! let mut physics = SystemGroup::new();
//! physics.add::<(Position, Velocity), _>(|scene, rows| {
//!     for (entity, (pos, vel)) in rows {
//!         scene.add_component(*entity, Position(pos.0 + vel.0));
//!     }
//! })?;
//!
//! let mut systems = SystemList::new();
//! systems.add_group(physics);
//! systems.tick(&mut scene);
//! systems.tick(&mut scene);
//!
//! assert_eq!(scene.get_component::<Position>(ball)?, &Position(6));
//! # Ok::<(), tinyecs_scene::SceneError>(())
//! ```

pub mod context;
pub mod group;
pub mod id;
pub mod list;

pub use context::TickContext;
pub use group::SystemGroup;
pub use id::SystemId;
pub use list::SystemList;
