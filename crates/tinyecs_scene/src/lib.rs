//! # tinyecs_scene
//!
//! Component storage and queries.
//!
//! This crate provides:
//!
//! - [`ComponentStore`] — one lazily created table per component type.
//! - [`Bundle`] — component tuples accepted by [`Scene::add_entity`].
//! - [`Signature`] — component-type tuples naming a join.
//! - [`Scene`] — the entity/component CRUD and join façade.
//! - [`SceneError`] — the two ways a scene call can fail.
//!
//! ```rust
//! use tinyecs_scene::Scene;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Position(i32, i32);
//! #[derive(Debug, Clone, PartialEq)]
//! struct Velocity(i32, i32);
//!
//! let mut scene = Scene::new();
//! let mover = scene.add_entity((Position(0, 0), Velocity(1, 2)));
//! scene.add_entity((Position(5, 5),));
//!
//! for (entity, (pos, vel)) in scene.match_rows::<(Position, Velocity)>()? {
//!     scene.add_component(entity, Position(pos.0 + vel.0, pos.1 + vel.1));
//! }
//! assert_eq!(scene.get_component::<Position>(mover)?, &Position(1, 2));
//! # Ok::<(), tinyecs_scene::SceneError>(())
//! ```

pub mod bundle;
pub mod error;
pub mod query;
pub mod scene;
pub mod store;

pub use bundle::Bundle;
pub use error::SceneError;
pub use query::Signature;
pub use scene::Scene;
pub use store::{ComponentStore, ComponentTable, Table};
pub use tinyecs_component::{Component, ComponentTypeId, Entity};
