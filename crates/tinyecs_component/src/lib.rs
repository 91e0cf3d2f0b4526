//! # tinyecs_component
//!
//! The "E" and "C" of the runtime: what an entity is, how entity IDs are
//! allocated, and how component types are identified.
//!
//! This crate provides:
//!
//! - [`Component`] trait — blanket-implemented for every `'static` type.
//! - [`ComponentTypeId`] — the type tag component tables are keyed by.
//! - [`Entity`] — lightweight `u64` entity identifiers.
//! - [`EntityAllocator`] — strictly increasing, never-reused ID allocator.

pub mod component;
pub mod entity;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
