//! Core [`Component`] trait and component type identity.
//!
//! Any `'static` value can be stored as a component; the blanket
//! implementation below means callers never implement [`Component`] by hand.
//! Storage is keyed by [`ComponentTypeId`], which wraps the compiler's
//! [`TypeId`] so two distinct Rust types can never share a table.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A unique identifier for a component type.
///
/// Identity is the Rust [`TypeId`]; the type name travels along for log lines
/// and error messages and takes no part in comparisons.
#[derive(Debug, Clone, Copy)]
pub struct ComponentTypeId {
    id: TypeId,
    name: &'static str,
}

impl ComponentTypeId {
    /// Returns the [`ComponentTypeId`] for component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified Rust type name, e.g. `"game::Position"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentTypeId {}

impl Hash for ComponentTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for ComponentTypeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComponentTypeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// The core component trait.
///
/// Every `'static` type is a component. The trait exists so signatures read
/// `T: Component` and so type identity has a single home.
///
/// # Examples
///
/// ```rust
/// use tinyecs_component::{Component, ComponentTypeId};
///
/// #[derive(Debug, Clone)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// assert_eq!(Health::component_type_id(), ComponentTypeId::of::<Health>());
/// ```
pub trait Component: Any {
    /// A human-readable name for this component type.
    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId
    where
        Self: Sized,
    {
        ComponentTypeId::of::<Self>()
    }
}

impl<T: Any> Component for T {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Health;

    #[derive(Debug, Clone)]
    struct Velocity;

    #[test]
    fn test_component_type_id_is_stable() {
        assert_eq!(Health::component_type_id(), Health::component_type_id());
        assert_eq!(Health::component_type_id(), ComponentTypeId::of::<Health>());
    }

    #[test]
    fn test_component_type_id_differs_between_types() {
        assert_ne!(
            Health::component_type_id(),
            Velocity::component_type_id()
        );
        assert_ne!(
            ComponentTypeId::of::<u32>(),
            ComponentTypeId::of::<i32>()
        );
    }

    #[test]
    fn test_component_type_id_hashes_by_type() {
        let mut set = HashSet::new();
        set.insert(ComponentTypeId::of::<Health>());
        set.insert(ComponentTypeId::of::<Health>());
        set.insert(ComponentTypeId::of::<Velocity>());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_component_type_name() {
        assert!(Health::type_name().ends_with("Health"));
        assert_eq!(ComponentTypeId::of::<String>().to_string(), "alloc::string::String");
        assert_eq!(
            ComponentTypeId::of::<Health>().type_id(),
            TypeId::of::<Health>()
        );
    }
}
