//! Type-indexed component storage.
//!
//! The store keeps one [`Table`] per component type, each a plain
//! `HashMap<Entity, T>`. Tables are held behind the object-safe
//! [`ComponentTable`] trait so the store can walk all of them (entity
//! destruction, joins) without knowing their concrete types; typed access goes
//! through a checked downcast.
//!
//! Tables are created lazily on first insert. Every read treats a missing
//! table as an empty one.

use std::any::Any;
use std::collections::{HashMap, HashSet};

use tinyecs_component::{Component, ComponentTypeId, Entity};

/// Type-erased view of a single component table.
pub trait ComponentTable: Any {
    /// The component type stored in this table.
    fn component_type(&self) -> ComponentTypeId;

    /// Returns `true` if `entity` has a binding in this table.
    fn contains(&self, entity: Entity) -> bool;

    /// Drops the binding for `entity`. Returns `true` if one existed.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    /// Number of bindings.
    fn len(&self) -> usize;

    /// Returns `true` if the table holds no bindings.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the entities bound in this table, in no particular order.
    fn entities(&self) -> Box<dyn Iterator<Item = Entity> + '_>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Storage for every component of type `T`, keyed by entity.
#[derive(Debug)]
pub struct Table<T> {
    rows: HashMap<Entity, T>,
}

impl<T: Component> Table<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    /// Binds `value` to `entity`, returning the value it replaced.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        self.rows.insert(entity, value)
    }

    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.rows.get(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.rows.get_mut(&entity)
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.rows.remove(&entity)
    }

    /// Iterates `(entity, component)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.rows.iter().map(|(entity, value)| (*entity, value))
    }
}

impl<T: Component> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentTable for Table<T> {
    fn component_type(&self) -> ComponentTypeId {
        ComponentTypeId::of::<T>()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.rows.contains_key(&entity)
    }

    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.rows.remove(&entity).is_some()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn entities(&self) -> Box<dyn Iterator<Item = Entity> + '_> {
        Box::new(self.rows.keys().copied())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Mapping from component type to that type's [`Table`].
#[derive(Default)]
pub struct ComponentStore {
    tables: HashMap<ComponentTypeId, Box<dyn ComponentTable>>,
}

impl ComponentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Returns the table for `T`, if any binding of `T` was ever made.
    #[must_use]
    pub fn table<T: Component>(&self) -> Option<&Table<T>> {
        self.tables
            .get(&ComponentTypeId::of::<T>())
            .and_then(|table| table.as_any().downcast_ref::<Table<T>>())
    }

    fn table_mut<T: Component>(&mut self) -> Option<&mut Table<T>> {
        self.tables
            .get_mut(&ComponentTypeId::of::<T>())
            .and_then(|table| table.as_any_mut().downcast_mut::<Table<T>>())
    }

    fn table_or_insert<T: Component>(&mut self) -> &mut Table<T> {
        self.tables
            .entry(ComponentTypeId::of::<T>())
            .or_insert_with(|| Box::new(Table::<T>::new()))
            .as_any_mut()
            .downcast_mut::<Table<T>>()
            .expect("component table stored under a foreign type id")
    }

    /// Binds `value` to `entity`, replacing and returning any previous `T`.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) -> Option<T> {
        self.table_or_insert::<T>().insert(entity, value)
    }

    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.table::<T>().and_then(|table| table.get(entity))
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.table_mut::<T>().and_then(|table| table.get_mut(entity))
    }

    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.table_mut::<T>().and_then(|table| table.remove(entity))
    }

    #[must_use]
    pub fn contains<T: Component>(&self, entity: Entity) -> bool {
        self.contains_type(ComponentTypeId::of::<T>(), entity)
    }

    /// Untyped membership test.
    #[must_use]
    pub fn contains_type(&self, ty: ComponentTypeId, entity: Entity) -> bool {
        self.tables
            .get(&ty)
            .is_some_and(|table| table.contains(entity))
    }

    /// Clones every `T` in the store into a fresh `Vec`.
    #[must_use]
    pub fn values<T: Component + Clone>(&self) -> Vec<T> {
        self.table::<T>()
            .map(|table| table.iter().map(|(_, value)| value.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of bindings of type `ty`.
    #[must_use]
    pub fn len_of(&self, ty: ComponentTypeId) -> usize {
        self.tables.get(&ty).map_or(0, |table| table.len())
    }

    /// Removes `entity` from every table. Returns how many bindings were dropped.
    pub fn remove_entity(&mut self, entity: Entity) -> usize {
        self.tables
            .values_mut()
            .map(|table| table.remove_entity(entity))
            .filter(|removed| *removed)
            .count()
    }

    /// All entities holding at least one binding.
    #[must_use]
    pub fn entities(&self) -> HashSet<Entity> {
        self.tables
            .values()
            .flat_map(|table| table.entities())
            .collect()
    }

    /// Entities bound in every one of `types`.
    ///
    /// Walks the smallest requested table and probes the others. An empty
    /// `types` slice yields an empty set; rejecting that case is the caller's
    /// business.
    #[must_use]
    pub fn intersect(&self, types: &[ComponentTypeId]) -> HashSet<Entity> {
        let mut tables = Vec::with_capacity(types.len());
        for ty in types {
            match self.tables.get(ty) {
                Some(table) => tables.push(table.as_ref()),
                None => return HashSet::new(),
            }
        }
        tables.sort_by_key(|table| table.len());

        let Some((smallest, rest)) = tables.split_first() else {
            return HashSet::new();
        };
        smallest
            .entities()
            .filter(|entity| rest.iter().all(|table| table.contains(*entity)))
            .collect()
    }
}

impl std::fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.tables
                    .values()
                    .map(|table| (table.component_type().name(), table.len())),
            )
            .finish()
    }
}
