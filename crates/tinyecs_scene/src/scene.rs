//! The [`Scene`]: entity allocation plus component storage behind one façade.
//!
//! All query results are eager snapshots. A caller may iterate the `Vec` or
//! `HashSet` a query returned while adding and removing components on the same
//! scene; the collection it holds never changes underneath it.

use std::collections::HashSet;

use tinyecs_component::{Component, ComponentTypeId, Entity, EntityAllocator};
use tracing::trace;

use crate::bundle::Bundle;
use crate::error::SceneError;
use crate::query::Signature;
use crate::store::ComponentStore;

/// Owner of every component table and of the entity allocator.
#[derive(Debug, Default)]
pub struct Scene {
    allocator: EntityAllocator,
    store: ComponentStore,
}

impl Scene {
    /// Create an empty scene with its own ID sequence.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            store: ComponentStore::new(),
        }
    }

    // -- Entity lifecycle --

    /// Allocate a fresh entity and bind every component in `bundle` to it.
    ///
    /// Pass `()` to create an entity with no components. Such an entity is
    /// invisible to every query until something is bound to it.
    pub fn add_entity<B: Bundle>(&mut self, bundle: B) -> Entity {
        let entity = self.allocator.allocate();
        bundle.insert_into(&mut self.store, entity);
        trace!(%entity, components = B::type_ids().len(), "entity added");
        entity
    }

    /// Remove `entity` from every component table.
    ///
    /// Idempotent: unknown or already destroyed entities are a no-op. The ID
    /// is never handed out again.
    pub fn destroy_entity(&mut self, entity: Entity) {
        let removed = self.store.remove_entity(entity);
        trace!(%entity, removed, "entity destroyed");
    }

    /// Number of entities currently holding at least one component.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.store.entities().len()
    }

    /// Number of entity IDs this scene has handed out.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.allocator.count()
    }

    // -- Component operations --

    /// Bind `component` to `entity`, replacing any existing component of the
    /// same type. Returns the replaced value.
    ///
    /// The entity does not need to come from [`Scene::add_entity`].
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        self.store.insert(entity, component)
    }

    #[must_use]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.store.contains::<T>(entity)
    }

    /// Borrow the `T` bound to `entity`.
    ///
    /// # Errors
    ///
    /// [`SceneError::ComponentNotFound`] if `entity` has no `T`.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, SceneError> {
        self.store
            .get::<T>(entity)
            .ok_or_else(|| not_found::<T>(entity))
    }

    /// Mutably borrow the `T` bound to `entity`.
    ///
    /// # Errors
    ///
    /// [`SceneError::ComponentNotFound`] if `entity` has no `T`.
    pub fn get_component_mut<T: Component>(
        &mut self,
        entity: Entity,
    ) -> Result<&mut T, SceneError> {
        self.store
            .get_mut::<T>(entity)
            .ok_or_else(|| not_found::<T>(entity))
    }

    /// A copy of every `T` in the scene, in no particular order.
    #[must_use]
    pub fn get_components<T: Component + Clone>(&self) -> Vec<T> {
        self.store.values::<T>()
    }

    /// Number of entities carrying a `T`.
    #[must_use]
    pub fn component_count<T: Component>(&self) -> usize {
        self.store.len_of(ComponentTypeId::of::<T>())
    }

    /// Unbind the `T` from `entity` and return it.
    ///
    /// Removing a component that is not there returns `None` and changes
    /// nothing.
    pub fn destroy_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.store.remove::<T>(entity)
    }

    // -- Query --

    /// Entities that carry every one of `types`.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidQuery`] if `types` is empty.
    pub fn match_entities(&self, types: &[ComponentTypeId]) -> Result<HashSet<Entity>, SceneError> {
        if types.is_empty() {
            return Err(SceneError::InvalidQuery);
        }
        Ok(self.store.intersect(types))
    }

    /// [`Scene::match_entities`] with the types given as a signature tuple.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidQuery`] for the empty signature `()`.
    pub fn match_entities_of<S: Signature>(&self) -> Result<HashSet<Entity>, SceneError> {
        self.match_entities(&S::type_ids())
    }

    /// One tuple of cloned components per entity carrying every type in `S`,
    /// in the order `S` lists them. Rows come back in no particular order.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidQuery`] for the empty signature `()`.
    pub fn match_components<S: Signature>(&self) -> Result<Vec<S>, SceneError> {
        Ok(self
            .match_rows::<S>()?
            .into_iter()
            .map(|(_, row)| row)
            .collect())
    }

    /// Like [`Scene::match_components`], keeping each row's entity so callers
    /// can write results back.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidQuery`] for the empty signature `()`.
    pub fn match_rows<S: Signature>(&self) -> Result<Vec<(Entity, S)>, SceneError> {
        let entities = self.match_entities_of::<S>()?;
        Ok(entities
            .into_iter()
            .filter_map(|entity| S::fetch(&self.store, entity).map(|row| (entity, row)))
            .collect())
    }

    /// Read-only access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &ComponentStore {
        &self.store
    }
}

fn not_found<T: Component>(entity: Entity) -> SceneError {
    SceneError::ComponentNotFound {
        entity,
        component: T::type_name(),
    }
}
