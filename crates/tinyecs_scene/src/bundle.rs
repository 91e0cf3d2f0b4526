//! Component bundles accepted by [`Scene::add_entity`](crate::Scene::add_entity).
//!
//! A bundle is `()` or a tuple of up to eight components. Components are bound
//! in tuple order; since each goes to its own table the order has no effect on
//! later queries.

use tinyecs_component::{Component, ComponentTypeId, Entity};

use crate::store::ComponentStore;

/// A group of components inserted together onto one entity.
pub trait Bundle: 'static {
    /// The component types in this bundle, in tuple order.
    fn type_ids() -> Vec<ComponentTypeId>;

    /// Bind every component of the bundle to `entity`.
    fn insert_into(self, store: &mut ComponentStore, entity: Entity);
}

impl Bundle for () {
    fn type_ids() -> Vec<ComponentTypeId> {
        Vec::new()
    }

    fn insert_into(self, _store: &mut ComponentStore, _entity: Entity) {}
}

macro_rules! impl_bundle {
    ($($T:ident),+) => {
        impl<$($T: Component),+> Bundle for ($($T,)+) {
            fn type_ids() -> Vec<ComponentTypeId> {
                vec![$(ComponentTypeId::of::<$T>()),+]
            }

            #[allow(non_snake_case)]
            fn insert_into(self, store: &mut ComponentStore, entity: Entity) {
                let ($($T,)+) = self;
                $(store.insert(entity, $T);)+
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);
