//! Join signatures.
//!
//! A [`Signature`] names the component types of a join as a tuple type, e.g.
//! `(Position, Velocity)`. It is always spelled out by the caller, never
//! inferred from a system's parameter list. `()` is a valid signature type so
//! that an empty join can be expressed and rejected at runtime with
//! [`SceneError::InvalidQuery`](crate::SceneError::InvalidQuery).

use tinyecs_component::{Component, ComponentTypeId, Entity};

use crate::store::ComponentStore;

/// A tuple of component types fetched together by a join.
pub trait Signature: Sized + 'static {
    /// The requested component types, in tuple order. Duplicates are allowed.
    fn type_ids() -> Vec<ComponentTypeId>;

    /// Clone the requested components of `entity` out of the store.
    ///
    /// Returns `None` if any one of them is missing, so a row is never
    /// partial.
    fn fetch(store: &ComponentStore, entity: Entity) -> Option<Self>;
}

impl Signature for () {
    fn type_ids() -> Vec<ComponentTypeId> {
        Vec::new()
    }

    fn fetch(_store: &ComponentStore, _entity: Entity) -> Option<Self> {
        Some(())
    }
}

macro_rules! impl_signature {
    ($($T:ident),+) => {
        impl<$($T: Component + Clone),+> Signature for ($($T,)+) {
            fn type_ids() -> Vec<ComponentTypeId> {
                vec![$(ComponentTypeId::of::<$T>()),+]
            }

            fn fetch(store: &ComponentStore, entity: Entity) -> Option<Self> {
                Some(($(store.get::<$T>(entity)?.clone(),)+))
            }
        }
    };
}

impl_signature!(A);
impl_signature!(A, B);
impl_signature!(A, B, C);
impl_signature!(A, B, C, D);
impl_signature!(A, B, C, D, E);
impl_signature!(A, B, C, D, E, F);
impl_signature!(A, B, C, D, E, F, G);
impl_signature!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct T1(u8);

    #[derive(Debug, Clone, PartialEq)]
    struct T2(u8);

    #[test]
    fn test_signature_type_ids() {
        assert!(<() as Signature>::type_ids().is_empty());
        assert_eq!(
            <(T2, T1)>::type_ids(),
            vec![ComponentTypeId::of::<T2>(), ComponentTypeId::of::<T1>()]
        );
    }

    #[test]
    fn test_fetch_requires_every_component() {
        let mut store = ComponentStore::new();
        let full = Entity::from_raw(1);
        let partial = Entity::from_raw(2);
        store.insert(full, T1(1));
        store.insert(full, T2(2));
        store.insert(partial, T1(3));

        assert_eq!(<(T2, T1)>::fetch(&store, full), Some((T2(2), T1(1))));
        assert_eq!(<(T1, T2)>::fetch(&store, partial), None);
        assert_eq!(<(T1,)>::fetch(&store, partial), Some((T1(3),)));
    }
}
