//! Scene error types.

use tinyecs_component::Entity;

/// Errors returned by [`Scene`](crate::Scene) lookups and joins.
///
/// Every other scene operation is total.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The entity has no component of the requested type.
    #[error("component '{component}' not found on {entity}")]
    ComponentNotFound {
        entity: Entity,
        component: &'static str,
    },

    /// A match query was asked to join zero component types.
    #[error("match query requires at least one component type")]
    InvalidQuery,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SceneError::ComponentNotFound {
            entity: Entity::from_raw(7),
            component: "Health",
        };
        assert_eq!(err.to_string(), "component 'Health' not found on Entity(7)");
        assert_eq!(
            SceneError::InvalidQuery.to_string(),
            "match query requires at least one component type"
        );
    }
}
