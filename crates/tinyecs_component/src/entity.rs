//! Entity type and allocation utilities.
//!
//! An [`Entity`] is a lightweight `u64` identifier with no inherent data. IDs
//! are handed out by an [`EntityAllocator`] owned by each scene, never by a
//! process-wide counter, so independent scenes do not share a sequence.

/// Handle naming one entity in a scene.
///
/// The handle holds no data. Whatever the entity "is" lives in the component
/// tables that have a row for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(pub u64);

impl Entity {
    /// Wrap an id that came from elsewhere, e.g. a log line or a test.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Allocates strictly increasing entity IDs.
///
/// Destroyed IDs are never recycled: an ID stays unique for the lifetime of
/// the allocator, so callers may hold one as a stable weak reference.
#[derive(Debug)]
pub struct EntityAllocator {
    next_id: u64,
}

impl EntityAllocator {
    /// Creates a new allocator whose first ID is 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocates a fresh entity ID.
    ///
    /// # Panics
    ///
    /// Panics if the `u64` ID space is exhausted. There is no way to keep the
    /// uniqueness guarantee past that point.
    pub fn allocate(&mut self) -> Entity {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .unwrap_or_else(|| panic!("entity id space exhausted after {id}"));
        Entity(id)
    }

    /// Returns the number of entities allocated so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
