//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identifiers are assigned by the store on first save, so an entity that has
/// only been constructed in memory reports `None`.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier, if the entity has been persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Records the identifier the store generated for this entity.
    fn assign_id(&mut self, id: Self::Id);

    /// Whether the entity already carries a store identifier.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
