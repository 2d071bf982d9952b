//! Entity trait: identity + continuity across edits.

/// Entity marker + minimal interface.
///
/// Catalog masters (variant axes, taxes, price categories) are entities: the
/// surrounding CRUD screens own and mutate them, the core only reads them.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
