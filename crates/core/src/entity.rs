//! Entity trait: identity that survives fact edits and re-classification.

/// Entity marker + minimal interface.
///
/// Products and variants are entities: their facts and statuses change from run
/// to run, but they are matched across runs by identifier only.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
