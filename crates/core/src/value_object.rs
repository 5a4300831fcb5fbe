//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Variant facts and derived statuses are values: two fact sets with the same
/// fields classify identically, whichever variant they came from. Value objects
/// are never mutated in place; a changed fact set is a new value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
