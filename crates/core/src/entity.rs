//! Entity trait: identity that survives every mutation of the record.

use chrono::{DateTime, Utc};

/// A stored record with a store-assigned identity.
///
/// Both `id()` and `created_at()` are fixed when the record is first stored;
/// updates replace the other fields around them.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// When the entity was first stored.
    fn created_at(&self) -> DateTime<Utc>;
}
