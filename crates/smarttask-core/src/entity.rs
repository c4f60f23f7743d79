//! Core Entity Trait
//!
//! Contract shared by every record mirrored from the backend.

use std::hash::Hash;

/// Core trait for client-side mirrors of backend records.
///
/// Identifiers are assigned by the backend; the default id value marks an
/// optimistic placeholder that has not been persisted yet.
pub trait Entity: Sized + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + Hash + Default;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;

    /// Whether the entity carries a server-assigned identifier
    fn is_persisted(&self) -> bool {
        self.id() != Self::Id::default()
    }
}
