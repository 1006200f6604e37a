//! Entity identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of an entity inside a scene.
///
/// Ids come from one process-wide counter, so an id taken from a scene that
/// has since been replaced can never name an entity of its successor.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Allocate a fresh id
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw value (tests and diagnostics)
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn display_uses_hash_prefix() {
        assert_eq!(EntityId::from_raw(7).to_string(), "#7");
        assert_eq!(format!("{:?}", EntityId::from_raw(7)), "EntityId(7)");
    }
}
