//! Frost Core - Foundational types for the frost mini-game runtime
//!
//! Every other frost crate depends on this one for:
//! - `EntityId` - identifiers for scene entities that are never reused
//! - `FrostError` / `Result` - the shared error taxonomy
//! - `Vec3` - re-exported from glam so every crate agrees on one vector type

mod error;
mod id;

pub use error::{FrostError, Result};
pub use glam::Vec3;
pub use id::EntityId;
