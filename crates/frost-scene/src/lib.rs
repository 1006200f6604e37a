//! Frost Scene - the active set of entities for one level
//!
//! - `Scene` - ordered entities, the camera and an optional camera rail
//! - `Camera` - perspective camera used for rendering and unprojection
//! - `Ray` / `Aabb` - the spatial query behind pointer casts
//! - `LevelFile` - TOML level description and loader

mod camera;
mod entity;
mod format;
mod loader;
mod picking;
mod rail;
mod scene;

pub use camera::Camera;
pub use entity::{EntityKind, SceneEntity, Sway};
pub use format::{CameraDef, EntityDef, EntityRole, LevelFile, LevelMetadata, RailDef};
pub use loader::{load_level, load_level_str};
pub use picking::{ray_intersect, Aabb, Ray};
pub use rail::CameraRail;
pub use scene::{RayHit, Scene};
