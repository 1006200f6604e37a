//! Frost Game - Levels and the game controller
//!
//! - `Game` - lifecycle, frame loop, scoring and level progression
//! - `Level` - one scene with its systems and the shots still in flight
//! - `InteractionResolver` - pointer position to ordered scene hits
//! - `LevelSource` - where level scenes come from (files or the demo layout)
//! - `GameConfig` - layered tunables
//! - `Renderer` / `TargetVisuals` - presentation seams

pub mod config;
mod game;
mod level;
mod level_source;
mod render;
mod resolver;
pub mod systems;
mod visuals;

pub use config::GameConfig;
pub use game::Game;
pub use level::{ClickOutcome, Level, PendingResolution, ResolutionOutcome};
pub use level_source::{DemoLevels, FileLevels, LevelSource};
pub use render::{FrameCounter, Renderer, TraceRenderer};
pub use resolver::{InteractionResolver, Intersection};
pub use visuals::{HoldingVariant, TargetVisuals};
