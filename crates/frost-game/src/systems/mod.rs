//! Concrete systems run by a level, plus the game-wide scoreboard

mod effects;
mod elves;
mod present;
mod scoreboard;

pub use effects::{Effect, EffectSystem};
pub use elves::ElvesSystem;
pub use present::PresentSystem;
pub use scoreboard::Scoreboard;
