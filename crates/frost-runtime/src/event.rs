//! Game events raised by the controller

use frost_core::{EntityId, Vec3};
use serde::Serialize;

/// Something the host may want to react to: play a sound, update the HUD,
/// report analytics. Events are informational; the core never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    LevelStarted { level: usize, scene: String },
    ShotFired { level: usize, point: Vec3 },
    TargetResolved { entity: EntityId, name: String, points: u64 },
    /// The shot landed but its target had left the scene
    ResolutionSkipped { entity: EntityId },
    ScoreChanged { score: u64 },
    LevelCompleted { level: usize },
    GameOver { won: bool, score: u64 },
    Paused,
    Resumed,
    Restarted { level: usize },
}
