//! Play command: run the controller headless on simulated time

use super::load_config;
use anyhow::{bail, Context, Result};
use frost_game::{FileLevels, Game};
use frost_runtime::{GameEvent, ManualTime, PointerQueue};

pub struct PlayArgs {
    pub levels: Vec<String>,
    pub ticks: u64,
    pub dt: f64,
    pub clicks: Vec<ScriptedClick>,
    pub config: Option<String>,
    pub format: String,
}

/// A pointer-down queued just before the given frame runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedClick {
    pub frame: u64,
    pub x: f32,
    pub y: f32,
}

/// Parse `X,Y` or `X,Y@FRAME`
pub fn parse_click(s: &str) -> Result<ScriptedClick, String> {
    let (point, frame) = match s.split_once('@') {
        Some((point, frame)) => {
            let frame = frame
                .trim()
                .parse()
                .map_err(|e| format!("invalid frame: {}", e))?;
            (point, frame)
        }
        None => (s, 0),
    };
    let (x, y) = point
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", point))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    Ok(ScriptedClick { frame, x, y })
}

pub fn run(args: PlayArgs) -> Result<()> {
    if !(args.dt > 0.0) {
        bail!("--dt must be positive, got {}", args.dt);
    }
    let json = match args.format.as_str() {
        "text" => false,
        "json" => true,
        other => bail!("Unknown format: {}", other),
    };

    let config = load_config(args.config.as_deref())?;
    let time = ManualTime::new();
    let queue = PointerQueue::new();

    let game = if args.levels.is_empty() {
        Game::demo(config)
    } else {
        Game::new(config, FileLevels::new(&args.levels))
    };
    let mut game = game.with_time(time.clone()).with_input(queue.clone());
    game.start().context("Failed to start game")?;
    report(&mut game, json)?;

    let mut frame = 0;
    while frame < args.ticks && game.is_scheduled() {
        for click in args.clicks.iter().filter(|c| c.frame == frame) {
            queue.click(click.x, click.y);
        }
        time.advance(args.dt);
        // Failures are already logged by the controller; keep going like a
        // real frame loop would
        let _ = game.tick();
        report(&mut game, json)?;
        frame += 1;
    }

    if json {
        println!(
            "{}",
            serde_json::json!({ "frames": frame, "score": game.score() })
        );
    } else {
        println!("Frames:  {}", frame);
        println!("Score:   {}", game.score());
        if let Some(level) = game.level() {
            let scene = level.scene();
            let satisfied = scene.targets().filter(|e| e.satisfied).count();
            println!(
                "Level:   {} ({}), {}/{} targets",
                level.index() + 1,
                scene.name(),
                satisfied,
                scene.targets().count()
            );
        }
    }
    Ok(())
}

fn report(game: &mut Game, json: bool) -> Result<()> {
    for event in game.drain_events() {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("[frame {:>5}] {}", game.frames(), describe(&event));
        }
    }
    Ok(())
}

fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::LevelStarted { level, scene } => {
            format!("level {} started: {}", level + 1, scene)
        }
        GameEvent::ShotFired { point, .. } => {
            format!("shot fired at ({:.2}, {:.2}, {:.2})", point.x, point.y, point.z)
        }
        GameEvent::TargetResolved { name, points, .. } => {
            format!("{} got a present (+{})", name, points)
        }
        GameEvent::ResolutionSkipped { entity } => {
            format!("present landed after {} left", entity)
        }
        GameEvent::ScoreChanged { score } => format!("score {}", score),
        GameEvent::LevelCompleted { level } => format!("level {} complete", level + 1),
        GameEvent::GameOver { won: true, score } => format!("you win! final score {}", score),
        GameEvent::GameOver { won: false, score } => format!("time is up, final score {}", score),
        GameEvent::Paused => "paused".to_string(),
        GameEvent::Resumed => "resumed".to_string(),
        GameEvent::Restarted { level } => format!("level {} restarted", level + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_click_with_and_without_frame() {
        assert_eq!(
            parse_click("640,360").unwrap(),
            ScriptedClick {
                frame: 0,
                x: 640.0,
                y: 360.0
            }
        );
        assert_eq!(
            parse_click(" 10.5 , 20 @ 30").unwrap(),
            ScriptedClick {
                frame: 30,
                x: 10.5,
                y: 20.0
            }
        );
    }

    #[test]
    fn parse_click_rejects_garbage() {
        assert!(parse_click("640").is_err());
        assert!(parse_click("a,b").is_err());
        assert!(parse_click("1,2@soon").is_err());
    }
}
