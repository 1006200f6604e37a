//! End-to-end behaviour of the game controller on manual time

use frost_core::{EntityId, FrostError, Result, Vec3};
use frost_game::systems::PresentSystem;
use frost_game::{ClickOutcome, FrameCounter, Game, GameConfig};
use frost_runtime::{GameEvent, LifecycleState, ManualTime, PointerQueue, System};
use frost_scene::{EntityDef, LevelFile, RailDef, Scene, Sway};

const CENTER: (f32, f32) = (640.0, 360.0);
const DT: f64 = 0.1;

/// Two elves straight ahead of a camera at the origin: the near one's front
/// face is 5 units away, the far one's 10.
fn corridor(name: &str) -> LevelFile {
    let mut level = LevelFile::new(name);
    level.camera.position = [0.0, 0.0, 0.0];
    level.camera.target = [0.0, 0.0, -1.0];
    level.add_entity(
        "elf_near",
        EntityDef::target([0.0, 0.0, -5.5]).with_sprite("elf@2x.png"),
    );
    level.add_entity(
        "elf_far",
        EntityDef::target([0.0, 0.0, -10.5]).with_sprite("elf@2x.png"),
    );
    level
}

/// One elf 5 units ahead
fn single(name: &str) -> LevelFile {
    let mut level = LevelFile::new(name);
    level.camera.position = [0.0, 0.0, 0.0];
    level.camera.target = [0.0, 0.0, -1.0];
    level.add_entity(
        "elf",
        EntityDef::target([0.0, 0.0, -5.5]).with_sprite("elf@2x.png"),
    );
    level
}

/// 5 units at this speed takes exactly three 0.1s ticks
fn three_tick_config() -> GameConfig {
    GameConfig {
        present_speed: 50.0 / 3.0,
        ..GameConfig::default()
    }
}

fn started(config: GameConfig, levels: Vec<LevelFile>) -> (Game, ManualTime) {
    let time = ManualTime::new();
    let mut game = Game::new(config, levels).with_time(time.clone());
    game.start().unwrap();
    game.drain_events();
    (game, time)
}

fn step(game: &mut Game, time: &ManualTime, ticks: usize) {
    for _ in 0..ticks {
        time.advance(DT);
        game.tick().unwrap();
    }
}

fn entity(game: &Game, name: &str) -> EntityId {
    game.level().unwrap().scene().id_of(name).unwrap()
}

fn sprite(game: &Game, name: &str) -> Option<String> {
    let id = entity(game, name);
    game.level().unwrap().scene().get(id).unwrap().sprite.clone()
}

fn in_flight(game: &Game) -> usize {
    game.level()
        .unwrap()
        .schedule()
        .get::<PresentSystem>()
        .unwrap()
        .in_flight()
}

#[test]
fn cast_orders_targets_by_distance() {
    let (game, _) = started(GameConfig::default(), vec![corridor("a")]);
    let level = game.level().unwrap();

    let hits = level.cast(CENTER.0, CENTER.1);

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].entity, entity(&game, "elf_near"));
    assert_eq!(hits[1].entity, entity(&game, "elf_far"));
    assert!((hits[0].distance - 5.0).abs() < 1e-3);
    assert!((hits[1].distance - 10.0).abs() < 1e-3);

    // Fresh and repeatable on every cast
    assert_eq!(level.cast(CENTER.0, CENTER.1), hits);
}

#[test]
fn cast_against_empty_scene_is_empty() {
    let (game, _) = started(GameConfig::default(), vec![LevelFile::new("void")]);
    let level = game.level().unwrap();
    for (x, y) in [(0.0, 0.0), CENTER, (1279.0, 719.0)] {
        assert!(level.cast(x, y).is_empty());
    }
}

#[test]
fn second_pause_stops_scoring() {
    let (mut game, time) = started(three_tick_config(), vec![corridor("b")]);

    game.pause().unwrap();
    game.resume().unwrap();
    assert!(matches!(
        game.handle_click(CENTER.0, CENTER.1),
        ClickOutcome::Shot { .. }
    ));
    step(&mut game, &time, 1);
    game.pause().unwrap();
    assert!(!game.is_scheduled());

    let frames = game.frames();
    step(&mut game, &time, 20);

    assert_eq!(game.score(), 0);
    assert_eq!(game.frames(), frames);
    assert_eq!(game.state(), Some(LifecycleState::Paused));
    // Pausing does not cancel the shot; it is still up there
    assert_eq!(in_flight(&game), 1);
}

#[test]
fn paused_shot_lands_after_resume() {
    let (mut game, time) = started(three_tick_config(), vec![corridor("b")]);
    game.handle_click(CENTER.0, CENTER.1);
    step(&mut game, &time, 1);
    game.pause().unwrap();

    // A long pause never turns into a big delta
    time.advance(30.0);
    game.resume().unwrap();
    step(&mut game, &time, 2);

    assert!(game.score() > 0);
    assert_eq!(sprite(&game, "elf_near").as_deref(), Some("elf_Holding@2x.png"));
}

#[test]
fn click_on_nothing_shoots_nothing() {
    let (mut game, time) = started(three_tick_config(), vec![corridor("c")]);

    assert_eq!(game.handle_click(0.0, 0.0), ClickOutcome::Missed);
    step(&mut game, &time, 5);

    assert!(game.level().unwrap().pending().is_empty());
    assert_eq!(in_flight(&game), 0);
    assert!(game
        .drain_events()
        .iter()
        .all(|e| !matches!(e, GameEvent::ShotFired { .. })));
}

#[test]
fn landing_after_three_ticks_swaps_only_the_hit_target() {
    let (mut game, time) = started(three_tick_config(), vec![corridor("d")]);
    let near = entity(&game, "elf_near");

    match game.handle_click(CENTER.0, CENTER.1) {
        ClickOutcome::Shot { hit, target } => {
            assert_eq!(hit.entity, near);
            assert_eq!(target, Some(near));
        }
        ClickOutcome::Missed => panic!("expected the near elf to be hit"),
    }

    step(&mut game, &time, 2);
    assert_eq!(sprite(&game, "elf_near").as_deref(), Some("elf@2x.png"));
    assert_eq!(game.level().unwrap().pending().len(), 1);

    step(&mut game, &time, 1);
    assert_eq!(sprite(&game, "elf_near").as_deref(), Some("elf_Holding@2x.png"));
    assert_eq!(sprite(&game, "elf_far").as_deref(), Some("elf@2x.png"));
    assert!(game.level().unwrap().pending().is_empty());

    let scene = game.level().unwrap().scene();
    assert!(scene.get(near).unwrap().satisfied);
    assert!(!scene.get(entity(&game, "elf_far")).unwrap().satisfied);
}

#[test]
fn ticks_while_paused_change_nothing() {
    let mut level = corridor("frozen");
    level
        .entities
        .get_mut("elf_far")
        .unwrap()
        .sway = Some(Sway {
        amplitude: 1.0,
        frequency: 0.7,
    });
    let renderer = FrameCounter::new();
    let time = ManualTime::new();
    let mut game = Game::new(three_tick_config(), vec![level])
        .with_time(time.clone())
        .with_renderer(renderer.clone());
    game.start().unwrap();
    game.handle_click(CENTER.0, CENTER.1);
    step(&mut game, &time, 1);
    game.pause().unwrap();

    let snapshot = |game: &Game| {
        let level = game.level().unwrap();
        let positions: Vec<Vec3> = level.scene().entities().iter().map(|e| e.position).collect();
        let presents: Vec<Vec3> = level
            .schedule()
            .get::<PresentSystem>()
            .unwrap()
            .positions()
            .collect();
        (positions, presents, level.scene().elapsed(), game.score())
    };
    let before = snapshot(&game);
    let frames = renderer.frames();

    for _ in 0..10 {
        time.advance(0.37);
        game.tick().unwrap();
    }

    assert_eq!(snapshot(&game), before);
    assert_eq!(renderer.frames(), frames);
    assert_eq!(game.clock().previous_timestamp(), None);
}

#[test]
fn resume_while_running_leaves_clock_untouched() {
    let (mut game, time) = started(GameConfig::default(), vec![corridor("e")]);
    step(&mut game, &time, 2);
    let before = game.clock().previous_timestamp();
    assert!(before.is_some());

    time.advance(1.0);
    assert!(game.resume().is_err());

    assert_eq!(game.clock().previous_timestamp(), before);
    assert_eq!(game.state(), Some(LifecycleState::Running));
    assert!(game.drain_events().is_empty());
}

#[test]
fn removed_target_is_skipped_quietly() {
    let (mut game, time) = started(three_tick_config(), vec![corridor("f")]);
    let near = entity(&game, "elf_near");
    game.handle_click(CENTER.0, CENTER.1);
    game.level_mut()
        .unwrap()
        .scene_mut()
        .despawn(near)
        .unwrap();

    step(&mut game, &time, 3);

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::ResolutionSkipped { entity: near }));
    assert!(events
        .iter()
        .all(|e| !matches!(e, GameEvent::TargetResolved { .. })));
    assert_eq!(game.score(), 0);
    assert_eq!(sprite(&game, "elf_far").as_deref(), Some("elf@2x.png"));
}

#[test]
fn queued_clicks_are_handled_on_the_next_tick() {
    let queue = PointerQueue::new();
    let time = ManualTime::new();
    let mut game = Game::new(three_tick_config(), vec![corridor("g")])
        .with_time(time.clone())
        .with_input(queue.clone());
    game.start().unwrap();

    queue.click(CENTER.0, CENTER.1);
    step(&mut game, &time, 3);

    assert!(queue.is_empty());
    assert_eq!(sprite(&game, "elf_near").as_deref(), Some("elf_Holding@2x.png"));
}

#[test]
fn clicks_queued_while_paused_are_dropped() {
    let queue = PointerQueue::new();
    let time = ManualTime::new();
    let mut game = Game::new(three_tick_config(), vec![corridor("h")])
        .with_time(time.clone())
        .with_input(queue.clone());
    game.start().unwrap();
    game.pause().unwrap();

    queue.click(CENTER.0, CENTER.1);
    game.resume().unwrap();
    step(&mut game, &time, 5);

    assert_eq!(in_flight(&game), 0);
    assert_eq!(game.score(), 0);
}

#[test]
fn completing_levels_progresses_then_wins() {
    let (mut game, time) = started(three_tick_config(), vec![single("one"), single("two")]);

    game.handle_click(CENTER.0, CENTER.1);
    step(&mut game, &time, 3);

    let events = game.drain_events();
    let points = GameConfig::default().points_for(0.3);
    assert!(events.contains(&GameEvent::LevelCompleted { level: 0 }));
    assert!(events.contains(&GameEvent::LevelStarted {
        level: 1,
        scene: "two".to_string()
    }));
    assert_eq!(game.level().unwrap().index(), 1);
    assert_eq!(game.score(), points);

    game.handle_click(CENTER.0, CENTER.1);
    step(&mut game, &time, 3);

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::LevelCompleted { level: 1 }));
    assert!(events.contains(&GameEvent::GameOver {
        won: true,
        score: points * 2
    }));
    assert_eq!(game.state(), Some(LifecycleState::Paused));
    assert!(!game.is_scheduled());
}

#[test]
fn restart_rebuilds_level_and_keeps_score() {
    let (mut game, time) = started(three_tick_config(), vec![corridor("r")]);
    game.handle_click(CENTER.0, CENTER.1);
    step(&mut game, &time, 3);
    let score = game.score();
    assert!(score > 0);
    let old_near = entity(&game, "elf_near");

    assert!(game.restart().is_err());
    game.pause().unwrap();
    game.restart().unwrap();

    assert_eq!(game.state(), Some(LifecycleState::Running));
    assert_eq!(game.score(), score);
    assert_ne!(entity(&game, "elf_near"), old_near);
    assert_eq!(sprite(&game, "elf_near").as_deref(), Some("elf@2x.png"));
    assert!(game
        .drain_events()
        .contains(&GameEvent::Restarted { level: 0 }));
}

#[test]
fn restart_after_time_up_runs_a_fresh_countdown() {
    let config = GameConfig {
        time_per_level: 1.0,
        ..three_tick_config()
    };
    let (mut game, time) = started(config, vec![corridor("t")]);

    for _ in 0..2 {
        time.advance(0.6);
        game.tick().unwrap();
    }
    assert_eq!(
        game.drain_events(),
        vec![GameEvent::GameOver {
            won: false,
            score: 0
        }]
    );
    assert_eq!(game.state(), Some(LifecycleState::Paused));

    game.restart().unwrap();
    game.drain_events();
    assert_eq!(game.scoreboard().remaining(), Some(1.0));

    // The replayed level times out again instead of running forever
    time.advance(0.6);
    game.tick().unwrap();
    assert!(game.drain_events().is_empty());
    time.advance(0.6);
    game.tick().unwrap();
    assert_eq!(
        game.drain_events(),
        vec![GameEvent::GameOver {
            won: false,
            score: 0
        }]
    );
    assert_eq!(game.state(), Some(LifecycleState::Paused));
    assert!(!game.is_scheduled());
}

#[test]
fn unbuildable_next_level_pauses_the_game() {
    let mut broken = single("two");
    broken.rail = Some(RailDef {
        points: vec![[0.0, 0.0, 0.0]],
        speed: 1.0,
    });
    let (mut game, time) = started(three_tick_config(), vec![single("one"), broken]);

    game.handle_click(CENTER.0, CENTER.1);
    step(&mut game, &time, 2);
    time.advance(DT);
    let err = game.tick().unwrap_err();
    assert!(matches!(err, FrostError::SceneError(_)));

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::LevelCompleted { level: 0 }));
    assert_eq!(events.last(), Some(&GameEvent::Paused));
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::LevelStarted { .. })));
    assert_eq!(game.state(), Some(LifecycleState::Paused));
    assert!(!game.is_scheduled());
    assert_eq!(game.level().unwrap().index(), 0);

    let frames = game.frames();
    time.advance(DT);
    game.tick().unwrap();
    assert_eq!(game.frames(), frames);
}

/// Fails every tick
struct Jammed;

impl System for Jammed {
    fn name(&self) -> &str {
        "jammed"
    }

    fn update(&mut self, _scene: &mut Scene, _dt: f64) -> Result<()> {
        Err(FrostError::SystemError {
            system: "jammed".to_string(),
            message: "gears stuck".to_string(),
        })
    }
}

#[test]
fn failing_system_still_renders_and_reschedules() {
    let time = ManualTime::new();
    let counter = FrameCounter::new();
    let mut game = Game::new(three_tick_config(), vec![corridor("j")])
        .with_time(time.clone())
        .with_renderer(counter.clone());
    game.start().unwrap();
    game.level_mut().unwrap().schedule_mut().push(Jammed);

    game.handle_click(CENTER.0, CENTER.1);
    for frame in 1..=3 {
        time.advance(DT);
        let err = game.tick().unwrap_err();
        assert!(matches!(err, FrostError::SystemError { .. }));
        assert_eq!(game.frames(), frame);
        assert_eq!(counter.frames(), frame);
        assert!(game.is_scheduled());
        assert_eq!(game.state(), Some(LifecycleState::Running));
    }

    // The present flew, but resolution never ran after the failure
    let level = game.level().unwrap();
    assert!((level.scene().elapsed() - 0.3).abs() < 1e-9);
    assert_eq!(level.pending().len(), 1);
    assert_eq!(game.score(), 0);
    assert_eq!(sprite(&game, "elf_near").as_deref(), Some("elf@2x.png"));
}

#[test]
fn workshop_level_props_block_shots() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../levels/workshop.toml");
    let time = ManualTime::new();
    let mut game = Game::new(GameConfig::default(), frost_game::FileLevels::new([path]))
        .with_time(time.clone());
    game.start().unwrap();

    let level = game.level().unwrap();
    assert_eq!(level.scene().name(), "Workshop");
    assert_eq!(level.scene().targets().count(), 3);

    // The middle elf sits straight ahead of the camera
    let hits = level.cast(CENTER.0, CENTER.1);
    assert_eq!(hits[0].entity, entity(&game, "elf_middle"));

    // Aim at the right elf through the crates: the crates take the shot
    let crates = entity(&game, "crates");
    let elf_right = entity(&game, "elf_right");
    let camera = level.scene().camera();
    let ndc = camera.view_projection_matrix().project_point3(Vec3::new(2.5, 1.5, -7.0));
    let x = (ndc.x + 1.0) / 2.0 * 1280.0;
    let y = (1.0 - ndc.y) / 2.0 * 720.0;
    let hits = level.cast(x, y);
    let order: Vec<EntityId> = hits.iter().map(|h| h.entity).collect();
    assert_eq!(order.first(), Some(&crates));
    assert!(order.contains(&elf_right));

    match game.handle_click(x, y) {
        ClickOutcome::Shot { hit, target } => {
            assert_eq!(hit.entity, crates);
            assert_eq!(target, None);
        }
        ClickOutcome::Missed => panic!("expected the crates to be hit"),
    }
}
