//! Cast command: what is under a viewport point

use super::load_config;
use anyhow::{bail, Context, Result};
use frost_game::InteractionResolver;
use frost_scene::load_level;

pub fn run(level_path: &str, x: f32, y: f32, config: Option<&str>, format: &str) -> Result<()> {
    let config = load_config(config)?;
    let (mut scene, _) = load_level(level_path).context("Failed to load level")?;
    scene
        .camera_mut()
        .set_viewport(config.viewport.width, config.viewport.height);

    let resolver = InteractionResolver::new(config.viewport);
    let hits = resolver.cast(&scene, x, y);

    match format {
        "json" => {
            let rows: Vec<_> = hits
                .iter()
                .map(|hit| {
                    let name = scene.get(hit.entity).map(|e| e.name.as_str()).unwrap_or("?");
                    serde_json::json!({
                        "entity": hit.entity,
                        "name": name,
                        "distance": hit.distance,
                        "point": [hit.point.x, hit.point.y, hit.point.z],
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        "text" => {
            if hits.is_empty() {
                println!("Nothing at ({}, {})", x, y);
                return Ok(());
            }
            for (rank, hit) in hits.iter().enumerate() {
                let Some(entity) = scene.get(hit.entity) else {
                    continue;
                };
                let role = entity.target_kind().unwrap_or("prop");
                println!(
                    "{:>2}. {:<20} {:<8} {:>8.3}  ({:.2}, {:.2}, {:.2})",
                    rank + 1,
                    entity.name,
                    role,
                    hit.distance,
                    hit.point.x,
                    hit.point.y,
                    hit.point.z
                );
            }
        }
        other => bail!("Unknown format: {}", other),
    }
    Ok(())
}
