//! Specular Spawn entry point
//!
//! Loads a level JSON file, runs one spawn pass, and prints the placement.

use std::process::ExitCode;

use specular_spawn::{Level, RecordingSink, SpawnError, SpecularPathSpawner};

/// Template name used for every spawned enemy
const ENEMY_TEMPLATE: &str = "enemy";

fn run(path: &str) -> Result<(), SpawnError> {
    let level = Level::load(path)?;

    let mut spawner = SpecularPathSpawner::new(level.config, level.options)
        .with_template(ENEMY_TEMPLATE)
        .with_walls(level.walls.to_segments());
    spawner.origin = level.origin;

    let mut sink = RecordingSink::default();
    let Some(result) = spawner.start(&mut sink)? else {
        log::info!("generate_on_start is off; nothing spawned");
        return Ok(());
    };

    log::info!(
        "Selection {:?}, {} path vertices",
        result.selection,
        result.path.len()
    );
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: specular-spawn <level.json>");
        return ExitCode::FAILURE;
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
