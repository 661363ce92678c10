//! Stride - headless third-person locomotion harness
//!
//! Builds a small collision world, spawns a player and replays a scripted walk,
//! logging where the character ends up.
//!
//! Usage: `stride [settings.toml]`, or `stride --init` to write default settings

mod scenario;
mod settings;

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use stride_core::{GameTime, Transform};
use stride_game::{CursorLock, InputHandler, PlayerController};
use stride_physics::PhysicsWorld;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::scenario::{ScriptedInput, DEFAULT_SCRIPT};
use crate::settings::GameSettings;

/// No window to grab the pointer from
struct HeadlessCursor;

impl CursorLock for HeadlessCursor {
    fn lock_and_hide(&self) {
        debug!("Headless run, cursor lock skipped");
    }
}

/// Ground plane plus a wall across the walking path
fn build_world() -> PhysicsWorld {
    let mut physics = PhysicsWorld::new();
    physics.create_ground(0.0);
    physics.create_static_box(Vec3::new(4.0, 1.5, 0.25), Vec3::new(0.0, 1.5, 12.0));
    physics.update_queries();
    physics
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Stride simulation...");

    let settings = match std::env::args().nth(1).as_deref() {
        Some("--init") => {
            GameSettings::default()
                .save()
                .context("Failed to write default settings")?;
            return Ok(());
        }
        Some(path) => GameSettings::load_from(Path::new(path)),
        None => GameSettings::load(),
    };

    let mut physics = build_world();

    let camera = Transform::from_position(Vec3::new(0.0, 2.0, -5.0));
    let mut player = PlayerController::builder()
        .movement(settings.movement.clone())
        .character(settings.character.clone())
        .camera(camera)
        .build()
        .context("Invalid player configuration")?;

    let mut input = InputHandler::new();
    player.start(&mut input, &HeadlessCursor);
    player.spawn(&mut physics, Vec3::new(0.0, 1.0, 0.0));

    let mut time = GameTime::new(settings.simulation.time_config());
    let mut script = ScriptedInput::new(DEFAULT_SCRIPT);

    for _ in 0..settings.simulation.frames {
        time.update(settings.simulation.timestep);
        let dt = time.delta_time;

        script.apply(&mut input, player.camera_mut(), dt);
        let step = player.update(&mut physics, &input.state, dt);

        if time.frame_count % 60 == 0 {
            info!(
                frame = time.frame_count,
                position = ?player.position(),
                yaw = player.transform.yaw_degrees(),
                grounded = step.grounded,
                vertical_velocity = player.vertical_velocity(),
                "Player state"
            );
        }
    }

    info!(
        "Simulated {:.2}s over {} frames, player at {:?}",
        time.total_time,
        time.frame_count,
        player.position()
    );

    Ok(())
}
