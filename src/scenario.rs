//! Scripted input for headless runs
//!
//! A fixed timeline of key presses and camera turns, replayed through the
//! same input handler a windowed build would feed from winit events.

use stride_core::Transform;
use stride_game::InputHandler;
use tracing::info;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// One stretch of the script
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    /// Seconds since the start of the run
    pub start: f32,
    /// Label used when logging the phase change
    pub name: &'static str,
    /// Keys held for the whole phase
    pub keys: &'static [KeyCode],
    /// Camera turn rate in degrees per second
    pub camera_turn: f32,
}

/// The default walk: settle, walk, strafe, orbit the camera, back off, idle
pub const DEFAULT_SCRIPT: &[Phase] = &[
    Phase {
        start: 0.0,
        name: "settle",
        keys: &[],
        camera_turn: 0.0,
    },
    Phase {
        start: 1.0,
        name: "walk forward",
        keys: &[KeyCode::KeyW],
        camera_turn: 0.0,
    },
    Phase {
        start: 3.0,
        name: "diagonal",
        keys: &[KeyCode::KeyW, KeyCode::KeyD],
        camera_turn: 0.0,
    },
    Phase {
        start: 4.0,
        name: "orbit camera",
        keys: &[KeyCode::KeyW],
        camera_turn: 45.0,
    },
    Phase {
        start: 6.0,
        name: "back off",
        keys: &[KeyCode::KeyS],
        camera_turn: 0.0,
    },
    Phase {
        start: 8.0,
        name: "idle",
        keys: &[],
        camera_turn: 0.0,
    },
];

/// Replays a script against an input handler and a camera
pub struct ScriptedInput {
    phases: &'static [Phase],
    current: Option<usize>,
    elapsed: f32,
}

impl ScriptedInput {
    pub fn new(phases: &'static [Phase]) -> Self {
        Self {
            phases,
            current: None,
            elapsed: 0.0,
        }
    }

    /// Index of the phase active at `time`
    fn phase_at(&self, time: f32) -> Option<usize> {
        self.phases.iter().rposition(|phase| phase.start <= time)
    }

    /// Apply this frame's input, then advance the script clock by `dt`
    pub fn apply(&mut self, input: &mut InputHandler, camera: &mut Transform, dt: f32) {
        let active = self.phase_at(self.elapsed);

        if active != self.current {
            input.release_all();
            if let Some(index) = active {
                let phase = &self.phases[index];
                for key in phase.keys {
                    input.handle_keyboard(PhysicalKey::Code(*key), ElementState::Pressed);
                }
                info!(at = self.elapsed, "Phase: {}", phase.name);
            }
            self.current = active;
        }

        if let Some(phase) = active.map(|index| &self.phases[index]) {
            if phase.camera_turn != 0.0 {
                camera.rotate_yaw(phase.camera_turn * dt);
            }
        }

        self.elapsed += dt;
    }
}
