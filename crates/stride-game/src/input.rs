//! Input system with action-based mapping
//!
//! Keys map to movement actions, and actions fold into the two raw axes
//! locomotion polls every frame: `Horizontal` and `Vertical`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
}

/// Named analog axes, each raw in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAxis {
    /// Left (-1) to right (+1)
    Horizontal,
    /// Backward (-1) to forward (+1)
    Vertical,
}

impl InputAxis {
    /// Actions driving the negative and positive ends of this axis
    fn actions(self) -> (InputAction, InputAction) {
        match self {
            InputAxis::Horizontal => (InputAction::MoveLeft, InputAction::MoveRight),
            InputAxis::Vertical => (InputAction::MoveBackward, InputAction::MoveForward),
        }
    }
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Analog values per axis (gamepad sticks and the like)
    pub analog: HashMap<InputAxis, f32>,
    /// Whether the cursor is captured (invisible, locked)
    pub cursor_captured: bool,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Raw axis value in [-1, 1] without smoothing.
    ///
    /// Keys contribute -1, 0 or +1; an analog value wins when its magnitude is larger.
    pub fn axis_raw(&self, axis: InputAxis) -> f32 {
        let (negative, positive) = axis.actions();
        let mut digital: f32 = 0.0;
        if self.is_held(positive) {
            digital += 1.0;
        }
        if self.is_held(negative) {
            digital -= 1.0;
        }

        let analog = self.analog.get(&axis).copied().unwrap_or(0.0);
        let value = if analog.abs() > digital.abs() {
            analog
        } else {
            digital
        };
        value.clamp(-1.0, 1.0)
    }

    /// Clear all input state (e.g. on focus loss)
    pub fn clear_all(&mut self) {
        self.held.clear();
        self.analog.clear();
    }
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<KeyCode, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }
}

/// Lock and hide the pointer.
///
/// Fire-and-forget: implementations log failures instead of returning them.
pub trait CursorLock {
    fn lock_and_hide(&self);
}

impl CursorLock for Window {
    fn lock_and_hide(&self) {
        // Not every platform supports a locked grab
        let grabbed = self
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            warn!("Failed to grab cursor: {}", e);
        }
        self.set_cursor_visible(false);
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
    /// Bound keys currently down; an action stays held while any of its keys is
    pressed_keys: HashSet<KeyCode>,
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        let Some(action) = self.bindings.get_key_action(key_code) else {
            return;
        };

        match element_state {
            ElementState::Pressed => {
                self.pressed_keys.insert(key_code);
                self.state.held.insert(action);
            }
            ElementState::Released => {
                self.pressed_keys.remove(&key_code);
                let still_held = self
                    .pressed_keys
                    .iter()
                    .any(|key| self.bindings.get_key_action(*key) == Some(action));
                if !still_held {
                    self.state.held.remove(&action);
                }
            }
        }
    }

    /// Feed an analog axis value (clamped to [-1, 1])
    pub fn set_analog(&mut self, axis: InputAxis, value: f32) {
        let value = if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 };
        self.state.analog.insert(axis, value);
    }

    /// Raw value of a named axis
    pub fn axis_raw(&self, axis: InputAxis) -> f32 {
        self.state.axis_raw(axis)
    }

    /// Lock and hide the cursor, remembering that it is captured
    pub fn capture_cursor(&mut self, cursor: &(impl CursorLock + ?Sized)) {
        cursor.lock_and_hide();
        self.state.cursor_captured = true;
        debug!("Cursor captured");
    }

    /// Drop every held key and analog value
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.state.clear_all();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn press(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed);
    }

    fn release(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Released);
    }

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyW),
            Some(InputAction::MoveForward)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::ArrowLeft),
            Some(InputAction::MoveLeft)
        );
        assert_eq!(bindings.get_key_action(KeyCode::Space), None);
    }

    #[test]
    fn test_digital_axes() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::KeyW);
        press(&mut handler, KeyCode::KeyA);

        assert_eq!(handler.axis_raw(InputAxis::Vertical), 1.0);
        assert_eq!(handler.axis_raw(InputAxis::Horizontal), -1.0);

        release(&mut handler, KeyCode::KeyW);
        assert_eq!(handler.axis_raw(InputAxis::Vertical), 0.0);
    }

    #[test]
    fn test_shared_action_held_until_last_key_released() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::KeyW);
        press(&mut handler, KeyCode::ArrowUp);

        release(&mut handler, KeyCode::ArrowUp);
        assert_eq!(handler.axis_raw(InputAxis::Vertical), 1.0);

        release(&mut handler, KeyCode::KeyW);
        assert_eq!(handler.axis_raw(InputAxis::Vertical), 0.0);
    }

    #[test]
    fn test_release_all_forgets_pressed_keys() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::KeyW);
        press(&mut handler, KeyCode::ArrowUp);
        handler.release_all();

        // A stale ArrowUp must not keep the action alive after W is pressed again
        press(&mut handler, KeyCode::KeyW);
        release(&mut handler, KeyCode::KeyW);
        assert_eq!(handler.axis_raw(InputAxis::Vertical), 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::KeyA);
        press(&mut handler, KeyCode::KeyD);
        assert_eq!(handler.axis_raw(InputAxis::Horizontal), 0.0);
    }

    #[test]
    fn test_analog_axis() {
        let mut handler = InputHandler::new();
        handler.set_analog(InputAxis::Horizontal, 0.4);
        assert_eq!(handler.axis_raw(InputAxis::Horizontal), 0.4);

        // A held key outweighs a partial stick deflection
        press(&mut handler, KeyCode::KeyA);
        assert_eq!(handler.axis_raw(InputAxis::Horizontal), -1.0);

        handler.set_analog(InputAxis::Vertical, 3.0);
        assert_eq!(handler.axis_raw(InputAxis::Vertical), 1.0);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::KeyQ);
        assert!(handler.state.held.is_empty());
    }

    #[test]
    fn test_release_all() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::KeyW);
        handler.set_analog(InputAxis::Horizontal, 0.5);
        handler.release_all();
        assert_eq!(handler.axis_raw(InputAxis::Vertical), 0.0);
        assert_eq!(handler.axis_raw(InputAxis::Horizontal), 0.0);
    }

    struct CountingCursor {
        locks: Cell<u32>,
    }

    impl CursorLock for CountingCursor {
        fn lock_and_hide(&self) {
            self.locks.set(self.locks.get() + 1);
        }
    }

    #[test]
    fn test_capture_cursor() {
        let mut handler = InputHandler::new();
        let cursor = CountingCursor {
            locks: Cell::new(0),
        };

        handler.capture_cursor(&cursor);
        assert!(handler.state.cursor_captured);
        assert_eq!(cursor.locks.get(), 1);
    }
}
