//! Input state management
//!
//! Polls both keyboard (macroquad) and gamepad (gilrs) input,
//! combining them into a unified action-based API.

use macroquad::prelude::*;
use super::{button, Action, FrameInput, Gamepad};

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
    /// Left stick magnitude needed to count as a direction (0.0-1.0)
    pub stick_threshold: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
            stick_threshold: 0.5,
        }
    }

    /// Call once per frame before checking actions
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        self.keyboard_down(action) || self.gamepad_down(action)
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.keyboard_pressed(action) || self.gamepad_pressed(action)
    }

    /// Snapshot of the gameplay actions for this frame
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            left: self.action_down(Action::MoveLeft),
            right: self.action_down(Action::MoveRight),
            fire: self.action_down(Action::Fire),
            fire_pressed: self.action_pressed(Action::Fire),
            jump_pressed: self.action_pressed(Action::Jump),
        }
    }

    /// Any way of starting from the title screen, mouse included
    pub fn start_requested(&self) -> bool {
        self.action_pressed(Action::Confirm) || is_mouse_button_pressed(MouseButton::Left)
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            Action::MoveRight => is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
            Action::Jump => is_key_down(KeyCode::Space),
            Action::Fire => is_key_down(KeyCode::F),
            Action::Confirm => is_key_down(KeyCode::Enter) || is_key_down(KeyCode::Space),
            Action::Back => is_key_down(KeyCode::Escape),
            Action::ToggleDebug => is_key_down(KeyCode::F3),
        }
    }

    fn keyboard_pressed(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_pressed(KeyCode::A) || is_key_pressed(KeyCode::Left),
            Action::MoveRight => is_key_pressed(KeyCode::D) || is_key_pressed(KeyCode::Right),
            Action::Jump => is_key_pressed(KeyCode::Space),
            Action::Fire => is_key_pressed(KeyCode::F),
            Action::Confirm => is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space),
            Action::Back => is_key_pressed(KeyCode::Escape),
            Action::ToggleDebug => is_key_pressed(KeyCode::F3),
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        let gp = &self.gamepad;
        match action {
            Action::MoveLeft => {
                gp.is_button_down(button::DPAD_LEFT) || gp.left_stick().x < -self.stick_threshold
            }
            Action::MoveRight => {
                gp.is_button_down(button::DPAD_RIGHT) || gp.left_stick().x > self.stick_threshold
            }
            Action::Jump => gp.is_button_down(button::A),
            Action::Fire => gp.is_button_down(button::X),
            Action::Confirm => gp.is_button_down(button::START) || gp.is_button_down(button::A),
            Action::Back => gp.is_button_down(button::SELECT),
            Action::ToggleDebug => false,
        }
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        let gp = &self.gamepad;
        match action {
            Action::MoveLeft => gp.is_button_pressed(button::DPAD_LEFT),
            Action::MoveRight => gp.is_button_pressed(button::DPAD_RIGHT),
            Action::Jump => gp.is_button_pressed(button::A),
            Action::Fire => gp.is_button_pressed(button::X),
            Action::Confirm => gp.is_button_pressed(button::START) || gp.is_button_pressed(button::A),
            Action::Back => gp.is_button_pressed(button::SELECT),
            Action::ToggleDebug => false,
        }
    }

    /// Check if any gamepad is connected
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
