//! Title screen
//!
//! Shows the game name and a pulsing start prompt until the player confirms.

use macroquad::prelude::*;
use crate::VERSION;

/// Colors
const BG_COLOR: Color = Color::new(0.06, 0.04, 0.07, 1.0);
const TITLE_COLOR: Color = Color::new(0.75, 0.1, 0.15, 1.0);
const TEXT_COLOR: Color = Color::new(0.9, 0.9, 0.9, 1.0);
const MUTED_COLOR: Color = Color::new(0.6, 0.6, 0.65, 1.0);

/// Prompt pulse frequency in radians per second
const PULSE_SPEED: f32 = 3.0;

/// State for the title screen
pub struct MenuState {
    /// Drives the prompt pulse, seconds since the menu was shown
    pub pulse_time: f32,
}

impl MenuState {
    pub fn new() -> Self {
        Self { pulse_time: 0.0 }
    }

    pub fn update(&mut self, delta_time: f32) {
        self.pulse_time += delta_time;
    }

    pub fn reset(&mut self) {
        self.pulse_time = 0.0;
    }

    /// Prompt opacity, pulsing within [0.35, 1.0]
    pub fn prompt_alpha(&self) -> f32 {
        0.675 + 0.325 * (self.pulse_time * PULSE_SPEED).cos()
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw text horizontally centred on the screen
fn draw_centered(text: &str, y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, ((screen_width() - dims.width) / 2.0).round(), y.round(), font_size, color);
}

/// Draw the title screen
pub fn draw_menu(state: &MenuState, has_gamepad: bool) {
    clear_background(BG_COLOR);

    let mid = screen_height() / 2.0;
    draw_centered("RED VEIL", mid - 40.0, 72.0, TITLE_COLOR);

    let prompt = if has_gamepad {
        "Press Start"
    } else {
        "Press Enter or click to start"
    };
    let color = Color::new(TEXT_COLOR.r, TEXT_COLOR.g, TEXT_COLOR.b, state.prompt_alpha());
    draw_centered(prompt, mid + 30.0, 24.0, color);

    draw_centered(
        "A/D move   Space jump   F fire   Esc menu   F3 debug",
        screen_height() - 48.0,
        16.0,
        MUTED_COLOR,
    );
    draw_text(&format!("v{}", VERSION), 8.0, screen_height() - 8.0, 14.0, MUTED_COLOR);
}
