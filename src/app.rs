//! Application state and screen management
//!
//! Two screens: the title menu and the running game. The game state is
//! rebuilt from the tile grids every time play starts from the menu.

use macroquad::logging::{error, info};
use crate::config::Settings;
use crate::game::{build_draw_list, build_world, GameState, Resources, WorldError};
use crate::gfx::{self, Letterbox, TextureStore};
use crate::input::{Action, InputState};
use crate::menu::{draw_menu, MenuState};

/// The screens the app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
}

/// Main application state
pub struct AppState {
    /// Currently shown screen
    pub screen: Screen,

    pub settings: Settings,

    /// Unified input state (keyboard + gamepad)
    pub input: InputState,

    /// Texture sizes and animation templates
    pub resources: Resources,

    /// Title screen state
    pub menu: MenuState,

    /// Running game, `None` while on the menu
    pub game: Option<GameState>,

    /// F3 overlay
    pub show_debug: bool,
}

impl AppState {
    pub fn new(settings: Settings, resources: Resources) -> Self {
        let show_debug = settings.show_debug_overlay;
        Self {
            screen: Screen::Menu,
            settings,
            input: InputState::new(),
            resources,
            menu: MenuState::new(),
            game: None,
            show_debug,
        }
    }

    /// Switch to a different screen
    pub fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            info!("Screen: {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
    }

    /// Build a fresh world and start playing
    pub fn start_game(&mut self) -> Result<(), WorldError> {
        let game = build_world(&self.resources, &self.settings)?;
        info!(
            "World built: {} level tiles, {} foreground, {} background, player at ({:.0}, {:.0})",
            game.level.len(),
            game.foreground_tiles.len(),
            game.background_tiles.len(),
            game.player().position.x,
            game.player().position.y,
        );
        self.game = Some(game);
        self.set_screen(Screen::Playing);
        Ok(())
    }

    /// Drop the running game and go back to the title screen
    pub fn return_to_menu(&mut self) {
        self.game = None;
        self.menu.reset();
        self.set_screen(Screen::Menu);
    }

    /// Poll input and advance the active screen by `frame_time` seconds
    /// of wall-clock time.
    pub fn update(&mut self, frame_time: f32) {
        self.input.poll();

        if self.input.action_pressed(Action::ToggleDebug) {
            self.show_debug = !self.show_debug;
        }

        match self.screen {
            Screen::Menu => {
                self.menu.update(frame_time);
                if self.input.start_requested() {
                    if let Err(e) = self.start_game() {
                        error!("Failed to build world: {}", e);
                    }
                }
            }
            Screen::Playing => {
                if self.input.action_pressed(Action::Back) {
                    self.return_to_menu();
                    return;
                }
                let delta_time = self.settings.physics.clamp_delta(frame_time);
                let input = self.input.frame_input();
                if let Some(game) = self.game.as_mut() {
                    game.tick(&input, &self.resources, delta_time);
                    game.update_camera(&self.resources);
                }
            }
        }
    }

    /// Draw the active screen
    pub fn draw(&self, store: &TextureStore) {
        match (self.screen, self.game.as_ref()) {
            (Screen::Playing, Some(game)) => {
                let calls = build_draw_list(game, &self.resources);
                gfx::draw(store, &calls, &Letterbox::current());
                if self.show_debug {
                    gfx::draw_debug_overlay(game);
                }
            }
            _ => draw_menu(&self.menu, self.input.has_gamepad()),
        }
    }
}
