//! Red Veil: a small side-scrolling platformer
//!
//! Run, jump and shoot through a tile-built level in front of a parallax
//! backdrop. Pixel art is drawn at 640x320 and scaled to the window.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod game;
mod gfx;
mod input;
mod menu;

use std::path::Path;
use macroquad::prelude::*;
use macroquad::logging::{error, info, warn};
use app::AppState;
use config::{load_settings, Settings, SETTINGS_PATH};

fn window_conf() -> Conf {
    // Errors are reported once the loop starts; the window just needs a size
    let settings = load_settings(Path::new(SETTINGS_PATH)).unwrap_or_default();
    Conf {
        window_title: settings.window.title,
        window_width: settings.window.width,
        window_height: settings.window.height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn startup_settings() -> Settings {
    match load_settings(Path::new(SETTINGS_PATH)) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Ignoring {}: {}, using defaults", SETTINGS_PATH, e);
            Settings::default()
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    info!("=== Red Veil v{} ===", VERSION);

    let settings = startup_settings();

    let store = match gfx::TextureStore::load().await {
        Ok(store) => store,
        Err(e) => {
            error!("Asset loading failed: {}", e);
            return;
        }
    };
    let resources = store.resources();

    // The grids are fixed, so a bad map fails here rather than on the menu
    if let Err(e) = game::build_world(&resources, &settings) {
        error!("Invalid level: {}", e);
        return;
    }

    let mut app = AppState::new(settings, resources);

    loop {
        app.update(get_frame_time());
        app.draw(&store);
        next_frame().await;
    }
}
