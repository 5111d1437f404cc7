//! Graphics backend
//!
//! Owns the GPU textures and executes the draw list produced by
//! `game::renderer`. The game is composed at a fixed logical resolution and
//! scaled uniformly to the window, with bars on the spare axis.

use macroquad::prelude::*;
use macroquad::logging::{debug, info};
use crate::game::{DrawCall, GameState, Resources, TextureKey, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::game::entity::PlayerState;

/// Color of the letterbox bars and the clear color
const BAR_COLOR: Color = BLACK;
const OVERLAY_BG: Color = Color::new(0.0, 0.0, 0.0, 0.6);
const OVERLAY_TEXT: Color = Color::new(0.9, 0.9, 0.9, 1.0);

// ============================================================================
// Errors
// ============================================================================

/// A texture could not be loaded
#[derive(Debug, Clone)]
pub struct AssetError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to load '{}': {}", self.path, self.message)
    }
}

impl std::error::Error for AssetError {}

// ============================================================================
// Textures
// ============================================================================

/// Every texture the game uses, indexed by `TextureKey::index()`
pub struct TextureStore {
    textures: Vec<Texture2D>,
}

impl TextureStore {
    /// Load all textures. Any missing file is fatal.
    pub async fn load() -> Result<Self, AssetError> {
        let mut textures = Vec::with_capacity(TextureKey::COUNT);
        for key in TextureKey::ALL {
            let path = key.path();
            let texture = load_texture(path).await.map_err(|e| AssetError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
            texture.set_filter(FilterMode::Nearest);
            debug!("Loaded {} ({}x{})", path, texture.width(), texture.height());
            textures.push(texture);
        }
        info!("Loaded {} textures", textures.len());
        Ok(Self { textures })
    }

    pub fn get(&self, key: TextureKey) -> &Texture2D {
        &self.textures[key.index()]
    }

    /// Resource pool sized from the loaded textures
    pub fn resources(&self) -> Resources {
        Resources::new(|key| self.get(key).size())
    }
}

// ============================================================================
// Letterboxing
// ============================================================================

/// Mapping from logical units to window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    /// Top-left of the logical area in window pixels
    pub offset: Vec2,
}

impl Letterbox {
    /// Largest uniform scale that fits the logical area in the window,
    /// centred on both axes.
    pub fn fit(screen_w: f32, screen_h: f32) -> Self {
        let scale = (screen_w / LOGICAL_WIDTH).min(screen_h / LOGICAL_HEIGHT).max(0.0);
        let offset = Vec2::new(
            (screen_w - LOGICAL_WIDTH * scale) / 2.0,
            (screen_h - LOGICAL_HEIGHT * scale) / 2.0,
        );
        Self { scale, offset }
    }

    pub fn current() -> Self {
        Self::fit(screen_width(), screen_height())
    }

    /// Logical rect to window rect
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect::new(
            self.offset.x + rect.x * self.scale,
            self.offset.y + rect.y * self.scale,
            rect.w * self.scale,
            rect.h * self.scale,
        )
    }
}

// ============================================================================
// Drawing
// ============================================================================

/// Execute a frame's draw calls
pub fn draw(store: &TextureStore, calls: &[DrawCall], letterbox: &Letterbox) {
    clear_background(BAR_COLOR);

    for call in calls {
        let dest = letterbox.apply(call.dest);
        draw_texture_ex(
            store.get(call.texture),
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                source: call.source,
                flip_x: call.flip_x,
                ..Default::default()
            },
        );
    }

    // Parallax copies reach past the logical area; cover the bars again
    let sw = screen_width();
    let sh = screen_height();
    let area = letterbox.apply(Rect::new(0.0, 0.0, LOGICAL_WIDTH, LOGICAL_HEIGHT));
    if area.x > 0.0 {
        draw_rectangle(0.0, 0.0, area.x, sh, BAR_COLOR);
        draw_rectangle(area.right(), 0.0, sw - area.right(), sh, BAR_COLOR);
    }
    if area.y > 0.0 {
        draw_rectangle(0.0, 0.0, sw, area.y, BAR_COLOR);
        draw_rectangle(0.0, area.bottom(), sw, sh - area.bottom(), BAR_COLOR);
    }
}

fn state_label(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Idle => "idle",
        PlayerState::Running => "running",
        PlayerState::Jumping => "jumping",
    }
}

/// Overlay text for the running game
fn debug_lines(game: &GameState, fps: i32) -> Vec<String> {
    let player = game.player();
    let mut lines = vec![
        format!("FPS: {}", fps),
        format!("pos: ({:.1}, {:.1})", player.position.x, player.position.y),
        format!("vel: ({:.1}, {:.1})", player.velocity.x, player.velocity.y),
    ];

    if let Some(data) = player.player_data() {
        lines.push(format!("state: {}  grounded: {}", state_label(data.state), player.grounded));
        let weapon = &data.weapon_timer;
        let status = if weapon.is_timed_out() { "ready" } else { "cooling" };
        lines.push(format!("weapon: {} ({:.2}/{:.2}s)", status, weapon.elapsed(), weapon.length()));
    }
    if let Some(anim) = player.animation() {
        lines.push(format!(
            "anim: {:?} frame {}/{} ({:.2}s)",
            player.texture,
            anim.current_frame() + 1,
            anim.frame_count(),
            anim.elapsed(),
        ));
    }

    lines.push(format!("bullets: {}  objects: {}", game.bullets.len(), game.object_count()));
    lines.push(format!("camera x: {:.1}", game.camera.viewport.x));
    lines
}

/// Debug text in the top-left corner (F3)
pub fn draw_debug_overlay(game: &GameState) {
    let lines = debug_lines(game, get_fps());

    let font_size = 16.0;
    let line_height = 18.0;
    draw_rectangle(4.0, 4.0, 300.0, lines.len() as f32 * line_height + 8.0, OVERLAY_BG);
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 20.0 + i as f32 * line_height, font_size, OVERLAY_TEXT);
    }
}
