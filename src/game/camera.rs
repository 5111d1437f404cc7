//! Side-scrolling camera and parallax backdrop
//!
//! The camera only moves horizontally: it keeps the player centred and stays
//! at y = 0. Each frame it reports how far it moved, which drives the
//! parallax layers.

use macroquad::prelude::{Rect, Vec2};
use super::resources::TextureKey;

#[derive(Debug, Clone)]
pub struct Camera {
    /// Visible part of the world in logical units
    pub viewport: Rect,
    /// Camera x from the previous frame, `None` before the first update
    last_x: Option<f32>,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, width, height),
            last_x: None,
        }
    }

    /// Centre the viewport on `target_x` and return the horizontal distance
    /// moved since the previous call (0 on the first call).
    pub fn follow(&mut self, target_x: f32) -> f32 {
        self.viewport.x = target_x - self.viewport.w / 2.0;
        self.viewport.y = 0.0;

        let delta = self.last_x.map_or(0.0, |last| self.viewport.x - last);
        self.last_x = Some(self.viewport.x);
        delta
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.viewport.x, self.viewport.y)
    }
}

/// One horizontally scrolling background layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    pub texture: TextureKey,
    /// Fraction of the camera movement applied to this layer.
    /// A zero factor pins the layer to the viewport.
    pub factor: f32,
    /// Horizontal offset in `(-texture_width, 0]`
    pub scroll: f32,
}

impl ParallaxLayer {
    pub const fn new(texture: TextureKey, factor: f32) -> Self {
        Self {
            texture,
            factor,
            scroll: 0.0,
        }
    }

    /// Scroll against the camera movement and wrap by one texture width.
    pub fn update(&mut self, camera_dx: f32, texture_width: f32) {
        self.scroll -= camera_dx * self.factor;

        if texture_width <= 0.0 {
            return;
        }
        if self.scroll <= -texture_width {
            self.scroll += texture_width;
        } else if self.scroll > 0.0 {
            self.scroll -= texture_width;
        }
    }

    pub fn is_static(&self) -> bool {
        self.factor == 0.0
    }
}

/// Backdrop layers behind the level, back to front.
/// The sky (bg1) is drawn separately and never scrolls.
pub fn default_backdrop() -> [ParallaxLayer; 5] {
    [
        ParallaxLayer::new(TextureKey::Background2, 0.0),
        ParallaxLayer::new(TextureKey::Background3, 0.150),
        ParallaxLayer::new(TextureKey::Background4, 0.150),
        ParallaxLayer::new(TextureKey::Background5, 0.075),
        ParallaxLayer::new(TextureKey::Background6, 0.3),
    ]
}
