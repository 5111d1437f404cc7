//! Shared Game Resources
//!
//! Textures are identified by `TextureKey`, a fixed enum used as an index into
//! the backend's texture store. Entities only ever hold keys, so any number of
//! them can reference the same texture without copying it.
//!
//! `Resources` is built once at startup and is read-only afterwards. It knows
//! the native size of every texture (needed for bullet colliders, tile drawing
//! and parallax wrapping) and holds the animation templates.

use macroquad::prelude::Vec2;
use super::animation::Animation;

/// Handle to a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    PlayerIdle,
    PlayerRun,
    PlayerSlide,
    Grass,
    DeepGrass,
    GrassRight,
    GrassLeft,
    GrassConnectRight,
    GrassConnectLeft,
    Background1,
    Background2,
    Background3,
    Background4,
    Background5,
    Background6,
    Bullet,
    BulletHit,
}

impl TextureKey {
    pub const COUNT: usize = 17;

    pub const ALL: [TextureKey; Self::COUNT] = [
        TextureKey::PlayerIdle,
        TextureKey::PlayerRun,
        TextureKey::PlayerSlide,
        TextureKey::Grass,
        TextureKey::DeepGrass,
        TextureKey::GrassRight,
        TextureKey::GrassLeft,
        TextureKey::GrassConnectRight,
        TextureKey::GrassConnectLeft,
        TextureKey::Background1,
        TextureKey::Background2,
        TextureKey::Background3,
        TextureKey::Background4,
        TextureKey::Background5,
        TextureKey::Background6,
        TextureKey::Bullet,
        TextureKey::BulletHit,
    ];

    /// Slot in texture arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// Asset path relative to the working directory
    pub fn path(self) -> &'static str {
        match self {
            TextureKey::PlayerIdle => "data/idle.png",
            TextureKey::PlayerRun => "data/run.png",
            TextureKey::PlayerSlide => "data/slide.png",
            TextureKey::Grass => "data/Tiles/grass1.png",
            TextureKey::DeepGrass => "data/Tiles/deepGrass.png",
            TextureKey::GrassRight => "data/Tiles/grassR.png",
            TextureKey::GrassLeft => "data/Tiles/grassL.png",
            TextureKey::GrassConnectRight => "data/Tiles/grassConR.png",
            TextureKey::GrassConnectLeft => "data/Tiles/grassConL.png",
            TextureKey::Background1 => "data/Background/j1.png",
            TextureKey::Background2 => "data/Background/j2.png",
            TextureKey::Background3 => "data/Background/j3.png",
            TextureKey::Background4 => "data/Background/j4.png",
            TextureKey::Background5 => "data/Background/j5.png",
            TextureKey::Background6 => "data/Background/j6.png",
            TextureKey::Bullet => "data/bullet.png",
            TextureKey::BulletHit => "data/bullet_hit.png",
        }
    }
}

/// Indices into the player animation set
pub mod player_anim {
    pub const IDLE: usize = 0;
    pub const RUN: usize = 1;
    pub const SLIDE: usize = 2;
}

/// Indices into the bullet animation set
pub mod bullet_anim {
    pub const MOVING: usize = 0;
    pub const HIT: usize = 1;
}

/// Read-only resource pool shared by the whole game.
#[derive(Debug, Clone)]
pub struct Resources {
    /// Native pixel size per texture, indexed by `TextureKey::index()`
    texture_sizes: [Vec2; TextureKey::COUNT],
    /// Animation template for the player (idle, run, slide)
    pub player_anims: Vec<Animation>,
    /// Animation template for bullets (moving, hit)
    pub bullet_anims: Vec<Animation>,
}

impl Resources {
    /// Build the pool from a texture size lookup.
    /// The backend passes the sizes of the textures it actually loaded.
    pub fn new(size_of: impl Fn(TextureKey) -> Vec2) -> Self {
        let texture_sizes = TextureKey::ALL.map(size_of);

        let mut player_anims = vec![Animation::new(1, 1.0); 3];
        player_anims[player_anim::IDLE] = Animation::new(4, 0.8);
        player_anims[player_anim::RUN] = Animation::new(4, 0.5);
        player_anims[player_anim::SLIDE] = Animation::new(1, 1.0);

        let mut bullet_anims = vec![Animation::new(1, 1.0); 2];
        bullet_anims[bullet_anim::MOVING] = Animation::new(4, 0.08);
        bullet_anims[bullet_anim::HIT] = Animation::new(4, 0.15);

        Self {
            texture_sizes,
            player_anims,
            bullet_anims,
        }
    }

    /// Native size of a texture in pixels
    pub fn texture_size(&self, key: TextureKey) -> Vec2 {
        self.texture_sizes[key.index()]
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Resources with the sizes of the shipped art, no GPU needed.
    pub fn resources() -> Resources {
        Resources::new(|key| match key {
            TextureKey::PlayerIdle | TextureKey::PlayerRun => Vec2::new(128.0, 32.0),
            TextureKey::PlayerSlide => Vec2::new(32.0, 32.0),
            TextureKey::Bullet => Vec2::new(8.0, 8.0),
            TextureKey::BulletHit => Vec2::new(32.0, 8.0),
            TextureKey::Background1
            | TextureKey::Background2
            | TextureKey::Background3
            | TextureKey::Background4
            | TextureKey::Background5
            | TextureKey::Background6 => Vec2::new(640.0, 320.0),
            _ => Vec2::new(32.0, 32.0),
        })
    }
}
