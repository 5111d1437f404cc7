//! Game World
//!
//! The GameState is the container for everything that changes while playing:
//! - The level and character layers (collision participants, drawn in order)
//! - Foreground/background decoration tiles
//! - In-flight bullets, removed once expired
//! - Camera and parallax backdrop
//!
//! Exactly one object in the character layer is the player. Its index is
//! fixed at build time and is valid for the lifetime of the state.

use macroquad::prelude::Vec2;
use crate::config::{PhysicsSettings, Settings};
use super::camera::{default_backdrop, Camera, ParallaxLayer};
use super::entity::GameObject;
use super::resources::{Resources, TextureKey};
use super::{LOGICAL_HEIGHT, LOGICAL_WIDTH, TILE_SIZE};

pub struct GameState {
    /// Level geometry (collides with the player)
    pub level: Vec<GameObject>,
    /// Player (and any future characters)
    pub characters: Vec<GameObject>,
    /// Decoration drawn over the level
    pub foreground_tiles: Vec<GameObject>,
    /// Decoration tiles
    pub background_tiles: Vec<GameObject>,
    /// In-flight bullets, unordered
    pub bullets: Vec<GameObject>,

    /// Index of the player in `characters`
    player_index: usize,

    pub camera: Camera,
    /// Scrolling backdrop layers (bg2..bg6)
    pub backdrop: [ParallaxLayer; 5],

    pub physics: PhysicsSettings,
    /// Distance outside the viewport after which bullets are removed
    pub bullet_despawn_margin: f32,
}

impl GameState {
    /// Create a state from prebuilt layers. `player_index` must point at the
    /// player inside `characters`.
    pub fn new(
        level: Vec<GameObject>,
        characters: Vec<GameObject>,
        foreground_tiles: Vec<GameObject>,
        background_tiles: Vec<GameObject>,
        player_index: usize,
        settings: &Settings,
    ) -> Self {
        debug_assert!(characters.get(player_index).is_some_and(|c| c.is_player()));
        Self {
            level,
            characters,
            foreground_tiles,
            background_tiles,
            bullets: Vec::new(),
            player_index,
            camera: Camera::new(LOGICAL_WIDTH, LOGICAL_HEIGHT),
            backdrop: default_backdrop(),
            physics: settings.physics,
            bullet_despawn_margin: settings.bullet_despawn_margin,
        }
    }

    #[cfg(test)]
    pub fn player_index(&self) -> usize {
        self.player_index
    }

    pub fn player(&self) -> &GameObject {
        &self.characters[self.player_index]
    }

    pub fn player_mut(&mut self) -> &mut GameObject {
        &mut self.characters[self.player_index]
    }

    /// Move the camera onto the player and scroll the backdrop by the
    /// camera's movement since last frame.
    pub fn update_camera(&mut self, res: &Resources) {
        let player_center_x = self.player().position.x + TILE_SIZE / 2.0;
        let camera_dx = self.camera.follow(player_center_x);

        for layer in &mut self.backdrop {
            layer.update(camera_dx, res.texture_size(layer.texture).x);
        }
    }

    pub fn camera_position(&self) -> Vec2 {
        self.camera.position()
    }

    /// Remove expired bullets. Swap-remove keeps this O(n); bullet order
    /// carries no meaning.
    pub fn remove_expired_bullets(&mut self) -> usize {
        let before = self.bullets.len();
        let mut i = 0;
        while i < self.bullets.len() {
            let expired = self.bullets[i].bullet_data().is_some_and(|b| b.expired);
            if expired {
                self.bullets.swap_remove(i);
            } else {
                i += 1;
            }
        }
        before - self.bullets.len()
    }

    /// Total number of live objects
    pub fn object_count(&self) -> usize {
        self.level.len()
            + self.characters.len()
            + self.foreground_tiles.len()
            + self.background_tiles.len()
            + self.bullets.len()
    }

    /// Texture used by the static sky
    pub fn sky_texture(&self) -> TextureKey {
        TextureKey::Background1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::{BulletData, ObjectData};
    use crate::game::resources::test_support;
    use crate::game::tilemap::build_world;

    fn bullet(expired: bool) -> GameObject {
        GameObject::new(
            ObjectData::Bullet(BulletData { expired, ..Default::default() }),
            Vec2::ZERO,
            TextureKey::Bullet,
        )
    }

    #[test]
    fn test_remove_expired_bullets() {
        let res = test_support::resources();
        let mut state = build_world(&res, &Settings::default()).unwrap();
        state.bullets = vec![bullet(true), bullet(false), bullet(true), bullet(true), bullet(false)];

        assert_eq!(state.remove_expired_bullets(), 3);
        assert_eq!(state.bullets.len(), 2);
        assert!(state.bullets.iter().all(|b| !b.bullet_data().unwrap().expired));
    }

    #[test]
    fn test_camera_tracks_player_centre() {
        let res = test_support::resources();
        let mut state = build_world(&res, &Settings::default()).unwrap();
        state.player_mut().position.x = 500.0;
        state.update_camera(&res);

        assert_eq!(state.camera.viewport.x, 500.0 + TILE_SIZE / 2.0 - LOGICAL_WIDTH / 2.0);
        assert_eq!(state.camera.viewport.y, 0.0);
    }

    #[test]
    fn test_backdrop_scrolls_with_camera() {
        let res = test_support::resources();
        let mut state = build_world(&res, &Settings::default()).unwrap();
        state.update_camera(&res); // first frame: no movement

        state.player_mut().position.x += 10.0;
        state.update_camera(&res);

        for layer in &state.backdrop {
            let expected = if layer.is_static() { 0.0 } else { -10.0 * layer.factor };
            assert!((layer.scroll - expected).abs() < 1e-4);
        }
    }
}
