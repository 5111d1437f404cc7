//! Game Objects
//!
//! Every live thing in the world is a `GameObject`: level tiles, the player
//! and bullets. The shared fields (transform, physics, collider, visuals) live
//! on the struct, and the per-type state lives in the `ObjectData` variant.
//! Storing one concrete type keeps the layers flat `Vec`s.

use macroquad::prelude::{Rect, Vec2};
use super::animation::Animation;
use super::resources::TextureKey;
use super::timer::Timer;

/// Player state machine tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Running,
    Jumping,
}

/// Player-only state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerData {
    pub state: PlayerState,
    /// Cooldown between shots
    pub weapon_timer: Timer,
}

impl PlayerData {
    pub fn new(weapon_cooldown: f32) -> Self {
        Self {
            state: PlayerState::Idle,
            weapon_timer: Timer::expired(weapon_cooldown),
        }
    }
}

/// Bullet lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletPhase {
    #[default]
    Flying,
    /// Hit level geometry, playing the impact animation
    Impact,
}

/// Bullet-only state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BulletData {
    pub phase: BulletPhase,
    /// Set once the bullet should be removed
    pub expired: bool,
}

/// Type tag plus type-specific payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectData {
    Level,
    Player(PlayerData),
    Bullet(BulletData),
}

/// A single entity in the world.
#[derive(Debug, Clone)]
pub struct GameObject {
    pub data: ObjectData,
    /// Top-left corner in world space
    pub position: Vec2,
    pub velocity: Vec2,
    /// Only x is used (player run acceleration/deceleration)
    pub acceleration: Vec2,
    pub max_speed_x: f32,
    /// Collision box, offset relative to `position`
    pub collider: Rect,
    pub texture: TextureKey,
    pub animations: Vec<Animation>,
    pub current_animation: usize,
    /// +1 facing right, -1 facing left
    pub direction: f32,
    /// Affected by gravity
    pub dynamic: bool,
    pub grounded: bool,
}

impl GameObject {
    pub fn new(data: ObjectData, position: Vec2, texture: TextureKey) -> Self {
        Self {
            data,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed_x: 0.0,
            collider: Rect::new(0.0, 0.0, 0.0, 0.0),
            texture,
            animations: Vec::new(),
            current_animation: 0,
            direction: 1.0,
            dynamic: false,
            grounded: false,
        }
    }

    /// Collider in world space
    pub fn world_collider(&self) -> Rect {
        Rect::new(
            self.position.x + self.collider.x,
            self.position.y + self.collider.y,
            self.collider.w,
            self.collider.h,
        )
    }

    /// The running animation, if the index is valid
    pub fn animation(&self) -> Option<&Animation> {
        self.animations.get(self.current_animation)
    }

    /// Advance the current animation. Invalid indices are skipped.
    pub fn step_animation(&mut self, delta_time: f32) {
        if let Some(anim) = self.animations.get_mut(self.current_animation) {
            anim.step(delta_time);
        }
    }

    /// Switch visuals (texture + animation index) in one go
    pub fn set_visual(&mut self, texture: TextureKey, animation: usize) {
        self.texture = texture;
        self.current_animation = animation;
    }

    pub fn is_level(&self) -> bool {
        matches!(self.data, ObjectData::Level)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.data, ObjectData::Player(_))
    }

    #[cfg(test)]
    pub fn is_bullet(&self) -> bool {
        matches!(self.data, ObjectData::Bullet(_))
    }

    pub fn player_data(&self) -> Option<&PlayerData> {
        match &self.data {
            ObjectData::Player(data) => Some(data),
            _ => None,
        }
    }

    pub fn player_data_mut(&mut self) -> Option<&mut PlayerData> {
        match &mut self.data {
            ObjectData::Player(data) => Some(data),
            _ => None,
        }
    }

    pub fn bullet_data(&self) -> Option<&BulletData> {
        match &self.data {
            ObjectData::Bullet(data) => Some(data),
            _ => None,
        }
    }

    pub fn bullet_data_mut(&mut self) -> Option<&mut BulletData> {
        match &mut self.data {
            ObjectData::Bullet(data) => Some(data),
            _ => None,
        }
    }
}
