//! Simulation Step
//!
//! Advances the whole GameState by one frame. Every entity shares the same
//! delta time. Order within a frame:
//!
//! 1. Jump edge (before gravity, so the impulse wins this frame)
//! 2. Level layer: gravity, animation
//! 3. Character layer: gravity, player controller, animation
//! 4. Bullets: movement, impact, expiry, animation
//! 5. Expired bullet removal

use macroquad::logging::debug;
use crate::input::FrameInput;
use super::collision::intersection;
use super::entity::{BulletPhase, GameObject};
use super::player::{try_jump, update_player};
use super::resources::{bullet_anim, Resources, TextureKey};
use super::world::GameState;

/// Apply gravity to a dynamic object
fn apply_gravity(obj: &mut GameObject, gravity: f32, delta_time: f32) {
    if obj.dynamic {
        obj.velocity.y += gravity * delta_time;
    }
}

/// Switch a flying bullet into its impact phase
fn start_impact(bullet: &mut GameObject) {
    if let Some(data) = bullet.bullet_data_mut() {
        data.phase = BulletPhase::Impact;
    }
    bullet.velocity.x = 0.0;
    bullet.velocity.y = 0.0;
    bullet.set_visual(TextureKey::BulletHit, bullet_anim::HIT);
    if let Some(anim) = bullet.animations.get_mut(bullet_anim::HIT) {
        anim.reset();
    }
}

impl GameState {
    /// Advance the simulation by `delta_time` seconds.
    /// `delta_time` should already be clamped by the caller.
    pub fn tick(&mut self, input: &FrameInput, res: &Resources, delta_time: f32) {
        let physics = self.physics;

        if input.jump_pressed {
            let player = self.player_mut();
            if try_jump(player, &physics) {
                debug!("Jump from x={:.1}", player.position.x);
            }
        }

        for tile in &mut self.level {
            apply_gravity(tile, physics.gravity, delta_time);
            tile.step_animation(delta_time);
        }

        for i in 0..self.characters.len() {
            let (before, rest) = self.characters.split_at_mut(i);
            let Some((character, after)) = rest.split_first_mut() else {
                break;
            };

            apply_gravity(character, physics.gravity, delta_time);
            if character.is_player() {
                let others: [&[GameObject]; 3] = [self.level.as_slice(), &*before, &*after];
                if let Some(bullet) = update_player(character, &others, input, res, &physics, delta_time) {
                    debug!("Bullet fired at ({:.1}, {:.1})", bullet.position.x, bullet.position.y);
                    self.bullets.push(bullet);
                }
            }
            character.step_animation(delta_time);
        }

        self.update_bullets(delta_time);

        let removed = self.remove_expired_bullets();
        if removed > 0 {
            debug!("Removed {} expired bullet(s), {} in flight", removed, self.bullets.len());
        }
    }

    /// Move bullets, detect level hits and mark expired ones
    fn update_bullets(&mut self, delta_time: f32) {
        let viewport = self.camera.viewport;
        let margin = self.bullet_despawn_margin;
        let level = &self.level;

        for bullet in &mut self.bullets {
            let Some(data) = bullet.bullet_data().copied() else {
                continue;
            };

            bullet.position += bullet.velocity * delta_time;

            if data.phase == BulletPhase::Flying {
                let collider = bullet.world_collider();
                let hit = level
                    .iter()
                    .any(|tile| intersection(&collider, &tile.world_collider()).is_some());
                if hit {
                    start_impact(bullet);
                }
            }

            bullet.step_animation(delta_time);

            let x = bullet.position.x;
            let off_screen = x < viewport.x - margin || x > viewport.x + viewport.w + margin;
            let impact_done = bullet.bullet_data().is_some_and(|b| b.phase == BulletPhase::Impact)
                && bullet.animation().is_some_and(|anim| anim.is_done());

            if off_screen || impact_done {
                if let Some(data) = bullet.bullet_data_mut() {
                    data.expired = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::{Rect, Vec2};
    use crate::config::Settings;
    use crate::game::entity::{BulletData, ObjectData, PlayerState};
    use crate::game::resources::test_support;
    use crate::game::tilemap::build_world;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> (GameState, Resources) {
        let res = test_support::resources();
        let mut state = build_world(&res, &Settings::default()).unwrap();
        state.update_camera(&res);
        (state, res)
    }

    fn bullet_at(position: Vec2, velocity: Vec2, res: &Resources) -> GameObject {
        let mut bullet = GameObject::new(
            ObjectData::Bullet(BulletData::default()),
            position,
            TextureKey::Bullet,
        );
        bullet.collider = Rect::new(0.0, 0.0, 8.0, 8.0);
        bullet.velocity = velocity;
        bullet.animations = res.bullet_anims.clone();
        bullet
    }

    #[test]
    fn test_player_falls_onto_level() {
        let (mut state, res) = world();
        let start_y = state.player().position.y;

        for _ in 0..120 {
            state.tick(&FrameInput::default(), &res, DT);
        }

        let player = state.player();
        assert!(player.grounded);
        assert_eq!(player.velocity.y, 0.0);
        assert!(player.position.y >= start_y);
        assert_eq!(player.player_data().unwrap().state, PlayerState::Idle);
    }

    #[test]
    fn test_level_tiles_stay_put() {
        let (mut state, res) = world();
        let before: Vec<Vec2> = state.level.iter().map(|t| t.position).collect();
        for _ in 0..10 {
            state.tick(&FrameInput::default(), &res, DT);
        }
        let after: Vec<Vec2> = state.level.iter().map(|t| t.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_jump_edge_leaves_ground() {
        let (mut state, res) = world();
        for _ in 0..120 {
            state.tick(&FrameInput::default(), &res, DT);
        }
        assert!(state.player().grounded);

        let jump = FrameInput { jump_pressed: true, ..Default::default() };
        state.tick(&jump, &res, DT);

        let player = state.player();
        assert!(!player.grounded);
        assert!(player.velocity.y < 0.0);
        assert_eq!(player.player_data().unwrap().state, PlayerState::Jumping);
    }

    #[test]
    fn test_fire_adds_bullet() {
        let (mut state, res) = world();
        let fire = FrameInput { fire: true, fire_pressed: true, ..Default::default() };
        state.tick(&fire, &res, DT);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.bullets[0].is_bullet());
    }

    #[test]
    fn test_offscreen_bullet_is_removed() {
        let (mut state, res) = world();
        let right_edge = state.camera.viewport.right();
        let y = -100.0; // above every tile
        state.bullets.push(bullet_at(Vec2::new(right_edge + 62.0, y), Vec2::new(200.0, 0.0), &res));
        state.bullets.push(bullet_at(Vec2::new(right_edge - 100.0, y), Vec2::new(200.0, 0.0), &res));

        // 62 + 200 * DT > 64 for the first bullet only
        state.tick(&FrameInput::default(), &res, DT);
        assert_eq!(state.bullets.len(), 1);

        for _ in 0..120 {
            state.tick(&FrameInput::default(), &res, DT);
        }
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_bullet_impacts_level_then_expires() {
        let (mut state, res) = world();
        let tile = state.level[0].position;
        state.bullets.push(bullet_at(tile + Vec2::new(4.0, 4.0), Vec2::new(200.0, 0.0), &res));
        // Keep the bullet inside the viewport for the whole impact animation
        state.camera.viewport.x = tile.x - 100.0;

        state.tick(&FrameInput::default(), &res, DT);
        assert_eq!(state.bullets.len(), 1);
        let bullet = &state.bullets[0];
        assert_eq!(bullet.bullet_data().unwrap().phase, BulletPhase::Impact);
        assert_eq!(bullet.velocity, Vec2::ZERO);
        assert_eq!(bullet.texture, TextureKey::BulletHit);
        assert_eq!(bullet.current_animation, bullet_anim::HIT);

        let hit_length = res.bullet_anims[bullet_anim::HIT].length();
        let frames = (hit_length / DT) as usize + 2;
        for _ in 0..frames {
            state.tick(&FrameInput::default(), &res, DT);
        }
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_gravity_only_affects_dynamic() {
        let mut obj = GameObject::new(ObjectData::Level, Vec2::ZERO, TextureKey::Grass);
        apply_gravity(&mut obj, 500.0, 0.1);
        assert_eq!(obj.velocity.y, 0.0);

        obj.dynamic = true;
        apply_gravity(&mut obj, 500.0, 0.1);
        assert_eq!(obj.velocity.y, 50.0);
    }
}
