//! Player Controller
//!
//! Input-driven state machine for the player character:
//!
//! ```text
//!   idle ──direction──> running ──no direction──> idle
//!    │                    │
//!    └──jump (grounded)───┴──> jumping ──landed──> running
//! ```
//!
//! The state tag drives which animation is shown; sliding is a visual
//! variant of running (moving against the facing direction while grounded).

use macroquad::prelude::{Rect, Vec2};
use crate::config::PhysicsSettings;
use crate::input::FrameInput;
use super::collision::{resolve_against, touches_ground};
use super::entity::{BulletData, GameObject, ObjectData, PlayerState};
use super::resources::{bullet_anim, player_anim, Resources, TextureKey};

/// Vertical offset of a spawned bullet below the player's top edge
const BULLET_SPAWN_OFFSET_Y: f32 = 4.0;

/// Start a jump if the player is grounded and not already airborne.
/// Called on the jump press edge only. Returns true if a jump started.
pub fn try_jump(player: &mut GameObject, physics: &PhysicsSettings) -> bool {
    let grounded = player.grounded;
    let Some(data) = player.player_data_mut() else {
        return false;
    };

    match data.state {
        PlayerState::Idle | PlayerState::Running if grounded => {
            data.state = PlayerState::Jumping;
            player.velocity.y = physics.jump_impulse;
            true
        }
        _ => false,
    }
}

/// Create a bullet at the player's leading edge, flying the way they face
pub fn spawn_bullet(player: &GameObject, res: &Resources, physics: &PhysicsSettings) -> GameObject {
    let size = res.texture_size(TextureKey::Bullet);
    let offset_x = if player.direction > 0.0 { player.collider.w } else { -size.x };

    let mut bullet = GameObject::new(
        ObjectData::Bullet(BulletData::default()),
        player.position + Vec2::new(offset_x, BULLET_SPAWN_OFFSET_Y),
        TextureKey::Bullet,
    );
    bullet.direction = player.direction;
    bullet.collider = Rect::new(0.0, 0.0, size.x, size.y);
    bullet.velocity = Vec2::new(player.direction * physics.bullet_speed, 0.0);
    bullet.animations = res.bullet_anims.clone();
    bullet.current_animation = bullet_anim::MOVING;
    bullet.dynamic = false;
    bullet
}

/// Move `velocity_x` toward zero by `amount` without crossing zero
fn decelerate(velocity_x: f32, amount: f32) -> f32 {
    if velocity_x.abs() <= amount {
        0.0
    } else {
        velocity_x - velocity_x.signum() * amount
    }
}

/// Run one frame of the player: state machine, movement, collision against
/// `others` and ground detection. Gravity has already been applied.
/// Returns a bullet if the player fired this frame.
pub fn update_player(
    player: &mut GameObject,
    others: &[&[GameObject]],
    input: &FrameInput,
    res: &Resources,
    physics: &PhysicsSettings,
    delta_time: f32,
) -> Option<GameObject> {
    let mut data = *player.player_data()?;
    let mut fired = None;

    let current_direction = input.direction();
    if current_direction != 0.0 {
        player.direction = current_direction;
    }

    data.weapon_timer.step(delta_time);

    match data.state {
        PlayerState::Idle => {
            if current_direction != 0.0 {
                data.state = PlayerState::Running;
            } else if player.velocity.x != 0.0 {
                player.velocity.x = decelerate(player.velocity.x, player.acceleration.x * delta_time);
            }

            let can_fire = input.fire_pressed || (input.fire && data.weapon_timer.is_timed_out());
            if can_fire {
                data.weapon_timer.reset();
                fired = Some(spawn_bullet(player, res, physics));
            }
            player.set_visual(TextureKey::PlayerIdle, player_anim::IDLE);
        }
        PlayerState::Running => {
            if current_direction == 0.0 {
                data.state = PlayerState::Idle;
            }
            if player.velocity.x * player.direction < 0.0 && player.grounded {
                player.set_visual(TextureKey::PlayerSlide, player_anim::SLIDE);
            } else {
                player.set_visual(TextureKey::PlayerRun, player_anim::RUN);
            }
        }
        PlayerState::Jumping => {
            player.set_visual(TextureKey::PlayerRun, player_anim::RUN);
        }
    }

    // Run acceleration, snapped to the speed cap
    player.velocity.x += current_direction * player.acceleration.x * delta_time;
    if player.velocity.x.abs() > player.max_speed_x {
        player.velocity.x = player.velocity.x.signum() * player.max_speed_x;
    }

    player.position += player.velocity * delta_time;

    for other in others.iter().flat_map(|layer| layer.iter()) {
        resolve_against(player, other);
    }

    player.grounded = others
        .iter()
        .flat_map(|layer| layer.iter())
        .any(|other| touches_ground(player, other));

    if data.state == PlayerState::Jumping && player.grounded && player.velocity.y >= 0.0 {
        data.state = PlayerState::Running;
    }

    if let Some(slot) = player.player_data_mut() {
        *slot = data;
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::PlayerData;
    use crate::game::resources::test_support;

    const DT: f32 = 1.0 / 60.0;

    fn physics() -> PhysicsSettings {
        PhysicsSettings::default()
    }

    fn player() -> GameObject {
        let res = test_support::resources();
        let physics = physics();
        let mut player = GameObject::new(
            ObjectData::Player(PlayerData::new(physics.weapon_cooldown)),
            Vec2::new(64.0, 68.0),
            TextureKey::PlayerIdle,
        );
        player.collider = Rect::new(6.0, 6.0, 20.0, 26.0);
        player.acceleration = Vec2::new(physics.player_acceleration, 0.0);
        player.max_speed_x = physics.player_max_speed;
        player.animations = res.player_anims.clone();
        player.dynamic = true;
        player
    }

    /// A floor of tiles whose top edge is at y = 100
    fn floor() -> Vec<GameObject> {
        (0..10)
            .map(|i| {
                let mut tile = GameObject::new(
                    ObjectData::Level,
                    Vec2::new(i as f32 * 32.0, 100.0),
                    TextureKey::Grass,
                );
                tile.collider = Rect::new(0.0, 0.0, 32.0, 32.0);
                tile
            })
            .collect()
    }

    fn state_of(player: &GameObject) -> PlayerState {
        player.player_data().unwrap().state
    }

    fn step(player: &mut GameObject, level: &[GameObject], input: &FrameInput) -> Option<GameObject> {
        let res = test_support::resources();
        let physics = physics();
        if player.dynamic {
            player.velocity.y += physics.gravity * DT;
        }
        update_player(player, &[level], input, &res, &physics, DT)
    }

    #[test]
    fn test_idle_deceleration_reaches_zero_without_sign_change() {
        let mut p = player();
        let level = floor();
        p.velocity.x = 50.0;

        let mut last = p.velocity.x;
        for _ in 0..120 {
            step(&mut p, &level, &FrameInput::default());
            assert!(p.velocity.x >= 0.0);
            if last > 0.0 {
                assert!(p.velocity.x < last);
            }
            last = p.velocity.x;
        }
        assert_eq!(p.velocity.x, 0.0);
        assert_eq!(state_of(&p), PlayerState::Idle);
    }

    #[test]
    fn test_direction_input_starts_running() {
        let mut p = player();
        let level = floor();
        let input = FrameInput { right: true, ..Default::default() };

        step(&mut p, &level, &input);
        assert_eq!(state_of(&p), PlayerState::Running);
        assert_eq!(p.direction, 1.0);

        step(&mut p, &level, &FrameInput::default());
        assert_eq!(state_of(&p), PlayerState::Idle);
    }

    #[test]
    fn test_speed_is_capped() {
        let mut p = player();
        let level = floor();
        let input = FrameInput { left: true, ..Default::default() };

        for _ in 0..300 {
            step(&mut p, &level, &input);
            assert!(p.velocity.x.abs() <= p.max_speed_x);
        }
        assert_eq!(p.velocity.x, -p.max_speed_x);
        assert_eq!(p.direction, -1.0);
    }

    #[test]
    fn test_slide_visual_when_reversing() {
        let mut p = player();
        let level = floor();
        step(&mut p, &level, &FrameInput::default());
        assert!(p.grounded);

        let right = FrameInput { right: true, ..Default::default() };
        for _ in 0..30 {
            step(&mut p, &level, &right);
        }
        assert_eq!(p.texture, TextureKey::PlayerRun);

        let left = FrameInput { left: true, ..Default::default() };
        step(&mut p, &level, &left);
        assert!(p.velocity.x > 0.0);
        assert_eq!(p.texture, TextureKey::PlayerSlide);
        assert_eq!(p.current_animation, player_anim::SLIDE);
        assert_eq!(state_of(&p), PlayerState::Running);
    }

    #[test]
    fn test_resting_on_floor_is_grounded() {
        let mut p = player();
        let level = floor();
        for _ in 0..10 {
            step(&mut p, &level, &FrameInput::default());
            assert!(p.grounded);
            assert_eq!(p.velocity.y, 0.0);
        }
        // Collider bottom stays on the floor top
        assert!((p.world_collider().bottom() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_falls_without_floor() {
        let mut p = player();
        step(&mut p, &[], &FrameInput::default());
        assert!(!p.grounded);
        assert!(p.velocity.y > 0.0);
    }

    #[test]
    fn test_jump_once_per_press() {
        let mut p = player();
        let level = floor();
        step(&mut p, &level, &FrameInput::default());
        assert!(p.grounded);

        let physics = physics();
        assert!(try_jump(&mut p, &physics));
        assert_eq!(state_of(&p), PlayerState::Jumping);
        assert_eq!(p.velocity.y, physics.jump_impulse);

        // Still on the ground this instant, but already jumping: no retrigger
        p.velocity.y = -10.0;
        assert!(!try_jump(&mut p, &physics));
        assert_eq!(p.velocity.y, -10.0);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut p = player();
        p.grounded = false;
        assert!(!try_jump(&mut p, &physics()));
        assert_eq!(state_of(&p), PlayerState::Idle);
    }

    #[test]
    fn test_jump_lands_as_running() {
        let mut p = player();
        let level = floor();
        step(&mut p, &level, &FrameInput::default());
        try_jump(&mut p, &physics());

        step(&mut p, &level, &FrameInput::default());
        assert!(!p.grounded);
        assert_eq!(state_of(&p), PlayerState::Jumping);

        let mut landed = false;
        for _ in 0..200 {
            step(&mut p, &level, &FrameInput::default());
            if state_of(&p) != PlayerState::Jumping {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(state_of(&p), PlayerState::Running);
        assert!(p.grounded);
    }

    #[test]
    fn test_fire_spawns_one_bullet() {
        let mut p = player();
        let level = floor();
        step(&mut p, &level, &FrameInput::default());

        let fire = FrameInput { fire: true, fire_pressed: true, ..Default::default() };
        let bullet = step(&mut p, &level, &fire).expect("bullet");
        assert!(bullet.is_bullet());
        assert_eq!(bullet.velocity, Vec2::new(physics().bullet_speed, 0.0));
        assert!(!bullet.dynamic);
        assert_eq!(bullet.collider, Rect::new(0.0, 0.0, 8.0, 8.0));

        // Held key within the cooldown does not fire again
        let held = FrameInput { fire: true, ..Default::default() };
        assert!(step(&mut p, &level, &held).is_none());
    }

    #[test]
    fn test_held_fire_repeats_after_cooldown() {
        let mut p = player();
        let level = floor();
        let fire = FrameInput { fire: true, fire_pressed: true, ..Default::default() };
        assert!(step(&mut p, &level, &fire).is_some());

        let held = FrameInput { fire: true, ..Default::default() };
        let frames = (physics().weapon_cooldown / DT) as usize + 2;
        let shots = (0..frames).filter(|_| step(&mut p, &level, &held).is_some()).count();
        assert_eq!(shots, 1);
    }

    #[test]
    fn test_bullet_faces_left() {
        let mut p = player();
        p.direction = -1.0;
        let res = test_support::resources();
        let bullet = spawn_bullet(&p, &res, &physics());

        assert_eq!(bullet.direction, -1.0);
        assert_eq!(bullet.velocity, Vec2::new(-physics().bullet_speed, 0.0));
        assert_eq!(bullet.position, p.position + Vec2::new(-8.0, BULLET_SPAWN_OFFSET_Y));
    }

    #[test]
    fn test_decelerate() {
        assert_eq!(decelerate(10.0, 3.0), 7.0);
        assert_eq!(decelerate(-10.0, 3.0), -7.0);
        assert_eq!(decelerate(2.0, 3.0), 0.0);
        assert_eq!(decelerate(-2.0, 3.0), 0.0);
    }
}
