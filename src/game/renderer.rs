//! Render Composition
//!
//! Turns a GameState into an ordered list of draw calls in screen space
//! (logical units, origin at the camera's top-left). Nothing here touches
//! the GPU; the backend in `gfx` consumes the list.
//!
//! Back to front:
//! 1. Sky and static backdrop layers, stretched over the viewport
//! 2. Parallax layers, tiled twice horizontally from their scroll offset
//! 3. Level tiles, then characters (32x32 animation cells)
//! 4. Bullets (cell = collider size)
//! 5. Foreground tiles, then background tiles, at native size

use macroquad::prelude::{Rect, Vec2};
use super::entity::GameObject;
use super::resources::{Resources, TextureKey};
use super::world::GameState;
use super::TILE_SIZE;

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub texture: TextureKey,
    /// Sub-rectangle of the texture in pixels, `None` for the whole texture
    pub source: Option<Rect>,
    /// Destination in screen space
    pub dest: Rect,
    pub flip_x: bool,
}

impl DrawCall {
    fn whole(texture: TextureKey, dest: Rect) -> Self {
        Self {
            texture,
            source: None,
            dest,
            flip_x: false,
        }
    }
}

/// Source rect for the current animation frame of `obj`, cells laid out
/// left to right on one row.
fn animation_cell(obj: &GameObject, cell: Vec2) -> Rect {
    let frame = obj.animation().map_or(0, |anim| anim.current_frame());
    Rect::new(frame as f32 * cell.x, 0.0, cell.x, cell.y)
}

fn animated_call(obj: &GameObject, cell: Vec2, camera: Vec2) -> DrawCall {
    let screen = obj.position - camera;
    DrawCall {
        texture: obj.texture,
        source: Some(animation_cell(obj, cell)),
        dest: Rect::new(screen.x, screen.y, cell.x, cell.y),
        flip_x: obj.direction < 0.0,
    }
}

fn decoration_call(obj: &GameObject, camera: Vec2, res: &Resources) -> DrawCall {
    let screen = obj.position - camera;
    let size = res.texture_size(obj.texture);
    DrawCall::whole(obj.texture, Rect::new(screen.x, screen.y, size.x, size.y))
}

/// Build the full frame for `state`
pub fn build_draw_list(state: &GameState, res: &Resources) -> Vec<DrawCall> {
    let camera = state.camera_position();
    let viewport = state.camera.viewport;
    let full_screen = Rect::new(0.0, 0.0, viewport.w, viewport.h);

    let mut calls = Vec::with_capacity(state.object_count() + 2 * state.backdrop.len() + 1);

    calls.push(DrawCall::whole(state.sky_texture(), full_screen));

    for layer in &state.backdrop {
        if layer.is_static() {
            calls.push(DrawCall::whole(layer.texture, full_screen));
            continue;
        }
        let size = res.texture_size(layer.texture);
        for copy in 0..2 {
            let x = layer.scroll + copy as f32 * size.x;
            calls.push(DrawCall::whole(layer.texture, Rect::new(x, 0.0, size.x, size.y)));
        }
    }

    let cell = Vec2::splat(TILE_SIZE);
    for obj in state.level.iter().chain(state.characters.iter()) {
        calls.push(animated_call(obj, cell, camera));
    }

    for bullet in &state.bullets {
        let cell = Vec2::new(bullet.collider.w, bullet.collider.h);
        calls.push(animated_call(bullet, cell, camera));
    }

    for tile in state.foreground_tiles.iter().chain(state.background_tiles.iter()) {
        calls.push(decoration_call(tile, camera, res));
    }

    calls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::game::resources::{player_anim, test_support};
    use crate::game::tilemap::build_world;

    fn world() -> (GameState, Resources) {
        let res = test_support::resources();
        let state = build_world(&res, &Settings::default()).unwrap();
        (state, res)
    }

    #[test]
    fn test_draw_order() {
        let (mut state, res) = world();
        state.update_camera(&res);
        let calls = build_draw_list(&state, &res);

        // sky + static bg2 + 4 parallax layers drawn twice
        let backdrop = 1 + 1 + 4 * 2;
        assert_eq!(calls.len(), backdrop + state.object_count());
        assert_eq!(calls[0].texture, TextureKey::Background1);
        assert_eq!(calls[1].texture, TextureKey::Background2);
        assert_eq!(calls[2].texture, TextureKey::Background3);
        assert_eq!(calls[3].texture, TextureKey::Background3);
        assert_eq!(calls[backdrop - 1].texture, TextureKey::Background6);

        let player_slot = backdrop + state.level.len() + state.player_index();
        assert_eq!(calls[player_slot].texture, state.player().texture);
    }

    #[test]
    fn test_backdrop_covers_viewport() {
        let (state, res) = world();
        let calls = build_draw_list(&state, &res);
        assert_eq!(calls[0].dest, Rect::new(0.0, 0.0, 640.0, 320.0));
        assert_eq!(calls[1].dest, Rect::new(0.0, 0.0, 640.0, 320.0));
        assert!(calls[0].source.is_none());
    }

    #[test]
    fn test_parallax_tiles_from_scroll() {
        let (mut state, res) = world();
        state.backdrop[1].scroll = -100.0;
        let calls = build_draw_list(&state, &res);

        assert_eq!(calls[2].dest, Rect::new(-100.0, 0.0, 640.0, 320.0));
        assert_eq!(calls[3].dest, Rect::new(540.0, 0.0, 640.0, 320.0));
    }

    #[test]
    fn test_objects_are_camera_relative() {
        let (mut state, res) = world();
        state.update_camera(&res);
        let camera = state.camera_position();
        let calls = build_draw_list(&state, &res);

        let first_tile = &state.level[0];
        let call = &calls[10];
        let expected = first_tile.position - camera;
        assert_eq!(call.dest, Rect::new(expected.x, expected.y, 32.0, 32.0));
        assert_eq!(call.source, Some(Rect::new(0.0, 0.0, 32.0, 32.0)));
    }

    #[test]
    fn test_player_frame_and_flip() {
        let (mut state, res) = world();
        {
            let player = state.player_mut();
            player.direction = -1.0;
            player.current_animation = player_anim::IDLE;
            // Idle: 4 frames over 0.8s, so 0.45s is frame 2
            player.step_animation(0.45);
        }
        let slot = 10 + state.level.len() + state.player_index();
        let call = build_draw_list(&state, &res)[slot];

        assert!(call.flip_x);
        assert_eq!(call.source, Some(Rect::new(64.0, 0.0, 32.0, 32.0)));
    }

    #[test]
    fn test_bullet_cell_uses_collider() {
        let (mut state, res) = world();
        let player = state.player().clone();
        let bullet = crate::game::player::spawn_bullet(&player, &res, &state.physics);
        state.bullets.push(bullet);

        let slot = 10 + state.level.len() + state.characters.len();
        let call = build_draw_list(&state, &res)[slot];
        assert_eq!(call.texture, TextureKey::Bullet);
        assert_eq!(call.source, Some(Rect::new(0.0, 0.0, 8.0, 8.0)));
        assert_eq!(call.dest.w, 8.0);
        assert!(!call.flip_x);
    }

    #[test]
    fn test_decoration_at_native_size() {
        let (state, res) = world();
        let calls = build_draw_list(&state, &res);
        let decorations = state.foreground_tiles.len() + state.background_tiles.len();
        assert!(decorations > 0);

        for call in &calls[calls.len() - decorations..] {
            assert!(call.source.is_none());
            assert_eq!(call.dest.w, 32.0);
            assert_eq!(call.dest.h, 32.0);
        }
    }
}
