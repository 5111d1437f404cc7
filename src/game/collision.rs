//! Collision System
//!
//! Axis-aligned box collision between the player and level tiles.
//! Overlaps are resolved along the axis of least penetration: a tall, thin
//! overlap is a wall hit, anything else is a floor or ceiling hit.

use macroquad::prelude::Rect;
use super::entity::GameObject;

/// Height of the ground sensor strip below the collider
pub const GROUND_SENSOR_HEIGHT: f32 = 1.0;

/// Intersection of two rectangles. Touching edges do not count: both the
/// width and the height of the overlap must be positive.
pub fn intersection(a: &Rect, b: &Rect) -> Option<Rect> {
    let left = a.x.max(b.x);
    let top = a.y.max(b.y);
    let right = (a.x + a.w).min(b.x + b.w);
    let bottom = (a.y + a.h).min(b.y + b.h);

    if right > left && bottom > top {
        Some(Rect::new(left, top, right - left, bottom - top))
    } else {
        None
    }
}

/// Axis chosen to push an object out of an overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAxis {
    Horizontal,
    Vertical,
}

/// Penetration narrower than it is tall resolves horizontally.
/// Ties resolve vertically.
pub fn resolve_axis(overlap: &Rect) -> ResolveAxis {
    if overlap.w < overlap.h {
        ResolveAxis::Horizontal
    } else {
        ResolveAxis::Vertical
    }
}

/// Push `obj` out of `other` if their colliders overlap and `other` is level
/// geometry. Returns true if an overlap was found.
pub fn resolve_against(obj: &mut GameObject, other: &GameObject) -> bool {
    let rect_a = obj.world_collider();
    let rect_b = other.world_collider();

    let Some(overlap) = intersection(&rect_a, &rect_b) else {
        return false;
    };

    if other.is_level() {
        match resolve_axis(&overlap) {
            ResolveAxis::Horizontal => {
                if rect_a.x < rect_b.x {
                    obj.position.x -= overlap.w;
                } else {
                    obj.position.x += overlap.w;
                }
                // Horizontal velocity is kept; zeroing it stutters when
                // running along a wall seam.
            }
            ResolveAxis::Vertical => {
                if obj.velocity.y > 0.0 {
                    obj.position.y -= overlap.h;
                } else if obj.velocity.y < 0.0 {
                    obj.position.y += overlap.h;
                }
                obj.velocity.y = 0.0;
            }
        }
    }
    true
}

/// Thin strip directly under the collider, used to detect standing on ground
pub fn ground_sensor(obj: &GameObject) -> Rect {
    let collider = obj.world_collider();
    Rect::new(
        collider.x,
        collider.y + collider.h,
        collider.w,
        GROUND_SENSOR_HEIGHT,
    )
}

/// Is `obj` standing on `other`?
pub fn touches_ground(obj: &GameObject, other: &GameObject) -> bool {
    intersection(&ground_sensor(obj), &other.world_collider()).is_some()
}
