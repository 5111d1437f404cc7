//! Per-frame input snapshot

/// What the player is doing this frame.
///
/// Held flags are continuous state; `*_pressed` flags are true only on the
/// frame the action went down, so holding a key does not retrigger them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub fire_pressed: bool,
    pub jump_pressed: bool,
}

impl FrameInput {
    /// Signed horizontal input: -1, 0 or +1. Left and right together cancel.
    pub fn direction(&self) -> f32 {
        let mut direction = 0.0;
        if self.left {
            direction -= 1.0;
        }
        if self.right {
            direction += 1.0;
        }
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction() {
        assert_eq!(FrameInput::default().direction(), 0.0);
        assert_eq!(FrameInput { left: true, ..Default::default() }.direction(), -1.0);
        assert_eq!(FrameInput { right: true, ..Default::default() }.direction(), 1.0);
        assert_eq!(FrameInput { left: true, right: true, ..Default::default() }.direction(), 0.0);
    }
}
