//! Game action definitions

/// All actions that can be triggered by input
///
/// Keyboard / gamepad (Xbox labels):
/// - MoveLeft: A, Left arrow / D-pad left, left stick
/// - MoveRight: D, Right arrow / D-pad right, left stick
/// - Jump: Space / A
/// - Fire: F / X
/// - Confirm: Enter, Space / Start, A
/// - Back: Escape / Select
/// - ToggleDebug: F3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,

    // Player
    Jump,
    Fire,

    // Menu / system
    Confirm,
    Back,
    ToggleDebug,
}
