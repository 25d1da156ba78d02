//=========================================================================
// Game Actions
//=========================================================================
//
// High-level commands the player can issue, decoupled from physical keys.
//
// Held actions (movement) are sampled every tick while the key is down.
// Edge actions (toggle, interact) fire once on the press transition.
//
//=========================================================================

//=== GameAction ==========================================================

/// Player command produced by the [`ActionMapper`](super::ActionMapper).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    ToggleFlashlight,
    Interact,
}

impl GameAction {
    /// Every action, in declaration order.
    pub const ALL: [GameAction; 6] = [
        Self::MoveForward,
        Self::MoveBackward,
        Self::StrafeLeft,
        Self::StrafeRight,
        Self::ToggleFlashlight,
        Self::Interact,
    ];

    /// Returns `true` for actions that fire once per key press.
    pub fn is_edge_triggered(self) -> bool {
        matches!(self, Self::ToggleFlashlight | Self::Interact)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
