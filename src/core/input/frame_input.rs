//=========================================================================
// Frame Input
//=========================================================================
//
// Latched, read-only input snapshot consumed once per logic tick.
//
// Built by the InputSystem after folding the tick's events into the
// StateTracker. Edge actions are already reduced to booleans here, so a
// held key never fires them twice.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Vec2, Vec3};

//=== FrameInput ==========================================================

/// What the player asked for during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    //--- Held ------------------------------------------------------------
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,

    //--- Continuous ------------------------------------------------------
    /// Relative pointer motion accumulated this tick (device units).
    pub look_delta: Vec2,

    //--- Edges -----------------------------------------------------------
    pub toggle_flashlight: bool,
    pub interact: bool,

    //--- Session Flags ---------------------------------------------------
    pub pointer_locked: bool,
    pub interacted: bool,
}

impl FrameInput {
    /// Local movement direction, unit length or zero.
    ///
    /// x is strafe (right positive), z is forward/back (forward negative).
    /// Opposing keys cancel.
    pub fn move_direction(&self) -> Vec3 {
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        Vec3::new(
            axis(self.right, self.left),
            0.0,
            axis(self.backward, self.forward),
        )
        .normalize_or_zero()
    }

    pub fn is_moving(&self) -> bool {
        self.move_direction() != Vec3::ZERO
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_input_has_no_direction() {
        let input = FrameInput::default();
        assert_eq!(input.move_direction(), Vec3::ZERO);
        assert!(!input.is_moving());
    }

    #[test]
    fn forward_is_negative_z() {
        let input = FrameInput { forward: true, ..Default::default() };
        assert_eq!(input.move_direction(), Vec3::NEG_Z);
    }

    /// Diagonals are normalized before speed is applied.
    #[test]
    fn diagonal_is_unit_length() {
        let input = FrameInput { forward: true, right: true, ..Default::default() };
        let dir = input.move_direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.z < 0.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let input = FrameInput {
            forward: true,
            backward: true,
            left: true,
            ..Default::default()
        };
        assert_eq!(input.move_direction(), Vec3::NEG_X);
    }
}
