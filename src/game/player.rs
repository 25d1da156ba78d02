//=========================================================================
// Player Controller
//=========================================================================
//
// Orientation, movement intent and the authoritative player position.
//
// Per tick:
// ```text
//   FrameInput ─► look() ─► yaw / pitch (only while pointer locked)
//              └► step() ─► desired = position + R(yaw)·dir·speed·dt
//                                 └► MovementResolver ─► position
// ```
//
// With yaw = 0 the player faces -Z. Positive yaw turns left
// (counter-clockwise seen from above), matching the camera.
// Forward is always the camera's -Z: local input is turned by +yaw about Y
// (x' = x·cos + z·sin), the same rotation the view and the light use.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat, Vec2, Vec3};

//=== Internal Dependencies ===============================================

use super::collision::MovementResolver;
use crate::core::input::FrameInput;

//=== Constants ===========================================================

/// Pitch stops this far short of straight up/down.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.1;

//=== LightPose ===========================================================

/// Flashlight transform and output handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightPose {
    pub position: Vec3,
    pub direction: Vec3,
    pub intensity: f32,
    pub range: f32,
    /// Half-angle of the cone in radians.
    pub angle: f32,
}

//=== PlayerController ====================================================

/// Owns position and orientation; movement goes through a resolver.
#[derive(Debug, Clone)]
pub struct PlayerController {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    move_speed: f32,
    look_sensitivity: f32,
}

impl PlayerController {
    //--- Construction -----------------------------------------------------

    pub fn new(spawn: Vec3, move_speed: f32, look_sensitivity: f32) -> Self {
        Self {
            position: spawn,
            yaw: 0.0,
            pitch: 0.0,
            move_speed,
            look_sensitivity,
        }
    }

    //--- Look -------------------------------------------------------------

    /// Applies pointer motion. Ignored unless the pointer is locked.
    pub fn look(&mut self, delta: Vec2, pointer_locked: bool) {
        if !pointer_locked || !delta.is_finite() {
            return;
        }
        self.yaw -= delta.x * self.look_sensitivity;
        self.pitch = (self.pitch - delta.y * self.look_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    //--- Movement ---------------------------------------------------------

    /// World-space displacement requested by `input` over `dt` seconds.
    pub fn displacement(&self, input: &FrameInput, dt: f32) -> Vec3 {
        let local = input.move_direction();
        if local == Vec3::ZERO || !(dt > 0.0) {
            return Vec3::ZERO;
        }
        Quat::from_rotation_y(self.yaw) * local * (self.move_speed * dt)
    }

    /// Moves through `resolver` and stores the corrected position.
    pub fn step(
        &mut self,
        input: &FrameInput,
        dt: f32,
        resolver: &mut dyn MovementResolver,
    ) -> Vec3 {
        let desired = self.position + self.displacement(input, dt);
        self.position = resolver.resolve(self.position, desired, dt);
        self.position
    }

    //--- Pose -------------------------------------------------------------

    /// Unit view direction from yaw and pitch.
    pub fn view_direction(&self) -> Vec3 {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0) * Vec3::NEG_Z
    }

    /// Flashlight pose at the eye, aimed along the view direction.
    pub fn light_pose(&self, intensity: f32, range: f32, angle: f32) -> LightPose {
        LightPose {
            position: self.position,
            direction: self.view_direction(),
            intensity,
            range,
            angle,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
