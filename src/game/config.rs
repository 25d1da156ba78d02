//=========================================================================
// Game Configuration
//=========================================================================
//
// Tunables and variant selection for a GameSession.
//
// Two presets mirror the two ways the game is played:
//
//   GameConfig::spatial()  first person, capsule collision, corridor level
//   GameConfig::planar()   top-down, rapier2d collision, arena level
//
// Every `with_*` setter validates eagerly and panics on nonsense, so a
// built session never has to re-check its parameters.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::PI;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::collision::{Capsule, CapsuleResolver, MovementResolver};
use super::level::Level;
use super::planar::PlanarResolver;

//=== Variant =============================================================

/// Which movement/collision implementation drives the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// First person, capsule-vs-box resolution.
    Spatial,

    /// Top-down, physics-engine resolution.
    Planar,
}

//=== LightProfile ========================================================

/// Static flashlight shape; intensity comes from the battery state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightProfile {
    pub range: f32,
    /// Cone half-angle in radians. `PI` means omnidirectional.
    pub angle: f32,
}

//=== GameConfig ==========================================================

/// Everything a [`GameSession`](super::GameSession) needs to start.
///
/// # Examples
///
/// ```
/// use dimlight::game::{GameConfig, Variant};
///
/// let config = GameConfig::spatial()
///     .with_move_speed(4.0)
///     .with_drain_rate(3.0);
///
/// assert_eq!(config.variant(), Variant::Spatial);
/// ```
#[derive(Debug, Clone)]
pub struct GameConfig {
    variant: Variant,
    level: Level,
    move_speed: f32,
    look_sensitivity: f32,
    look_enabled: bool,
    drain_rate: f32,
    pickup_range: f32,
    capsule: Capsule,
    body_half_extents: Vec2,
    light: LightProfile,
}

impl GameConfig {
    //--- Presets ----------------------------------------------------------

    /// First-person corridor.
    ///
    /// - **Speed**: 3 units/s
    /// - **Look sensitivity**: 0.0022 rad per device unit
    /// - **Drain**: 6 %/s
    /// - **Pickup range**: 1.2
    /// - **Light**: range 12, half-angle 0.45
    pub fn spatial() -> Self {
        Self {
            variant: Variant::Spatial,
            level: Level::corridor(),
            move_speed: 3.0,
            look_sensitivity: 0.0022,
            look_enabled: true,
            drain_rate: 6.0,
            pickup_range: 1.2,
            capsule: Capsule::default(),
            body_half_extents: Vec2::new(0.35, 0.35),
            light: LightProfile {
                range: 12.0,
                angle: 0.45,
            },
        }
    }

    /// Top-down arena.
    ///
    /// - **Speed**: 200 units/s
    /// - **Look**: disabled, the view is fixed
    /// - **Drain**: 6 %/s
    /// - **Pickup range**: 36
    /// - **Body**: 24 x 28
    /// - **Light**: radius 140, omnidirectional
    pub fn planar() -> Self {
        Self {
            variant: Variant::Planar,
            level: Level::arena(),
            move_speed: 200.0,
            look_sensitivity: 0.0,
            look_enabled: false,
            drain_rate: 6.0,
            pickup_range: 36.0,
            capsule: Capsule::default(),
            body_half_extents: Vec2::new(12.0, 14.0),
            light: LightProfile {
                range: 140.0,
                angle: PI,
            },
        }
    }

    //--- Builders ---------------------------------------------------------

    /// # Panics
    ///
    /// Panics if `speed <= 0.0`.
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        assert!(speed > 0.0, "Move speed must be positive, got {}", speed);
        self.move_speed = speed;
        self
    }

    /// # Panics
    ///
    /// Panics if `sensitivity < 0.0`.
    pub fn with_look_sensitivity(mut self, sensitivity: f32) -> Self {
        assert!(
            sensitivity >= 0.0,
            "Look sensitivity must be non-negative, got {}",
            sensitivity
        );
        self.look_sensitivity = sensitivity;
        self
    }

    pub fn with_look_enabled(mut self, enabled: bool) -> Self {
        self.look_enabled = enabled;
        self
    }

    /// Battery percent spent per second while lit.
    ///
    /// # Panics
    ///
    /// Panics if `rate < 0.0`.
    pub fn with_drain_rate(mut self, rate: f32) -> Self {
        assert!(rate >= 0.0, "Drain rate must be non-negative, got {}", rate);
        self.drain_rate = rate;
        self
    }

    /// # Panics
    ///
    /// Panics if `range <= 0.0`.
    pub fn with_pickup_range(mut self, range: f32) -> Self {
        assert!(range > 0.0, "Pickup range must be positive, got {}", range);
        self.pickup_range = range;
        self
    }

    pub fn with_capsule(mut self, capsule: Capsule) -> Self {
        self.capsule = capsule;
        self
    }

    /// Player rectangle half extents for the planar variant.
    ///
    /// # Panics
    ///
    /// Panics unless both components are positive.
    pub fn with_body_half_extents(mut self, half_extents: Vec2) -> Self {
        assert!(
            half_extents.x > 0.0 && half_extents.y > 0.0,
            "Body half extents must be positive, got {}",
            half_extents
        );
        self.body_half_extents = half_extents;
        self
    }

    /// # Panics
    ///
    /// Panics if `range <= 0.0` or `angle` is outside `(0, PI]`.
    pub fn with_light(mut self, range: f32, angle: f32) -> Self {
        assert!(range > 0.0, "Light range must be positive, got {}", range);
        assert!(
            angle > 0.0 && angle <= PI,
            "Light angle must be in (0, PI], got {}",
            angle
        );
        self.light = LightProfile { range, angle };
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    //--- Resolver Selection -----------------------------------------------

    /// Builds the resolver that matches the configured variant.
    pub fn build_resolver(&self) -> Box<dyn MovementResolver> {
        match self.variant {
            Variant::Spatial => Box::new(CapsuleResolver::new(self.capsule, self.level.colliders())),
            Variant::Planar => Box::new(PlanarResolver::new(&self.level, self.body_half_extents)),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn look_sensitivity(&self) -> f32 {
        self.look_sensitivity
    }

    pub fn look_enabled(&self) -> bool {
        self.look_enabled
    }

    pub fn drain_rate(&self) -> f32 {
        self.drain_rate
    }

    pub fn pickup_range(&self) -> f32 {
        self.pickup_range
    }

    pub fn capsule(&self) -> Capsule {
        self.capsule
    }

    pub fn light(&self) -> LightProfile {
        self.light
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::spatial()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
