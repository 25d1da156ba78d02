//=========================================================================
// Flashlight
//=========================================================================
//
// Battery charge and flashlight on/off state machine.
//
// States:
// ```text
//   ┌──────────┐  toggle (battery > 0)  ┌──────────────────┐
//   │   OFF    │ ─────────────────────> │  ON, battery > 0 │
//   │          │ <───────────────────── │                  │
//   └──────────┘  toggle / drain to 0   └──────────────────┘
//        │                                      ↑
//        └────────── consume_pickup() ──────────┘
// ```
//
// All operations are total. Out-of-range input is clamped, impossible
// transitions are no-ops.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Constants ===========================================================

/// Full charge, also the upper clamp.
pub const BATTERY_MAX: f32 = 100.0;

/// Spotlight intensity while lit.
pub const LIGHT_INTENSITY_ON: f32 = 2.2;

//=== Flashlight ==========================================================

/// Battery-powered flashlight.
///
/// Invariants:
/// - `battery` is always within `[0, BATTERY_MAX]`
/// - the light is never on while `battery == 0`
#[derive(Debug, Clone, PartialEq)]
pub struct Flashlight {
    battery: f32,
    on: bool,
    drain_rate: f32,
}

impl Flashlight {
    /// Creates a fully charged flashlight that is switched on.
    ///
    /// # Panics
    ///
    /// Panics if `drain_rate` is negative or not finite.
    pub fn new(drain_rate: f32) -> Self {
        assert!(
            drain_rate.is_finite() && drain_rate >= 0.0,
            "Drain rate must be non-negative, got {}",
            drain_rate
        );
        Self {
            battery: BATTERY_MAX,
            on: true,
            drain_rate,
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Flips the light. Turning on requires charge; turning off always works.
    pub fn toggle(&mut self) {
        if self.on {
            self.on = false;
        } else if self.battery > 0.0 {
            self.on = true;
        }
        debug!(target: "game", "Flashlight toggled: on={} battery={:.1}", self.on, self.battery);
    }

    /// Requests an explicit state. The light only comes on with charge left.
    pub fn set_on(&mut self, active: bool) {
        self.on = active && self.battery > 0.0;
    }

    /// Spends `drain_rate * dt` of charge while lit.
    ///
    /// Reaching zero switches the light off in the same call.
    pub fn drain(&mut self, dt: f32) {
        if !self.on || !(dt > 0.0) {
            return;
        }
        self.spend(self.drain_rate * dt);
    }

    /// Spends a fixed amount of charge while lit.
    pub fn spend(&mut self, amount: f32) {
        if !self.on || self.battery <= 0.0 || !(amount > 0.0) {
            return;
        }

        self.battery = (self.battery - amount).max(0.0);
        if self.battery == 0.0 {
            self.on = false;
            info!(target: "game", "Battery depleted, flashlight off");
        }
    }

    /// Recharges to full and forces the light on.
    pub fn consume_pickup(&mut self) {
        self.battery = BATTERY_MAX;
        self.on = true;
    }

    /// Overrides the charge, clamped to `[0, BATTERY_MAX]`.
    ///
    /// A zero result forces the light off; otherwise the on/off state
    /// is left alone. NaN is treated as empty.
    pub fn set_battery(&mut self, value: f32) {
        self.battery = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, BATTERY_MAX)
        };
        if self.battery == 0.0 {
            self.on = false;
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn battery(&self) -> f32 {
        self.battery
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn drain_rate(&self) -> f32 {
        self.drain_rate
    }

    /// Light intensity handed to the renderer.
    pub fn intensity(&self) -> f32 {
        if self.on {
            LIGHT_INTENSITY_ON
        } else {
            0.0
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
