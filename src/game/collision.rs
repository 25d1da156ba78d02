//=========================================================================
// Collision
//=========================================================================
//
// Movement resolution against static level geometry.
//
// Architecture:
//   (current, desired, dt) → MovementResolver::resolve() → corrected
//
//   CapsuleResolver : vertical capsule vs. boxes, iterative push-out (3D)
//   PlanarResolver  : rapier2d character controller (see `planar`)
//
// Both resolvers return a finite position and are idempotent on their own
// output, and never leave the body overlapping a collider. Only the
// horizontal (x, z) components are ever corrected.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Vec2, Vec3};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::level::Collider;

//=== Constants ===========================================================

/// Relaxation passes over the collider set.
const MAX_PASSES: usize = 4;

/// Penetrations at or below this depth are treated as contact.
const CONTACT_EPSILON: f32 = 1e-5;

/// Ring spacing and ring count of the escape search around an embedded point.
const ESCAPE_STEP: f32 = 0.05;
const ESCAPE_RINGS: usize = 48;

/// Candidate directions sampled on each escape ring.
const ESCAPE_DIRECTIONS: usize = 16;

//=== MovementResolver ====================================================

/// Turns a proposed move into a position that does not penetrate the level.
pub trait MovementResolver: Send {
    /// Returns the corrected position for a move from `current` to `desired`.
    ///
    /// `current` is assumed valid. The result is always finite.
    fn resolve(&mut self, current: Vec3, desired: Vec3, dt: f32) -> Vec3;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

//=== Capsule =============================================================

/// Upright player volume anchored at eye height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub radius: f32,
    pub height: f32,
    pub eye_height: f32,
    pub skin: f32,
}

impl Capsule {
    /// # Panics
    ///
    /// Panics unless `radius` and `height` are positive and `eye_height`
    /// lies within `[0, height]`.
    pub fn new(radius: f32, height: f32, eye_height: f32) -> Self {
        assert!(radius > 0.0, "Capsule radius must be positive, got {}", radius);
        assert!(height > 0.0, "Capsule height must be positive, got {}", height);
        assert!(
            (0.0..=height).contains(&eye_height),
            "Eye height must lie within the capsule, got {}",
            eye_height
        );
        Self {
            radius,
            height,
            eye_height,
            skin: 0.02,
        }
    }

    pub fn with_skin(mut self, skin: f32) -> Self {
        assert!(skin >= 0.0, "Skin width must be non-negative, got {}", skin);
        self.skin = skin;
        self
    }

    /// Radius plus skin: the clearance kept from every obstacle.
    pub fn reach(&self) -> f32 {
        self.radius + self.skin
    }

    /// Vertical extent `[bottom, top]` for a capsule whose eye sits at `eye_y`.
    pub fn vertical_span(&self, eye_y: f32) -> (f32, f32) {
        let bottom = eye_y - self.eye_height;
        (bottom, bottom + self.height)
    }
}

impl Default for Capsule {
    fn default() -> Self {
        Self::new(0.35, 1.8, 1.6)
    }
}

//=== CapsuleResolver =====================================================

/// Capsule-vs-box resolver with fixed-point relaxation.
pub struct CapsuleResolver {
    capsule: Capsule,
    colliders: Vec<Collider>,
}

impl CapsuleResolver {
    pub fn new(capsule: Capsule, colliders: &[Collider]) -> Self {
        Self {
            capsule,
            colliders: colliders.to_vec(),
        }
    }

    pub fn capsule(&self) -> Capsule {
        self.capsule
    }

    /// Returns `true` if the capsule at `position` penetrates nothing.
    pub fn is_clear(&self, position: Vec3) -> bool {
        let (bottom, top) = self.capsule.vertical_span(position.y);
        self.clear_at(Vec2::new(position.x, position.z), bottom, top)
    }

    //--- Internal Helpers -------------------------------------------------

    fn clear_at(&self, p: Vec2, bottom: f32, top: f32) -> bool {
        self.colliders
            .iter()
            .all(|c| self.push_out(p, bottom, top, c).is_none())
    }

    /// Runs the push-out passes from `start`. Returns the settled point, or
    /// `None` if it still overlaps something afterwards.
    fn relax(&self, start: Vec2, bottom: f32, top: f32) -> Option<Vec2> {
        let mut p = start;
        for _ in 0..MAX_PASSES {
            let mut pushed = false;
            for collider in &self.colliders {
                if let Some(push) = self.push_out(p, bottom, top, collider) {
                    p += push;
                    pushed = true;
                }
            }
            if !pushed {
                return Some(p);
            }
        }
        (p.is_finite() && self.clear_at(p, bottom, top)).then_some(p)
    }

    /// Searches rings of growing radius around `origin` for the closest
    /// candidate that relaxes to a clear point.
    fn escape(&self, origin: Vec2, bottom: f32, top: f32) -> Option<Vec2> {
        (1..=ESCAPE_RINGS).find_map(|ring| {
            let radius = ring as f32 * ESCAPE_STEP;
            (0..ESCAPE_DIRECTIONS).find_map(|k| {
                let angle = k as f32 * std::f32::consts::TAU / ESCAPE_DIRECTIONS as f32;
                let candidate = origin + Vec2::from_angle(angle) * radius;
                self.relax(candidate, bottom, top)
            })
        })
    }

    /// Correction that moves `p` out of `collider`, if it penetrates.
    fn push_out(&self, p: Vec2, bottom: f32, top: f32, collider: &Collider) -> Option<Vec2> {
        let (min, max) = (collider.min(), collider.max());
        if top <= min.y || bottom >= max.y {
            return None;
        }

        let reach = self.capsule.reach();
        let half = collider.footprint_half_extents();
        let padded = half + Vec2::splat(reach);
        let offset = p - collider.footprint_center();

        // Outside the padded box: no contact possible.
        if offset.x.abs() >= padded.x || offset.y.abs() >= padded.y {
            return None;
        }

        let delta = offset - offset.clamp(-half, half);
        let dist_sq = delta.length_squared();
        if dist_sq >= reach * reach {
            return None;
        }

        let dist = dist_sq.sqrt();
        let normal = delta / dist;
        if dist > 0.0 && normal.is_finite() {
            let depth = reach - dist;
            return (depth > CONTACT_EPSILON).then_some(normal * depth);
        }

        // Inside the footprint: leave along the shallower padded axis.
        let overlap = padded - offset.abs();
        let side = |v: f32| if v >= 0.0 { 1.0 } else { -1.0 };
        if overlap.x <= overlap.y {
            Some(Vec2::new(side(offset.x) * overlap.x, 0.0))
        } else {
            Some(Vec2::new(0.0, side(offset.y) * overlap.y))
        }
    }
}

impl MovementResolver for CapsuleResolver {
    fn resolve(&mut self, current: Vec3, desired: Vec3, _dt: f32) -> Vec3 {
        if !desired.is_finite() {
            return current;
        }

        let (bottom, top) = self.capsule.vertical_span(desired.y);
        if let Some(p) = self.relax(Vec2::new(desired.x, desired.z), bottom, top) {
            return Vec3::new(p.x, desired.y, p.y);
        }

        // Pinched between obstacles: refuse the move.
        if self.is_clear(current) {
            trace!(target: "game", "Relaxation did not settle at {}, keeping {}", desired, current);
            return current;
        }

        // Already embedded: step out to the nearest clear spot.
        let (bottom, top) = self.capsule.vertical_span(current.y);
        match self.escape(Vec2::new(current.x, current.z), bottom, top) {
            Some(p) => {
                let escaped = Vec3::new(p.x, current.y, p.y);
                trace!(target: "game", "Escaped embedded position {} to {}", current, escaped);
                escaped
            }
            None => {
                warn!(target: "game", "No clear position found around {}", current);
                current
            }
        }
    }

    fn name(&self) -> &'static str {
        "capsule"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
