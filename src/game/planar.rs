//=========================================================================
// Planar Resolver
//=========================================================================
//
// Top-down movement resolved by rapier2d's kinematic character controller.
//
// Architecture:
// ```text
//   (current, desired, dt)
//        │  translation = desired - current
//        ↓
//   KinematicCharacterController::move_shape ── slides along contacts
//        │                                       (static cuboids: level
//        ↓                                        walls + world bounds)
//   depenetration guard ── contact push-out if the shape still overlaps
//        ↓
//   resolved translation
// ```
//
// World (x, z) maps to physics (x, y). The world y of `current` passes
// through unchanged. The controller has no notion of "up" in a top-down
// plane, so slope climbing, step-up and ground snapping are disabled and
// every contact is a plain slide.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Vec2, Vec3};
use log::{debug, trace, warn};
use rapier2d::control::{CharacterLength, KinematicCharacterController};
use rapier2d::parry::query;
use rapier2d::prelude::*;

//=== Internal Dependencies ===============================================

use super::collision::MovementResolver;
use super::level::{Level, WorldBounds};

//=== Constants ===========================================================

/// Thickness of the invisible walls built around the world bounds.
const BOUND_THICKNESS: f32 = 64.0;

/// Gap the controller keeps between the player and any wall.
const CONTACT_OFFSET: f32 = 0.01;

/// Push-out passes run when the shape still overlaps after a move.
const DEPENETRATION_PASSES: usize = 4;

//=== PlanarResolver ======================================================

/// Delegates collision to a rapier2d query world of static walls.
pub struct PlanarResolver {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    query_pipeline: QueryPipeline,
    controller: KinematicCharacterController,
    shape: SharedShape,
}

impl PlanarResolver {
    /// Registers the level as static geometry and builds the player shape.
    ///
    /// # Panics
    ///
    /// Panics if `half_extents` is not strictly positive.
    pub fn new(level: &Level, half_extents: Vec2) -> Self {
        assert!(
            half_extents.x > 0.0 && half_extents.y > 0.0,
            "Player half extents must be positive, got {}",
            half_extents
        );

        let bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for collider in level.colliders() {
            let center = collider.footprint_center();
            let half = collider.footprint_half_extents();
            colliders.insert(Self::wall(center, half));
        }

        if let Some(bounds) = level.bounds() {
            for (center, half) in Self::bound_walls(bounds) {
                colliders.insert(Self::wall(center, half));
            }
        }

        let mut query_pipeline = QueryPipeline::new();
        query_pipeline.update(&colliders);

        let mut controller = KinematicCharacterController::default();
        controller.offset = CharacterLength::Absolute(CONTACT_OFFSET);
        controller.slide = true;
        controller.autostep = None;
        controller.snap_to_ground = None;
        controller.max_slope_climb_angle = std::f32::consts::PI;
        controller.min_slope_slide_angle = 0.0;

        debug!(
            target: "game",
            "Planar world ready: {} static colliders, player {}",
            colliders.len(),
            half_extents
        );

        Self {
            bodies,
            colliders,
            query_pipeline,
            controller,
            shape: SharedShape::cuboid(half_extents.x, half_extents.y),
        }
    }

    /// Returns `true` if the player shape at `position` overlaps no wall.
    pub fn is_clear(&self, position: Vec3) -> bool {
        self.overlapping(&Isometry::translation(position.x, position.z))
            .is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn wall(center: Vec2, half: Vec2) -> Collider {
        ColliderBuilder::cuboid(half.x, half.y)
            .translation(vector![center.x, center.y])
            .friction(0.0)
            .build()
    }

    /// Four slabs hugging the outside of `bounds`.
    fn bound_walls(bounds: WorldBounds) -> [(Vec2, Vec2); 4] {
        let size = bounds.size();
        let mid = (bounds.min + bounds.max) * 0.5;
        let t = BOUND_THICKNESS * 0.5;
        let horizontal = Vec2::new(size.x * 0.5 + BOUND_THICKNESS, t);
        let vertical = Vec2::new(t, size.y * 0.5 + BOUND_THICKNESS);

        [
            (Vec2::new(mid.x, bounds.min.y - t), horizontal),
            (Vec2::new(mid.x, bounds.max.y + t), horizontal),
            (Vec2::new(bounds.min.x - t, mid.y), vertical),
            (Vec2::new(bounds.max.x + t, mid.y), vertical),
        ]
    }

    /// Walls the player shape intersects at `pos`.
    fn overlapping(&self, pos: &Isometry<Real>) -> Vec<ColliderHandle> {
        let mut hits = Vec::new();
        self.query_pipeline.intersections_with_shape(
            &self.bodies,
            &self.colliders,
            pos,
            self.shape.as_ref(),
            QueryFilter::default(),
            |handle| {
                hits.push(handle);
                true
            },
        );
        hits
    }

    /// Pushes the shape out of every wall it still intersects. Returns
    /// `None` if it cannot be separated.
    fn depenetrate(&self, start: Vector<Real>) -> Option<Vector<Real>> {
        let mut position = start;
        for _ in 0..DEPENETRATION_PASSES {
            let pos = Isometry::translation(position.x, position.y);
            let hits = self.overlapping(&pos);
            if hits.is_empty() {
                return Some(position);
            }

            for handle in hits {
                let Some(wall) = self.colliders.get(handle) else {
                    continue;
                };
                let pos = Isometry::translation(position.x, position.y);
                let contact = query::contact(&pos, self.shape.as_ref(), wall.position(), wall.shape(), 0.0);
                if let Ok(Some(contact)) = contact {
                    if contact.dist < 0.0 {
                        position += contact.normal1.into_inner() * (contact.dist - CONTACT_OFFSET);
                    }
                }
            }
        }

        let pos = Isometry::translation(position.x, position.y);
        self.overlapping(&pos).is_empty().then_some(position)
    }
}

impl MovementResolver for PlanarResolver {
    fn resolve(&mut self, current: Vec3, desired: Vec3, dt: f32) -> Vec3 {
        if !(dt > 0.0) || !current.is_finite() || !desired.is_finite() {
            return current;
        }

        let start = vector![current.x, current.z];
        let movement = self.controller.move_shape(
            dt,
            &self.bodies,
            &self.colliders,
            &self.query_pipeline,
            self.shape.as_ref(),
            &Isometry::translation(start.x, start.y),
            vector![desired.x - current.x, desired.z - current.z],
            QueryFilter::default(),
            |_| {},
        );

        let moved = start + movement.translation;
        let settled = self.depenetrate(moved).or_else(|| {
            trace!(target: "game", "Move to ({}, {}) stayed embedded", moved.x, moved.y);
            self.depenetrate(start)
        });

        match settled {
            Some(p) if p.x.is_finite() && p.y.is_finite() => Vec3::new(p.x, current.y, p.y),
            _ => {
                warn!(target: "game", "No clear position found around {}", current);
                current
            }
        }
    }

    fn name(&self) -> &'static str {
        "planar"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
