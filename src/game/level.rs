//=========================================================================
// Level
//=========================================================================
//
// Static level geometry: colliders, pickup spawns and the spawn point.
//
// Architecture:
//   Level::corridor() / Level::arena() → &[Collider] → MovementResolver
//                                      → &[PickupSpawn] → PickupField
//
// Levels are assembled once through the builder methods and are never
// mutated afterwards. Collider order is preserved.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Vec2, Vec3};

//=== Internal Dependencies ===============================================

use super::pickup::PickupId;

//=== Collider ============================================================

/// Immutable axis-aligned box described by its center and full size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    center: Vec3,
    size: Vec3,
}

impl Collider {
    /// Creates a collider from center and full extents.
    ///
    /// # Panics
    ///
    /// Panics if any component of `size` is not strictly positive.
    pub fn new(center: Vec3, size: Vec3) -> Self {
        assert!(
            size.x > 0.0 && size.y > 0.0 && size.z > 0.0,
            "Collider size must be positive, got {}",
            size
        );
        Self { center, size }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents()
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents()
    }

    /// Footprint center on the horizontal (x, z) plane.
    pub fn footprint_center(&self) -> Vec2 {
        Vec2::new(self.center.x, self.center.z)
    }

    /// Footprint half extents on the horizontal (x, z) plane.
    pub fn footprint_half_extents(&self) -> Vec2 {
        Vec2::new(self.size.x, self.size.z) * 0.5
    }
}

//=== PickupSpawn =========================================================

/// Where a pickup sits when the level loads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupSpawn {
    pub id: PickupId,
    pub position: Vec3,
}

//=== WorldBounds =========================================================

/// Rectangular play area on the (x, z) plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        assert!(
            max.x > min.x && max.y > min.y,
            "World bounds must have positive area"
        );
        Self { min, max }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

//=== Level ===============================================================

/// Ordered, immutable obstacle set plus spawn data.
#[derive(Debug, Clone)]
pub struct Level {
    name: &'static str,
    spawn: Vec3,
    colliders: Vec<Collider>,
    pickups: Vec<PickupSpawn>,
    bounds: Option<WorldBounds>,
}

impl Level {
    //--- Construction -----------------------------------------------------

    /// Creates an empty level with the given spawn position.
    pub fn new(name: &'static str, spawn: Vec3) -> Self {
        Self {
            name,
            spawn,
            colliders: Vec::with_capacity(8),
            pickups: Vec::with_capacity(2),
            bounds: None,
        }
    }

    /// Appends an obstacle (center, full size).
    pub fn with_collider(mut self, center: [f32; 3], size: [f32; 3]) -> Self {
        self.colliders
            .push(Collider::new(Vec3::from_array(center), Vec3::from_array(size)));
        self
    }

    /// Appends a pickup spawn. Ids must be unique within a level.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already registered.
    pub fn with_pickup(mut self, id: PickupId, position: [f32; 3]) -> Self {
        assert!(
            self.pickups.iter().all(|p| p.id != id),
            "Duplicate pickup id: {}",
            id
        );
        self.pickups.push(PickupSpawn {
            id,
            position: Vec3::from_array(position),
        });
        self
    }

    /// Restricts movement to a rectangle on the (x, z) plane.
    pub fn with_bounds(mut self, min: Vec2, max: Vec2) -> Self {
        self.bounds = Some(WorldBounds::new(min, max));
        self
    }

    //--- Built-in Levels --------------------------------------------------

    /// Walled corridor with scattered crates, explored in first person.
    pub fn corridor() -> Self {
        Self::new("corridor", Vec3::new(0.0, 1.6, 8.0))
            // End caps
            .with_collider([0.0, 1.5, 12.0], [8.0, 3.0, 1.0])
            .with_collider([0.0, 1.5, -24.0], [8.0, 3.0, 1.0])
            // Side walls
            .with_collider([-4.0, 1.5, -6.0], [1.0, 3.0, 40.0])
            .with_collider([4.0, 1.5, -6.0], [1.0, 3.0, 40.0])
            // Crates
            .with_collider([-0.5, 1.0, -10.0], [2.0, 2.0, 2.0])
            .with_collider([1.5, 1.0, -17.0], [3.0, 2.0, 1.5])
            .with_collider([-2.5, 1.0, -20.0], [1.0, 2.0, 4.0])
            .with_pickup(PickupId(1), [-1.5, 0.8, -10.0])
            .with_pickup(PickupId(2), [2.2, 0.8, -20.0])
    }

    /// Top-down 960x540 room with a divider and a pillar.
    ///
    /// Screen (x, y) maps to world (x, z); walls are one unit tall.
    pub fn arena() -> Self {
        const WALLS: [[f32; 4]; 6] = [
            [480.0, 40.0, 860.0, 24.0],
            [480.0, 500.0, 860.0, 24.0],
            [60.0, 270.0, 24.0, 420.0],
            [900.0, 270.0, 24.0, 420.0],
            [400.0, 270.0, 200.0, 20.0],
            [680.0, 210.0, 24.0, 180.0],
        ];

        let level = Self::new("arena", Vec3::new(330.0, 0.0, 330.0))
            .with_bounds(Vec2::ZERO, Vec2::new(960.0, 540.0))
            .with_pickup(PickupId(1), [600.0, 0.0, 310.0]);

        WALLS.iter().fold(level, |level, [x, y, w, h]| {
            level.with_collider([*x, 0.0, *y], [*w, 1.0, *h])
        })
    }

    //--- Queries ----------------------------------------------------------

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn spawn(&self) -> Vec3 {
        self.spawn
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn pickups(&self) -> &[PickupSpawn] {
        &self.pickups
    }

    pub fn bounds(&self) -> Option<WorldBounds> {
        self.bounds
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
