//=========================================================================
// Pickups
//=========================================================================
//
// Battery pickups: proximity scan and one-way collection.
//
// Architecture:
//   resolved position → PickupField::scan() → Option<PickupId> (nearby)
//   interact edge     → PickupField::collect(id) → Flashlight::consume_pickup
//
// Scan order is list order and the first pickup in range wins, even if
// a later one is closer. Used pickups stay in the field as husks.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use glam::Vec3;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::level::PickupSpawn;

//=== PickupId ============================================================

/// Stable pickup identity within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickupId(pub u16);

impl fmt::Display for PickupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pickup-{}", self.0)
    }
}

//=== Pickup ==============================================================

/// A pickup placed in the world. `used` only ever goes false → true.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    id: PickupId,
    position: Vec3,
    used: bool,
}

impl Pickup {
    pub fn id(&self) -> PickupId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_used(&self) -> bool {
        self.used
    }
}

//=== PickupField =========================================================

/// All pickups of a level plus the interaction radius.
#[derive(Debug, Clone)]
pub struct PickupField {
    pickups: Vec<Pickup>,
    range: f32,
}

impl PickupField {
    /// Builds the field from level spawns.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not strictly positive.
    pub fn new(spawns: &[PickupSpawn], range: f32) -> Self {
        assert!(range > 0.0, "Pickup range must be positive, got {}", range);
        Self {
            pickups: spawns
                .iter()
                .map(|spawn| Pickup {
                    id: spawn.id,
                    position: spawn.position,
                    used: false,
                })
                .collect(),
            range,
        }
    }

    //--- Proximity --------------------------------------------------------

    /// Returns the first unused pickup strictly within range of `position`.
    pub fn scan(&self, position: Vec3) -> Option<PickupId> {
        self.pickups
            .iter()
            .filter(|p| !p.used)
            .find(|p| p.position.distance(position) < self.range)
            .map(|p| p.id)
    }

    //--- Collection -------------------------------------------------------

    /// Marks a pickup as used.
    ///
    /// Returns `true` only on the first successful collection. Unknown or
    /// already used ids are ignored.
    pub fn collect(&mut self, id: PickupId) -> bool {
        match self.pickups.iter_mut().find(|p| p.id == id) {
            Some(pickup) if !pickup.used => {
                pickup.used = true;
                info!(target: "game", "Collected {}", id);
                true
            }
            Some(_) => {
                debug!(target: "game", "{} already used", id);
                false
            }
            None => {
                debug!(target: "game", "Unknown pickup {}", id);
                false
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn get(&self, id: PickupId) -> Option<&Pickup> {
        self.pickups.iter().find(|p| p.id == id)
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn remaining(&self) -> usize {
        self.pickups.iter().filter(|p| !p.used).count()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(id: u16, x: f32, y: f32, z: f32) -> PickupSpawn {
        PickupSpawn {
            id: PickupId(id),
            position: Vec3::new(x, y, z),
        }
    }

    fn field(spawns: &[PickupSpawn]) -> PickupField {
        PickupField::new(spawns, 1.2)
    }

    //=====================================================================
    // Identity
    //=====================================================================

    #[test]
    fn id_display_format() {
        assert_eq!(PickupId(2).to_string(), "pickup-2");
    }

    //=====================================================================
    // Scan
    //=====================================================================

    #[test]
    fn scan_reports_pickup_inside_range() {
        let field = field(&[spawn(1, 0.0, 0.0, 0.0)]);
        assert_eq!(field.scan(Vec3::new(1.19, 0.0, 0.0)), Some(PickupId(1)));
    }

    /// Distance equal to the radius is out of range.
    #[test]
    fn scan_excludes_boundary_and_beyond() {
        let field = PickupField::new(&[spawn(1, 0.0, 0.0, 0.0)], 2.0);
        assert_eq!(field.scan(Vec3::new(2.0, 0.0, 0.0)), None);
        assert_eq!(field.scan(Vec3::new(0.0, 0.0, 5.0)), None);
    }

    #[test]
    fn scan_uses_full_3d_distance() {
        let field = field(&[spawn(1, 0.0, 0.8, 0.0)]);
        // Horizontal 0.9 plus vertical 0.8 puts it just past 1.2.
        assert_eq!(field.scan(Vec3::new(0.9, 1.6, 0.0)), None);
        assert_eq!(field.scan(Vec3::new(0.5, 1.6, 0.0)), Some(PickupId(1)));
    }

    /// First in list order wins even when a later pickup is nearer.
    #[test]
    fn scan_is_first_match_not_nearest() {
        let field = field(&[spawn(1, 1.0, 0.0, 0.0), spawn(2, 0.1, 0.0, 0.0)]);
        assert_eq!(field.scan(Vec3::ZERO), Some(PickupId(1)));
    }

    #[test]
    fn scan_skips_used_pickups() {
        let mut field = field(&[spawn(1, 0.0, 0.0, 0.0), spawn(2, 0.5, 0.0, 0.0)]);
        assert!(field.collect(PickupId(1)));
        assert_eq!(field.scan(Vec3::ZERO), Some(PickupId(2)));
        assert!(field.collect(PickupId(2)));
        assert_eq!(field.scan(Vec3::ZERO), None);
    }

    //=====================================================================
    // Collect
    //=====================================================================

    #[test]
    fn collect_twice_is_noop() {
        let mut field = field(&[spawn(1, 0.0, 0.0, 0.0)]);
        assert!(field.collect(PickupId(1)));
        let after_first = field.pickups().to_vec();

        assert!(!field.collect(PickupId(1)));
        assert_eq!(field.pickups(), after_first.as_slice());
    }

    #[test]
    fn collect_unknown_id_is_noop() {
        let mut field = field(&[spawn(1, 0.0, 0.0, 0.0)]);
        assert!(!field.collect(PickupId(9)));
        assert_eq!(field.remaining(), 1);
    }

    /// Used pickups remain in the field.
    #[test]
    fn used_pickups_are_kept() {
        let mut field = field(&[spawn(1, 0.0, 0.0, 0.0)]);
        field.collect(PickupId(1));
        assert_eq!(field.pickups().len(), 1);
        assert!(field.get(PickupId(1)).unwrap().is_used());
        assert_eq!(field.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "Pickup range must be positive")]
    fn zero_range_rejected() {
        PickupField::new(&[], 0.0);
    }
}
