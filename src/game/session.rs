//=========================================================================
// Game Session
//=========================================================================
//
// Single owner of all mutable gameplay state, advanced once per tick.
//
// Tick order (fixed):
// ```text
//   1. input       session flags, look, toggle edge, interact edge
//   2. movement    PlayerController::step → MovementResolver
//   3. drain       Flashlight::drain(dt)
//   4. scan        PickupField::scan(position) → nearby
//   5. snapshot    FrameSnapshot for read-only consumers
// ```
//
// Interact acts on the pickup found by the previous tick's scan, which is
// the one the HUD prompt was showing when the key went down.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::collision::MovementResolver;
use super::config::GameConfig;
use super::flashlight::Flashlight;
use super::pickup::{PickupField, PickupId};
use super::player::PlayerController;
use super::snapshot::{FrameSnapshot, PickupView};
use crate::core::input::FrameInput;

//=== GameSession =========================================================

pub struct GameSession {
    config: GameConfig,
    player: PlayerController,
    resolver: Box<dyn MovementResolver>,
    flashlight: Flashlight,
    pickups: PickupField,
    nearby: Option<PickupId>,
    pointer_locked: bool,
    has_interacted: bool,
    tick: u64,
}

impl GameSession {
    //--- Construction -----------------------------------------------------

    /// Spawns the player and builds the configured resolver.
    pub fn new(config: GameConfig) -> Self {
        let level = config.level();
        let player = PlayerController::new(
            level.spawn(),
            config.move_speed(),
            config.look_sensitivity(),
        );
        let pickups = PickupField::new(level.pickups(), config.pickup_range());
        let nearby = pickups.scan(player.position());
        let resolver = config.build_resolver();

        info!(
            target: "game",
            "Session started: level '{}', {} resolver, {} colliders, {} pickups",
            level.name(),
            resolver.name(),
            level.colliders().len(),
            level.pickups().len()
        );

        Self {
            flashlight: Flashlight::new(config.drain_rate()),
            config,
            player,
            resolver,
            pickups,
            nearby,
            pointer_locked: false,
            has_interacted: false,
            tick: 0,
        }
    }

    //--- Tick -------------------------------------------------------------

    /// Advances the game by `dt` seconds and returns the resulting snapshot.
    pub fn tick(&mut self, input: &FrameInput, dt: f32) -> FrameSnapshot {
        //--- 1. Input -----------------------------------------------------
        self.pointer_locked = input.pointer_locked;
        self.has_interacted |= input.interacted;

        if self.config.look_enabled() {
            self.player.look(input.look_delta, self.pointer_locked);
        }
        if input.toggle_flashlight {
            self.flashlight.toggle();
        }
        if input.interact {
            self.collect_nearby();
        }

        //--- 2. Movement & collision --------------------------------------
        self.player.step(input, dt, self.resolver.as_mut());

        //--- 3. Battery drain ---------------------------------------------
        self.flashlight.drain(dt);

        //--- 4. Pickup scan -----------------------------------------------
        let nearby = self.pickups.scan(self.player.position());
        if nearby != self.nearby {
            debug!(target: "game", "Nearby pickup: {:?}", nearby);
        }
        self.nearby = nearby;

        self.tick += 1;
        self.snapshot()
    }

    //--- Commands ---------------------------------------------------------

    /// Collects the pickup currently in range, if any.
    ///
    /// Returns `true` if a pickup was consumed. Without a nearby pickup, or
    /// with one that is already used, nothing changes.
    pub fn collect_nearby(&mut self) -> bool {
        let Some(id) = self.nearby else {
            return false;
        };
        if !self.pickups.collect(id) {
            return false;
        }
        self.flashlight.consume_pickup();
        self.nearby = None;
        true
    }

    /// Administrative battery override, clamped to `[0, 100]`.
    pub fn set_battery(&mut self, value: f32) {
        self.flashlight.set_battery(value);
    }

    //--- Snapshot ---------------------------------------------------------

    /// Builds an immutable view of the current state.
    pub fn snapshot(&self) -> FrameSnapshot {
        let light = self.config.light();
        FrameSnapshot {
            tick: self.tick,
            variant: self.config.variant(),
            position: self.player.position(),
            yaw: self.player.yaw(),
            pitch: self.player.pitch(),
            battery: self.flashlight.battery(),
            flashlight_on: self.flashlight.is_on(),
            light: self
                .player
                .light_pose(self.flashlight.intensity(), light.range, light.angle),
            nearby_pickup: self.nearby,
            pickups: self.pickups.pickups().iter().map(PickupView::from).collect(),
            pointer_locked: self.pointer_locked,
            has_interacted: self.has_interacted,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn flashlight(&self) -> &Flashlight {
        &self.flashlight
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn pickups(&self) -> &PickupField {
        &self.pickups
    }

    pub fn nearby_pickup(&self) -> Option<PickupId> {
        self.nearby
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::Variant;
    use crate::game::level::Level;
    use glam::{Vec2, Vec3};

    const DT: f32 = 1.0 / 60.0;

    //--- Test Helpers -----------------------------------------------------

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    fn forward() -> FrameInput {
        FrameInput { forward: true, ..Default::default() }
    }

    fn interact() -> FrameInput {
        FrameInput { interact: true, ..Default::default() }
    }

    fn toggle() -> FrameInput {
        FrameInput { toggle_flashlight: true, ..Default::default() }
    }

    /// Player spawned right next to the first corridor crate and its pickup.
    fn beside_pickup() -> GameSession {
        let level = Level::new("crate-side", Vec3::new(-1.9, 1.6, -10.0))
            .with_collider([-0.5, 1.0, -10.0], [2.0, 2.0, 2.0])
            .with_pickup(PickupId(1), [-1.5, 0.8, -10.0]);
        GameSession::new(GameConfig::spatial().with_level(level))
    }

    //=====================================================================
    // Initial State
    //=====================================================================

    #[test]
    fn initial_snapshot() {
        let session = GameSession::new(GameConfig::spatial());
        let snap = session.snapshot();

        assert_eq!(snap.tick, 0);
        assert_eq!(snap.variant, Variant::Spatial);
        assert_eq!(snap.position, Vec3::new(0.0, 1.6, 8.0));
        assert_eq!(snap.battery, 100.0);
        assert!(snap.flashlight_on);
        assert_eq!(snap.light.intensity, 2.2);
        assert_eq!(snap.nearby_pickup, None);
        assert_eq!(snap.pickups.len(), 2);
        assert!(!snap.pointer_locked);
        assert!(!snap.has_interacted);
    }

    //=====================================================================
    // Movement & Drain Scenarios
    //=====================================================================

    /// One second forward from spawn: z drops by 3, battery by 6.
    #[test]
    fn one_second_forward() {
        let mut session = GameSession::new(GameConfig::spatial());
        let mut snap = session.snapshot();
        for _ in 0..60 {
            snap = session.tick(&forward(), DT);
        }

        assert!((snap.position.z - 5.0).abs() < 1e-4, "z = {}", snap.position.z);
        assert!(snap.position.x.abs() < 1e-6);
        assert_eq!(snap.position.y, 1.6);
        assert!((snap.battery - 94.0).abs() < 1e-3);
        assert_eq!(snap.tick, 60);
    }

    /// Twenty seconds lit at 6 %/s leaves the battery empty and the light off.
    #[test]
    fn twenty_seconds_drains_to_off() {
        let mut session = GameSession::new(GameConfig::spatial());
        let mut snap = session.snapshot();
        for _ in 0..40 {
            snap = session.tick(&idle(), 0.5);
        }

        assert_eq!(snap.battery, 0.0);
        assert!(!snap.flashlight_on);
        assert_eq!(snap.light.intensity, 0.0);
    }

    #[test]
    fn light_off_stops_drain() {
        let mut session = GameSession::new(GameConfig::spatial());
        session.tick(&toggle(), DT);
        let before = session.flashlight().battery();

        for _ in 0..120 {
            session.tick(&idle(), DT);
        }
        assert_eq!(session.flashlight().battery(), before);
        assert!(!session.flashlight().is_on());
    }

    #[test]
    fn toggle_with_empty_battery_stays_off() {
        let mut session = GameSession::new(GameConfig::spatial());
        session.set_battery(0.0);

        let snap = session.tick(&toggle(), DT);
        assert!(!snap.flashlight_on);
        assert_eq!(snap.battery, 0.0);
    }

    //=====================================================================
    // Look Tests
    //=====================================================================

    #[test]
    fn look_requires_pointer_lock() {
        let mut session = GameSession::new(GameConfig::spatial());
        let free = FrameInput { look_delta: Vec2::new(50.0, 0.0), ..Default::default() };
        assert_eq!(session.tick(&free, DT).yaw, 0.0);

        let locked = FrameInput { pointer_locked: true, ..free };
        let snap = session.tick(&locked, DT);
        assert!((snap.yaw - -0.11).abs() < 1e-6);
        assert!(snap.pointer_locked);
    }

    #[test]
    fn planar_ignores_look() {
        let mut session = GameSession::new(GameConfig::planar());
        let input = FrameInput {
            look_delta: Vec2::new(50.0, 50.0),
            pointer_locked: true,
            ..Default::default()
        };
        let snap = session.tick(&input, DT);
        assert_eq!((snap.yaw, snap.pitch), (0.0, 0.0));
    }

    #[test]
    fn interaction_flag_latches() {
        let mut session = GameSession::new(GameConfig::spatial());
        let first = FrameInput { interacted: true, ..Default::default() };
        assert!(session.tick(&first, DT).has_interacted);
        assert!(session.tick(&idle(), DT).has_interacted);
    }

    //=====================================================================
    // Pickup Tests
    //=====================================================================

    #[test]
    fn pickup_in_range_reported_nearby() {
        let session = beside_pickup();
        assert_eq!(session.nearby_pickup(), Some(PickupId(1)));
        assert!(session.snapshot().hud().collect_prompt);
    }

    /// Interact recharges, marks used, clears nearby; a second press does nothing.
    #[test]
    fn collect_recharges_once() {
        let mut session = beside_pickup();
        session.set_battery(10.0);
        session.tick(&toggle(), DT);
        assert!(!session.flashlight().is_on());

        let snap = session.tick(&interact(), DT);
        assert!(snap.flashlight_on);
        assert!((snap.battery - (100.0 - 6.0 * DT)).abs() < 1e-4);
        assert_eq!(snap.nearby_pickup, None);
        assert!(snap.pickups[0].used);

        session.set_battery(50.0);
        let again = session.tick(&interact(), DT);
        assert!(again.battery < 50.0);
        assert!(again.pickups[0].used);
        assert_eq!(session.pickups().remaining(), 0);
    }

    #[test]
    fn interact_without_nearby_is_noop() {
        let mut session = GameSession::new(GameConfig::spatial());
        session.set_battery(30.0);

        let snap = session.tick(&interact(), DT);
        assert!(snap.battery < 30.0);
        assert!(snap.pickups.iter().all(|p| !p.used));
        assert!(!session.collect_nearby());
    }

    //=====================================================================
    // Planar Variant
    //=====================================================================

    #[test]
    fn planar_moves_through_open_floor() {
        let mut session = GameSession::new(GameConfig::planar());
        let right = FrameInput { right: true, ..Default::default() };

        let mut snap = session.snapshot();
        for _ in 0..30 {
            snap = session.tick(&right, DT);
        }

        assert!((snap.position.x - 430.0).abs() < 1.0, "x = {}", snap.position.x);
        assert!((snap.position.z - 330.0).abs() < 1.0);
        assert_eq!(snap.light.range, 140.0);
    }
}
