//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state with per-tick edge tracking.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// Tick lifecycle: clear() → process_events() → query
//
// Held state survives the tick boundary; press/release edges and the
// accumulated look delta are reset by clear().
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};

//=== StateTracker ========================================================

/// Tracks held keys/buttons, per-tick transitions and pointer state.
pub struct StateTracker {
    //--- Persistent State (survives tick boundary) -----------------------
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    pointer_locked: bool,
    interacted: bool,

    //--- Tick Deltas (reset each tick via clear()) -----------------------
    keys_pressed_this_tick: HashSet<KeyCode>,
    keys_released_this_tick: HashSet<KeyCode>,
    mouse_buttons_pressed_this_tick: HashSet<MouseButton>,
    look_delta: Vec2,
}

impl StateTracker {
    /// Creates a tracker with nothing held and the pointer free.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            pointer_locked: false,
            interacted: false,
            keys_pressed_this_tick: HashSet::new(),
            keys_released_this_tick: HashSet::new(),
            mouse_buttons_pressed_this_tick: HashSet::new(),
            look_delta: Vec2::ZERO,
        }
    }

    //--- Tick Processing --------------------------------------------------

    /// Clears tick-specific deltas (edges and look motion).
    pub(super) fn clear(&mut self) {
        self.keys_pressed_this_tick.clear();
        self.keys_released_this_tick.clear();
        self.mouse_buttons_pressed_this_tick.clear();
        self.look_delta = Vec2::ZERO;
    }

    /// Processes input events, updating internal state.
    pub(super) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        if event.is_user_gesture() {
            self.interacted = true;
        }

        match *event {
            InputEvent::KeyDown { key } => {
                // Only an UP → DOWN transition is an edge (ignores OS repeat)
                if self.keys_down.insert(key) {
                    self.keys_pressed_this_tick.insert(key);
                }
            }

            InputEvent::KeyUp { key } => {
                if self.keys_down.remove(&key) {
                    self.keys_released_this_tick.insert(key);
                }
            }

            InputEvent::MouseButtonDown { button } => {
                if self.mouse_buttons_down.insert(button) {
                    self.mouse_buttons_pressed_this_tick.insert(button);
                }
            }

            InputEvent::MouseButtonUp { button } => {
                self.mouse_buttons_down.remove(&button);
            }

            InputEvent::LookDelta { dx, dy } => {
                if dx.is_finite() && dy.is_finite() {
                    self.look_delta += Vec2::new(dx, dy);
                }
            }

            InputEvent::PointerLock { locked } => {
                self.pointer_locked = locked;
            }

            InputEvent::FocusLost => {
                self.keys_released_this_tick.extend(self.keys_down.drain());
                self.mouse_buttons_down.clear();
                self.pointer_locked = false;
            }
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this tick.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_tick.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this tick.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_tick.contains(&key)
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_pressed_this_tick.iter()
    }

    //=====================================================================
    // Query API - Mouse & Pointer
    //=====================================================================

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed_this_tick.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Look motion accumulated since the last clear().
    pub fn look_delta(&self) -> Vec2 {
        self.look_delta
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Sticky: once a key or button was pressed this stays `true`.
    pub fn interacted(&self) -> bool {
        self.interacted
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key }
    }

    fn look(dx: f32, dy: f32) -> InputEvent {
        InputEvent::LookDelta { dx, dy }
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    /// key_pressed is true on the transition tick only.
    #[test]
    fn key_pressed_only_on_transition_tick() {
        let mut tracker = StateTracker::new();

        // Tick 1: Key down
        tracker.clear();
        tracker.process_events(&[key_down(KeyCode::KeyF)]);
        assert!(tracker.is_key_pressed(KeyCode::KeyF));
        assert!(tracker.is_key_down(KeyCode::KeyF));

        // Tick 2: Still held
        tracker.clear();
        tracker.process_events(&[]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyF));
        assert!(tracker.is_key_down(KeyCode::KeyF));

        // Tick 3: Released
        tracker.clear();
        tracker.process_events(&[key_up(KeyCode::KeyF)]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyF));
        assert!(!tracker.is_key_down(KeyCode::KeyF));
        assert!(tracker.is_key_released(KeyCode::KeyF));
    }

    /// OS auto-repeat sends KeyDown again while held; no new edge.
    #[test]
    fn repeated_key_down_is_not_an_edge() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[key_down(KeyCode::KeyE)]);

        tracker.clear();
        tracker.process_events(&[key_down(KeyCode::KeyE), key_down(KeyCode::KeyE)]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyE));
        assert!(tracker.is_key_down(KeyCode::KeyE));
    }

    /// Press and release inside one tick still registers the press.
    #[test]
    fn fast_tap_both_transitions_captured() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[key_down(KeyCode::KeyF), key_up(KeyCode::KeyF)]);

        assert!(tracker.is_key_pressed(KeyCode::KeyF));
        assert!(tracker.is_key_released(KeyCode::KeyF));
        assert!(!tracker.is_key_down(KeyCode::KeyF));
    }

    #[test]
    fn key_up_without_down_ignored() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[key_up(KeyCode::KeyZ)]);
        assert!(!tracker.is_key_released(KeyCode::KeyZ));
    }

    //=====================================================================
    // Look & Pointer Tests
    //=====================================================================

    #[test]
    fn look_delta_accumulates_within_tick() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[look(3.0, -1.0), look(2.0, 4.0)]);
        assert_eq!(tracker.look_delta(), Vec2::new(5.0, 3.0));

        tracker.clear();
        assert_eq!(tracker.look_delta(), Vec2::ZERO);
    }

    #[test]
    fn non_finite_look_delta_dropped() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[look(f32::NAN, 1.0), look(1.0, 1.0)]);
        assert_eq!(tracker.look_delta(), Vec2::new(1.0, 1.0));
    }

    /// Last pointer-lock report in a tick wins.
    #[test]
    fn pointer_lock_last_writer_wins() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[
            InputEvent::PointerLock { locked: true },
            InputEvent::PointerLock { locked: false },
            InputEvent::PointerLock { locked: true },
        ]);
        assert!(tracker.pointer_locked());
    }

    #[test]
    fn focus_lost_releases_everything() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[
            key_down(KeyCode::KeyW),
            InputEvent::MouseButtonDown { button: MouseButton::Left },
            InputEvent::PointerLock { locked: true },
        ]);

        tracker.clear();
        tracker.process_events(&[InputEvent::FocusLost]);

        assert!(!tracker.is_key_down(KeyCode::KeyW));
        assert!(tracker.is_key_released(KeyCode::KeyW));
        assert!(!tracker.is_button_down(MouseButton::Left));
        assert!(!tracker.pointer_locked());
    }

    //=====================================================================
    // Interaction Flag Tests
    //=====================================================================

    #[test]
    fn interacted_latches_on_first_gesture() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[look(1.0, 1.0), InputEvent::PointerLock { locked: true }]);
        assert!(!tracker.interacted());

        tracker.process_events(&[InputEvent::MouseButtonDown { button: MouseButton::Left }]);
        assert!(tracker.interacted());

        tracker.clear();
        tracker.process_events(&[InputEvent::FocusLost]);
        assert!(tracker.interacted());
    }
}
