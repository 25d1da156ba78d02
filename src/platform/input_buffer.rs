//=========================================================================
// Input Buffer
//
// Collects input between two redraws, split into two categories:
// discrete events (keys, buttons, pointer lock, focus) in arrival order,
// and continuous look motion summed into a single delta.
//
// Notes:
// The buffer lives on the platform thread and is emptied by `drain()`
// at every frame boundary.
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::input::event::InputEvent;

//=== InputBuffer =========================================================

pub struct InputBuffer {
    discrete: Vec<InputEvent>,
    look: Option<(f32, f32)>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            look: None,
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // Relative motion adds up; nothing between two redraws is lost.
    //
    pub fn push_look(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let (x, y) = self.look.unwrap_or((0.0, 0.0));
        self.look = Some((x + dx, y + dy));
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Duplicate consecutive events (key repeat) are ignored.
    //
    pub fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes `(discrete, continuous)` for this frame, or `None` if empty.
    pub fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::replace(&mut self.discrete, Vec::with_capacity(16));
        let continuous = self
            .look
            .take()
            .map(|(dx, dy)| InputEvent::LookDelta { dx, dy })
            .into_iter()
            .collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------

    pub fn clear(&mut self) {
        self.discrete.clear();
        self.look = None;
    }

    pub fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.look.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::KeyCode;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key }
    }

    #[test]
    fn test_discrete_deduplication() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(key_down(KeyCode::KeyW));
        buffer.push_discrete(key_down(KeyCode::KeyW));
        buffer.push_discrete(key_down(KeyCode::KeyD));
        assert_eq!(buffer.discrete.len(), 2, "Duplicates should be ignored");
    }

    #[test]
    fn test_press_release_press_is_kept() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(key_down(KeyCode::KeyF));
        buffer.push_discrete(InputEvent::KeyUp { key: KeyCode::KeyF });
        buffer.push_discrete(key_down(KeyCode::KeyF));
        assert_eq!(buffer.discrete.len(), 3);
    }

    #[test]
    fn test_look_accumulates() {
        let mut buffer = InputBuffer::new();
        buffer.push_look(10.0, 10.0);
        buffer.push_look(-4.0, 5.0);
        buffer.push_look(f32::NAN, 1.0);

        let (_, continuous) = buffer.drain().unwrap();
        assert_eq!(continuous, vec![InputEvent::LookDelta { dx: 6.0, dy: 15.0 }]);
    }

    #[test]
    fn test_drain_clears_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(key_down(KeyCode::KeyE));
        buffer.push_look(5.0, 5.0);

        let (discrete, continuous) = buffer.drain().unwrap();
        assert_eq!(discrete.len(), 1);
        assert_eq!(continuous.len(), 1);
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn test_clear_behavior() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(key_down(KeyCode::KeyA));
        buffer.push_look(1.0, 2.0);
        buffer.clear();
        assert!(buffer.is_empty());
    }

    //--- Memory Retention -------------------------------------------------
    //
    // `clear()` keeps the discrete buffer's storage for reuse.
    //
    #[test]
    fn test_clear_does_not_deallocate() {
        let mut buffer = InputBuffer::new();

        for i in 0..256 {
            let key = if i % 2 == 0 { KeyCode::KeyA } else { KeyCode::KeyB };
            buffer.push_discrete(key_down(key));
        }
        let vec_cap_before = buffer.discrete.capacity();

        buffer.clear();

        assert_eq!(buffer.discrete.len(), 0);
        assert_eq!(buffer.discrete.capacity(), vec_cap_before);
    }
}
