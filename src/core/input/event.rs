//=========================================================================
// Input Event Types
//
// Platform-neutral representation of the low-level input this game reads:
// keys, mouse buttons, relative look motion and pointer-lock changes.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held keys, press edges, look delta)
//         ↓
//    FrameInput (latched per-tick snapshot)
// ```
//
// Design:
// - KeyCode / MouseButton are Copy and hashable for set membership
// - InputEvent carries no heap data; look motion is relative (raw device
//   deltas), never an absolute cursor position
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side buttons, thumb buttons, macro keys.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// WASD stays under the left hand on AZERTY layouts too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    ShiftLeft,

    /// Fallback for keys the platform layer does not map.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Event Types
///
/// - **KeyDown/KeyUp**: discrete keyboard transitions
/// - **MouseButtonDown/MouseButtonUp**: discrete mouse button transitions
/// - **LookDelta**: relative pointer motion, summed by the platform until
///   the next flush
/// - **PointerLock**: the cursor was captured or released
/// - **FocusLost**: the window lost focus; held keys are no longer reliable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
    MouseButtonDown { button: MouseButton },
    MouseButtonUp { button: MouseButton },

    /// Relative motion in device units (positive x = right, positive y = down).
    LookDelta { dx: f32, dy: f32 },

    PointerLock { locked: bool },
    FocusLost,
}

impl InputEvent {
    /// Returns `true` for events that count as a first interaction
    /// (the ambient audio gate).
    pub fn is_user_gesture(&self) -> bool {
        matches!(self, Self::KeyDown { .. } | Self::MouseButtonDown { .. })
    }

    /// Returns `true` for continuous (accumulated) events.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::LookDelta { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
