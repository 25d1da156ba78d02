//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use dimlight::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Input system
pub use crate::core::input::{ActionMapper, FrameInput, GameAction, InputEvent, KeyCode, MouseButton};

// Game session and configuration
pub use crate::game::{GameConfig, GameSession, Level, Variant};

// Snapshots and sinks
pub use crate::game::{ChannelSink, FrameSink, FrameSnapshot, HudLog, HudState};

// Movement resolution
pub use crate::game::{Capsule, MovementResolver};
