//=========================================================================
// Input System
//
// Turns the batches of raw input events received during a tick into one
// latched FrameInput for the game session.
//
// Architecture:
// ```text
//   Vec<Vec<InputEvent>> ──update()──> StateTracker ──ActionMapper──> FrameInput
// ```
//
// Notes:
// Owned and updated by the CoreSystemsOrchestrator on the logic thread.
// Edge actions (toggle, interact) come from press transitions, held
// actions (movement) from the held-key set.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub mod action_mapper;
pub mod event;
pub mod frame_input;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::GameAction;
pub use action_mapper::ActionMapper;
pub use event::{InputEvent, KeyCode, MouseButton};
pub use frame_input::FrameInput;
pub use state_tracker::StateTracker;

//=== External Crates =====================================================

use log::trace;

//=== InputSystem =========================================================

/// Owns the input state and the key bindings.
pub struct InputSystem {
    tracker: StateTracker,
    mapper: ActionMapper,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    pub fn new(mapper: ActionMapper) -> Self {
        Self {
            tracker: StateTracker::new(),
            mapper,
        }
    }

    //--- update() ---------------------------------------------------------

    /// Folds this tick's batches (in arrival order) and latches the result.
    pub fn update(&mut self, batches: &[Vec<InputEvent>]) -> FrameInput {
        self.tracker.clear();
        for batch in batches {
            self.tracker.process_events(batch);
        }

        let input = self.latch();
        if input.toggle_flashlight || input.interact {
            trace!(target: "core", "Input edges: {:?}", input);
        }
        input
    }

    //--- Queries ----------------------------------------------------------

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn mapper(&self) -> &ActionMapper {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut ActionMapper {
        &mut self.mapper
    }

    //--- Internal Helpers -------------------------------------------------

    /// Edge actions fire on the press transition, the rest while held.
    fn active(&self, action: GameAction) -> bool {
        if action.is_edge_triggered() {
            self.mapper.any_maps_to(self.tracker.keys_pressed(), action)
        } else {
            self.mapper.any_maps_to(self.tracker.keys_down(), action)
        }
    }

    fn latch(&self) -> FrameInput {
        FrameInput {
            forward: self.active(GameAction::MoveForward),
            backward: self.active(GameAction::MoveBackward),
            left: self.active(GameAction::StrafeLeft),
            right: self.active(GameAction::StrafeRight),
            look_delta: self.tracker.look_delta(),
            toggle_flashlight: self.active(GameAction::ToggleFlashlight),
            interact: self.active(GameAction::Interact),
            pointer_locked: self.tracker.pointer_locked(),
            interacted: self.tracker.interacted(),
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new(ActionMapper::with_defaults())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
