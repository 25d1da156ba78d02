//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps physical keys to game actions.
//
// Architecture:
//   KeyCode → HashMap → GameAction
//
// Several keys may drive the same action (WASD and arrows). A key drives
// at most one action; rebinding a key replaces its previous action.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{action::GameAction, event::KeyCode};

//=== ActionMapper ========================================================

/// Key → action lookup table.
#[derive(Debug, Clone)]
pub struct ActionMapper {
    key_bindings: HashMap<KeyCode, GameAction>,
}

impl ActionMapper {
    /// Creates a mapper with no bindings.
    pub fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
        }
    }

    /// WASD + arrows for movement, F for the flashlight, E to interact.
    pub fn with_defaults() -> Self {
        let mut mapper = Self::new();
        for (key, action) in [
            (KeyCode::KeyW, GameAction::MoveForward),
            (KeyCode::ArrowUp, GameAction::MoveForward),
            (KeyCode::KeyS, GameAction::MoveBackward),
            (KeyCode::ArrowDown, GameAction::MoveBackward),
            (KeyCode::KeyA, GameAction::StrafeLeft),
            (KeyCode::ArrowLeft, GameAction::StrafeLeft),
            (KeyCode::KeyD, GameAction::StrafeRight),
            (KeyCode::ArrowRight, GameAction::StrafeRight),
            (KeyCode::KeyF, GameAction::ToggleFlashlight),
            (KeyCode::KeyE, GameAction::Interact),
        ] {
            mapper.bind_key(key, action);
        }
        mapper
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key, replacing any action it was bound to before.
    pub fn bind_key(&mut self, key: KeyCode, action: GameAction) {
        self.key_bindings.insert(key, action);
    }

    /// Removes a key binding. Unbound keys are ignored.
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_bindings.remove(&key);
    }

    /// Removes every key bound to `action`.
    pub fn unbind_action(&mut self, action: GameAction) {
        self.key_bindings.retain(|_, bound| *bound != action);
    }

    //--- Lookup -----------------------------------------------------------

    pub fn map_key(&self, key: KeyCode) -> Option<GameAction> {
        self.key_bindings.get(&key).copied()
    }

    /// Returns `true` if any of `keys` is bound to `action`.
    pub fn any_maps_to<'a, I>(&self, keys: I, action: GameAction) -> bool
    where
        I: IntoIterator<Item = &'a KeyCode>,
    {
        keys.into_iter().any(|key| self.map_key(*key) == Some(action))
    }

    /// Keys currently bound to `action`.
    pub fn keys_for(&self, action: GameAction) -> Vec<KeyCode> {
        self.key_bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect()
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for ActionMapper {
    fn default() -> Self {
        Self::with_defaults()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
