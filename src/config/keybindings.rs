//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings alongside the arrow keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Keys bound to `action`, for help text.
    pub fn keys_for(&self, action: KeyAction) -> Vec<KeyEvent> {
        let mut keys: Vec<KeyEvent> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_key(|key| format!("{:?}", key.code));
        keys
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, KeyModifiers::NONE), action);
        };

        // Vim-style movement
        bind(KeyCode::Char('h'), KeyAction::MoveLeft);
        bind(KeyCode::Char('l'), KeyAction::MoveRight);
        bind(KeyCode::Char('k'), KeyAction::MoveUp);
        bind(KeyCode::Char('j'), KeyAction::MoveDown);

        // Arrow key movement
        bind(KeyCode::Left, KeyAction::MoveLeft);
        bind(KeyCode::Right, KeyAction::MoveRight);
        bind(KeyCode::Up, KeyAction::MoveUp);
        bind(KeyCode::Down, KeyAction::MoveDown);

        // Paging
        bind(KeyCode::Char('['), KeyAction::PreviousPage);
        bind(KeyCode::Char(']'), KeyAction::NextPage);
        bind(KeyCode::PageUp, KeyAction::PreviousPage);
        bind(KeyCode::PageDown, KeyAction::NextPage);

        // Selection
        bind(KeyCode::Enter, KeyAction::Select);
        bind(KeyCode::Char(' '), KeyAction::Select);
        bind(KeyCode::Char('t'), KeyAction::Today);
        bind(KeyCode::Home, KeyAction::Today);

        // Focus and application
        bind(KeyCode::Tab, KeyAction::CycleFocus);
        bind(KeyCode::Char('?'), KeyAction::Help);
        bind(KeyCode::Char('q'), KeyAction::Quit);

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings_map_vim_and_arrow_keys_to_same_actions() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('h'))), Some(KeyAction::MoveLeft));
        assert_eq!(bindings.get(key(KeyCode::Left)), Some(KeyAction::MoveLeft));
        assert_eq!(bindings.get(key(KeyCode::Char('j'))), Some(KeyAction::MoveDown));
        assert_eq!(bindings.get(key(KeyCode::Down)), Some(KeyAction::MoveDown));
    }

    #[test]
    fn default_bindings_map_brackets_to_paging() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('['))), Some(KeyAction::PreviousPage));
        assert_eq!(bindings.get(key(KeyCode::Char(']'))), Some(KeyAction::NextPage));
    }

    #[test]
    fn modifiers_are_part_of_the_binding() {
        let bindings = KeyBindings::default();
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(bindings.get(ctrl_q), None);
        assert_eq!(bindings.get(key(KeyCode::Char('q'))), Some(KeyAction::Quit));
    }

    #[test]
    fn keys_for_lists_every_binding_of_an_action() {
        let bindings = KeyBindings::default();
        let select = bindings.keys_for(KeyAction::Select);
        assert_eq!(select.len(), 2);
        assert!(select.contains(&key(KeyCode::Enter)));
        assert!(select.contains(&key(KeyCode::Char(' '))));
    }
}
