//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
///
/// Movement actions depend on which pane has focus: with the strip focused
/// left/right step the selected month, with the day grid focused they move
/// the day cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Movement
    /// Previous month (strip) or previous day (grid). Default: h/←
    MoveLeft,
    /// Next month (strip) or next day (grid). Default: l/→
    MoveRight,
    /// Previous week in the grid. Default: k/↑
    MoveUp,
    /// Next week in the grid. Default: j/↓
    MoveDown,

    // Paging
    /// Swipe the pager back one month. Default: [/Page Up
    PreviousPage,
    /// Swipe the pager forward one month. Default: ]/Page Down
    NextPage,

    // Selection
    /// Select the day under the cursor. Default: Enter/Space
    Select,
    /// Jump both panes to today's month. Default: t
    Today,

    // Focus
    /// Cycle focus between strip and grid. Default: Tab
    CycleFocus,

    // Application
    /// Toggle the help overlay. Default: ?
    Help,
    /// Quit. Default: q
    Quit,
}

impl KeyAction {
    /// Whether the action moves something (month or day cursor).
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            KeyAction::MoveLeft | KeyAction::MoveRight | KeyAction::MoveUp | KeyAction::MoveDown
        )
    }

    /// Signed step for horizontal movement and paging, `None` otherwise.
    pub fn horizontal_step(self) -> Option<i32> {
        match self {
            KeyAction::MoveLeft | KeyAction::PreviousPage => Some(-1),
            KeyAction::MoveRight | KeyAction::NextPage => Some(1),
            _ => None,
        }
    }
}
