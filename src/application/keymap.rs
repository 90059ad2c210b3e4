//! Editor keys and the engine operation each one stands for.
//!
//! The decision depends on the focused bullet, so translation happens against
//! the current outline rather than as a static table.

use std::fmt;
use std::str::FromStr;

use crate::domain::{BulletId, Outline};

/// Structural keys the outline reacts to. Plain typing is not a key here;
/// the text widget reports it as a content update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    ShiftTab,
    Backspace,
    Up,
    Down,
    /// Swap with the previous sibling
    MoveUp,
    /// Swap with the next sibling
    MoveDown,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Enter => "enter",
            Key::Tab => "tab",
            Key::ShiftTab => "shift-tab",
            Key::Backspace => "backspace",
            Key::Up => "up",
            Key::Down => "down",
            Key::MoveUp => "move-up",
            Key::MoveDown => "move-down",
        };
        f.write_str(name)
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enter" => Ok(Key::Enter),
            "tab" => Ok(Key::Tab),
            "shift-tab" => Ok(Key::ShiftTab),
            "backspace" => Ok(Key::Backspace),
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            "move-up" => Ok(Key::MoveUp),
            "move-down" => Ok(Key::MoveDown),
            other => Err(format!("unknown key: {other}")),
        }
    }
}

/// What a key does to the focused bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    InsertAfter,
    Indent,
    Unindent,
    Delete,
    FocusPrevious,
    FocusNext,
    MoveUp,
    MoveDown,
    /// The key has no structural meaning here (e.g. Backspace inside text)
    Nothing,
}

/// Resolve `key` against the focused bullet.
///
/// Enter on an empty nested bullet leaves the parent instead of adding a
/// sibling; Backspace only deletes a bullet that is already empty.
pub fn resolve(outline: &Outline, focus: BulletId, key: Key) -> Operation {
    let Some(node) = outline.find_by_id(focus) else {
        return Operation::Nothing;
    };
    match key {
        Key::Enter if node.is_empty() && node.level > 0 => Operation::Unindent,
        Key::Enter => Operation::InsertAfter,
        Key::Tab => Operation::Indent,
        Key::ShiftTab => Operation::Unindent,
        Key::Backspace if node.is_empty() => Operation::Delete,
        Key::Backspace => Operation::Nothing,
        Key::Up => Operation::FocusPrevious,
        Key::Down => Operation::FocusNext,
        Key::MoveUp => Operation::MoveUp,
        Key::MoveDown => Operation::MoveDown,
    }
}
