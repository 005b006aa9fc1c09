//! Keyboard mapping

use crate::sim::{Key, KeyEvent};

/// Map a DOM `KeyboardEvent.code` to a game key
pub fn key_from_code(code: &str) -> Option<Key> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Key::Left),
        "ArrowRight" | "KeyD" => Some(Key::Right),
        "Space" => Some(Key::Jump),
        _ => None,
    }
}

/// Build the event for a key transition. Presses of unused keys are
/// ignored; every release counts.
pub fn key_event(code: &str, down: bool) -> Option<KeyEvent> {
    if down {
        key_from_code(code).map(KeyEvent::Down)
    } else {
        Some(KeyEvent::Up)
    }
}
