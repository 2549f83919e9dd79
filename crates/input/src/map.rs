//! Adapter from crossterm key codes to the physical key names the
//! dispatcher's binding table consumes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Translate a platform key code to the dispatcher's key-name vocabulary.
pub fn key_name(code: KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::Left => Some("Left"),
        KeyCode::Right => Some("Right"),
        KeyCode::Up => Some("Up"),
        KeyCode::Down => Some("Down"),
        KeyCode::Char(' ') => Some("space"),
        KeyCode::Char('p') | KeyCode::Char('P') => Some("p"),
        KeyCode::Char('m') | KeyCode::Char('M') => Some("m"),
        KeyCode::Char('r') | KeyCode::Char('R') => Some("r"),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
