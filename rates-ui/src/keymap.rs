//! Keyboard shortcut handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Dashboard keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    NextField,
    PrevField,
    Increase,
    Decrease,
    IncreaseMore,
    DecreaseMore,
    Digit(u8),
    Backspace,
    RunCalculator,
    Refresh,
    None,
}

/// Map a key event to an action.
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab => KeyAction::NextField,
        KeyCode::BackTab => KeyAction::PrevField,
        KeyCode::Right | KeyCode::Up | KeyCode::Char('+') => KeyAction::Increase,
        KeyCode::Left | KeyCode::Down | KeyCode::Char('-') => KeyAction::Decrease,
        KeyCode::PageUp => KeyAction::IncreaseMore,
        KeyCode::PageDown => KeyAction::DecreaseMore,
        KeyCode::Char(c) if c.is_ascii_digit() => KeyAction::Digit(c as u8 - b'0'),
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Enter => KeyAction::RunCalculator,
        KeyCode::Char('r') => KeyAction::Refresh,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(map_key(key(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn focus_keys() {
        assert_eq!(map_key(key(KeyCode::Tab)), KeyAction::NextField);
        assert_eq!(map_key(key(KeyCode::BackTab)), KeyAction::PrevField);
    }

    #[test]
    fn adjust_keys() {
        assert_eq!(map_key(key(KeyCode::Right)), KeyAction::Increase);
        assert_eq!(map_key(key(KeyCode::Left)), KeyAction::Decrease);
        assert_eq!(map_key(key(KeyCode::PageUp)), KeyAction::IncreaseMore);
        assert_eq!(map_key(key(KeyCode::PageDown)), KeyAction::DecreaseMore);
    }

    #[test]
    fn digits_carry_their_value() {
        assert_eq!(map_key(key(KeyCode::Char('0'))), KeyAction::Digit(0));
        assert_eq!(map_key(key(KeyCode::Char('7'))), KeyAction::Digit(7));
        assert_eq!(map_key(key(KeyCode::Backspace)), KeyAction::Backspace);
    }

    #[test]
    fn action_keys() {
        assert_eq!(map_key(key(KeyCode::Enter)), KeyAction::RunCalculator);
        assert_eq!(map_key(key(KeyCode::Char('r'))), KeyAction::Refresh);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut event = key(KeyCode::Enter);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(event), KeyAction::None);
    }

    #[test]
    fn unknown_key() {
        assert_eq!(map_key(key(KeyCode::Char('z'))), KeyAction::None);
    }
}
