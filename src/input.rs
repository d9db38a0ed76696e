//! Keyboard mapping from terminal key events to game inputs.

use crate::core::logic::RoadInput;
use crate::core::types::Variant;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translate a key event for the given variant.
///
/// Only key-down (and auto-repeat) events produce input; releases map to
/// `Other`. WASD-style alternates steer in the lanes game only.
pub fn map_key(key: KeyEvent, variant: Variant) -> RoadInput {
    if key.kind == KeyEventKind::Release {
        return RoadInput::Other;
    }

    // Raw mode swallows SIGINT, so Ctrl+C arrives as a key
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return RoadInput::Quit;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => RoadInput::Quit,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => RoadInput::TogglePause,
        KeyCode::Left => RoadInput::Left,
        KeyCode::Right => RoadInput::Right,
        KeyCode::Char('a') | KeyCode::Char('A') if variant == Variant::Lanes => RoadInput::Left,
        KeyCode::Char('d') | KeyCode::Char('D') if variant == Variant::Lanes => RoadInput::Right,
        _ => RoadInput::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_in_both_variants() {
        for v in [Variant::Lanes, Variant::Classic] {
            assert_eq!(map_key(press(KeyCode::Left), v), RoadInput::Left);
            assert_eq!(map_key(press(KeyCode::Right), v), RoadInput::Right);
        }
    }

    #[test]
    fn test_wasd_only_in_lanes() {
        assert_eq!(
            map_key(press(KeyCode::Char('a')), Variant::Lanes),
            RoadInput::Left
        );
        assert_eq!(
            map_key(press(KeyCode::Char('D')), Variant::Lanes),
            RoadInput::Right
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a')), Variant::Classic),
            RoadInput::Other
        );
    }

    #[test]
    fn test_quit_and_pause_keys() {
        let v = Variant::Lanes;
        assert_eq!(map_key(press(KeyCode::Esc), v), RoadInput::Quit);
        assert_eq!(map_key(press(KeyCode::Char('q')), v), RoadInput::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), v),
            RoadInput::Quit
        );
        assert_eq!(map_key(press(KeyCode::Char('p')), v), RoadInput::TogglePause);
        assert_eq!(map_key(press(KeyCode::Char(' ')), v), RoadInput::TogglePause);
    }

    #[test]
    fn test_release_ignored() {
        let mut key = press(KeyCode::Left);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key, Variant::Lanes), RoadInput::Other);
    }
}
