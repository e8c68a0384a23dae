//! Key mapping from terminal events to control actions.

use crate::types::ControlAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to control actions.
///
/// Only presses count; auto-repeat and release events are ignored so holding
/// a key does not toggle the simulation on and off.
pub fn handle_key_event(key: KeyEvent) -> Option<ControlAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if should_quit(key) {
        return Some(ControlAction::Quit);
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter => {
            Some(ControlAction::ToggleRun)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('.') => {
            Some(ControlAction::StepOnce)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(ControlAction::Reseed),
        _ => None,
    }
}

/// Check if key should quit the host.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    #[test]
    fn test_toggle_keys() {
        for code in [KeyCode::Char(' '), KeyCode::Char('p'), KeyCode::Enter] {
            assert_eq!(
                handle_key_event(KeyEvent::from(code)),
                Some(ControlAction::ToggleRun)
            );
        }
    }

    #[test]
    fn test_step_and_reseed_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('n'))),
            Some(ControlAction::StepOnce)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(ControlAction::Reseed)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(ControlAction::Quit)
        );
    }
}
