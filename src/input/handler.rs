use crate::app::App;
use crate::clock::Clock;
use crate::dialogs::Dialogs;
use crate::notifications::Notifier;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// User actions available on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Record,
    Edit,
    Delete,
    ClearAll,
    Settings,
    SelectUp,
    SelectDown,
    Quit,
}

/// Map a key on the main screen to an action
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectDown),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') => Some(Action::Record),
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => Some(Action::Edit),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => Some(Action::Delete),
        // Upper-case only, so a stray 'c' can't open the clear dialog
        KeyCode::Char('C') => Some(Action::ClearAll),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Settings),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Handle a key on the main screen. Returns true when the app should quit.
pub fn handle_key<N: Notifier, C: Clock>(
    app: &mut App<N, C>,
    dialogs: &mut dyn Dialogs,
    key: KeyEvent,
) -> Result<bool> {
    let Some(action) = action_for_key(key) else {
        return Ok(false);
    };

    match action {
        Action::Record => app.record(dialogs)?,
        Action::Edit => app.edit_selected(dialogs)?,
        Action::Delete => app.delete_selected(dialogs)?,
        Action::ClearAll => app.clear_all(dialogs)?,
        Action::Settings => app.settings(dialogs)?,
        Action::SelectUp => app.move_selection_up(),
        Action::SelectDown => app.move_selection_down(),
        Action::Quit => return Ok(true),
    }

    Ok(false)
}

/// Alert keys. True when the alert is dismissed.
pub fn handle_alert_key(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('o') | KeyCode::Char('O')
    )
}

/// Confirm keys. Some(true) accepts, Some(false) cancels, None keeps waiting.
pub fn handle_confirm_key(key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

/// Prompt keys edit `input` in place.
/// Some(Some(text)) submits, Some(None) cancels, None keeps waiting.
pub fn handle_prompt_key(input: &mut String, key: KeyEvent) -> Option<Option<String>> {
    match key.code {
        KeyCode::Enter => Some(Some(input.clone())),
        KeyCode::Esc => Some(None),
        KeyCode::Backspace => {
            input.pop();
            None
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.clear();
            None
        }
        KeyCode::Char(c) => {
            input.push(c);
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::FixedClock;
    use crate::dialogs::testing::ScriptedDialogs;
    use crate::notifications::testing::RecordingNotifier;
    use crate::persistence::ReminderConfig;
    use crate::store::RecordStore;
    use chrono::{Local, TimeZone};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_action_for_key() {
        assert_eq!(action_for_key(key(KeyCode::Char('r'))), Some(Action::Record));
        assert_eq!(action_for_key(key(KeyCode::Char('e'))), Some(Action::Edit));
        assert_eq!(action_for_key(key(KeyCode::Char('d'))), Some(Action::Delete));
        assert_eq!(action_for_key(key(KeyCode::Char('C'))), Some(Action::ClearAll));
        assert_eq!(action_for_key(key(KeyCode::Char('c'))), None);
        assert_eq!(action_for_key(key(KeyCode::Char('s'))), Some(Action::Settings));
        assert_eq!(action_for_key(key(KeyCode::Up)), Some(Action::SelectUp));
        assert_eq!(action_for_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_confirm_keys() {
        assert_eq!(handle_confirm_key(key(KeyCode::Char('y'))), Some(true));
        assert_eq!(handle_confirm_key(key(KeyCode::Esc)), Some(false));
        assert_eq!(handle_confirm_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_alert_keys() {
        assert!(handle_alert_key(key(KeyCode::Enter)));
        assert!(!handle_alert_key(key(KeyCode::Char('z'))));
    }

    #[test]
    fn test_prompt_editing() {
        let mut input = "01/01/2024 09:00".to_string();

        assert_eq!(handle_prompt_key(&mut input, key(KeyCode::Backspace)), None);
        assert_eq!(handle_prompt_key(&mut input, key(KeyCode::Char('5'))), None);
        assert_eq!(input, "01/01/2024 09:05");

        assert_eq!(
            handle_prompt_key(&mut input, key(KeyCode::Enter)),
            Some(Some("01/01/2024 09:05".to_string()))
        );
        assert_eq!(handle_prompt_key(&mut input, key(KeyCode::Esc)), Some(None));

        handle_prompt_key(&mut input, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(input.is_empty());
    }

    #[test]
    fn test_handle_key_records_and_quits() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            RecordStore::new(temp_dir.path().join("applications.json")),
            ReminderConfig::default(),
            RecordingNotifier::default(),
            FixedClock::new(Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap()),
        );
        let mut dialogs = ScriptedDialogs::default();

        assert!(!handle_key(&mut app, &mut dialogs, key(KeyCode::Char('r'))).unwrap());
        assert_eq!(app.store().len(), 1);

        assert!(handle_key(&mut app, &mut dialogs, key(KeyCode::Char('q'))).unwrap());
    }
}
