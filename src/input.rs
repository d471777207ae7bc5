//! Input validation boundary.
//!
//! Raw keys and lines are turned into [`UserAction`]s here; anything that is
//! not Enter, Backspace or a single ASCII letter never reaches the engine.

use crate::debug_log;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

/// The three input classes the engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Enter,
    Backspace,
    Letter(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    Input(Input),
    Reset,
    Exit,
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Map a terminal key event to an action.
///
/// `round_over` enables the `N` shortcut for a new game; while a round is being
/// played letters always go to the board.
#[must_use]
pub fn classify_key(key: KeyEvent, round_over: bool) -> Option<UserAction> {
    // Only Press events; Release and Repeat would double the input
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('r' | 'R'))
    {
        return Some(UserAction::Reset);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'C'))
    {
        return Some(UserAction::Exit);
    }

    match key.code {
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Enter => Some(UserAction::Input(Input::Enter)),
        KeyCode::Backspace => Some(UserAction::Input(Input::Backspace)),
        KeyCode::Char(c) => {
            // Alt-tab and similar leave replacement and control characters behind
            if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                debug_log!("classify_key() - dropping stray character {:?}", c);
                return None;
            }
            if has_modifier_keys(&key) {
                debug_log!("classify_key() - dropping chord {:?}+{:?}", key.modifiers, c);
                return None;
            }
            if round_over && c.eq_ignore_ascii_case(&'n') {
                return Some(UserAction::Reset);
            }
            if c.is_ascii_alphabetic() {
                Some(UserAction::Input(Input::Letter(c)))
            } else {
                debug_log!("classify_key() - ignoring non-letter {:?}", c);
                None
            }
        }
        _ => None,
    }
}

/// Translate one line of the plain interface.
///
/// `:reset` and `:quit` are commands. Any other line replaces the in-progress
/// guess (`pending` letters are erased first) with the line's letters and
/// submits it. Non-letters are dropped.
#[must_use]
pub fn line_to_actions(line: &str, pending: usize) -> Vec<UserAction> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        ":reset" | ":r" => return vec![UserAction::Reset],
        ":quit" | ":q" | ":exit" => return vec![UserAction::Exit],
        _ => {}
    }

    let mut actions = vec![UserAction::Input(Input::Backspace); pending];
    actions.extend(
        trimmed
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| UserAction::Input(Input::Letter(c))),
    );
    actions.push(UserAction::Input(Input::Enter));
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_letters_enter_backspace() {
        assert_eq!(
            classify_key(key(KeyCode::Char('a')), false),
            Some(UserAction::Input(Input::Letter('a')))
        );
        assert_eq!(
            classify_key(key_with(KeyCode::Char('A'), KeyModifiers::SHIFT), false),
            Some(UserAction::Input(Input::Letter('A')))
        );
        assert_eq!(
            classify_key(key(KeyCode::Enter), false),
            Some(UserAction::Input(Input::Enter))
        );
        assert_eq!(
            classify_key(key(KeyCode::Backspace), false),
            Some(UserAction::Input(Input::Backspace))
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(classify_key(key(KeyCode::Char('3')), false), None);
        assert_eq!(classify_key(key(KeyCode::Char(' ')), false), None);
        assert_eq!(classify_key(key(KeyCode::Char('é')), false), None);
        assert_eq!(classify_key(key(KeyCode::Tab), false), None);
        assert_eq!(classify_key(key(KeyCode::Left), false), None);
        assert_eq!(classify_key(key(KeyCode::Char('\u{FFFD}')), false), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(classify_key(release, false), None);
    }

    #[test]
    fn test_chords() {
        assert_eq!(
            classify_key(key_with(KeyCode::Char('r'), KeyModifiers::CONTROL), false),
            Some(UserAction::Reset)
        );
        assert_eq!(
            classify_key(key_with(KeyCode::Char('c'), KeyModifiers::CONTROL), false),
            Some(UserAction::Exit)
        );
        assert_eq!(
            classify_key(key_with(KeyCode::Char('a'), KeyModifiers::ALT), false),
            None
        );
        assert_eq!(classify_key(key(KeyCode::Esc), false), Some(UserAction::Exit));
    }

    #[test]
    fn test_new_game_shortcut_only_when_over() {
        assert_eq!(
            classify_key(key(KeyCode::Char('n')), false),
            Some(UserAction::Input(Input::Letter('n')))
        );
        assert_eq!(
            classify_key(key(KeyCode::Char('N')), true),
            Some(UserAction::Reset)
        );
    }

    #[test]
    fn test_line_to_actions_word() {
        let actions = line_to_actions("  Crane \n", 0);
        assert_eq!(actions.len(), 6);
        assert_eq!(actions[0], UserAction::Input(Input::Letter('C')));
        assert_eq!(actions[5], UserAction::Input(Input::Enter));
    }

    #[test]
    fn test_line_to_actions_clears_pending() {
        let actions = line_to_actions("ab", 3);
        assert_eq!(
            actions,
            vec![
                UserAction::Input(Input::Backspace),
                UserAction::Input(Input::Backspace),
                UserAction::Input(Input::Backspace),
                UserAction::Input(Input::Letter('a')),
                UserAction::Input(Input::Letter('b')),
                UserAction::Input(Input::Enter),
            ]
        );
    }

    #[test]
    fn test_line_to_actions_drops_non_letters() {
        let actions = line_to_actions("c-r4n", 0);
        assert_eq!(
            actions,
            vec![
                UserAction::Input(Input::Letter('c')),
                UserAction::Input(Input::Letter('r')),
                UserAction::Input(Input::Letter('n')),
                UserAction::Input(Input::Enter),
            ]
        );
    }

    #[test]
    fn test_line_commands() {
        assert_eq!(line_to_actions(":reset", 2), vec![UserAction::Reset]);
        assert_eq!(line_to_actions(":QUIT\n", 0), vec![UserAction::Exit]);
        assert_eq!(line_to_actions(":q", 0), vec![UserAction::Exit]);
    }
}
