//! Maps raw input events to candidate actions.

use super::input_event::{InputKind, KeyPress, RawInputEvent};
use super::types::{ActionData, KeyCode};

/// Classify a key press or click. Other events are never logged.
pub fn classify(event: &RawInputEvent) -> Option<ActionData> {
    match &event.kind {
        InputKind::KeyPressed(key) => Some(classify_key(key)),
        InputKind::MouseClicked(click) => Some(ActionData::MouseClicked {
            dialog_title: click.dialog_title.clone(),
        }),
        InputKind::Other => None,
    }
}

fn classify_key(key: &KeyPress) -> ActionData {
    match typed_char(key) {
        Some(ch) => ActionData::CharTyped { ch },
        None => ActionData::KeyStrokePressed {
            keystroke: key.keystroke(),
        },
    }
}

/// The character this press typed as plain text, if it did.
///
/// Enter always reads as a keystroke, never as a typed line break.
fn typed_char(key: &KeyPress) -> Option<char> {
    if key.code == KeyCode::Enter || key.modifiers.has_accelerator() {
        return None;
    }
    key.key_char.filter(|c| !c.is_control())
}

/// How a raw event is shown as the trigger of a command.
///
/// Key presses always render as keystrokes so the command reads `via Ctrl+C`.
pub fn trigger_source(event: &RawInputEvent) -> Option<ActionData> {
    match &event.kind {
        InputKind::KeyPressed(key) => Some(ActionData::KeyStrokePressed {
            keystroke: key.keystroke(),
        }),
        InputKind::MouseClicked(click) => Some(ActionData::MouseClicked {
            dialog_title: click.dialog_title.clone(),
        }),
        InputKind::Other => None,
    }
}

/// Whether the event's effect depends on the current selection.
pub fn is_context_sensitive(event: &RawInputEvent) -> bool {
    match &event.kind {
        InputKind::MouseClicked(_) => true,
        InputKind::KeyPressed(key) => matches!(
            key.code,
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Tab
        ) || key.code.is_navigation(),
        InputKind::Other => false,
    }
}

/// Delete and Backspace act on the text being edited, not on a selected item.
pub fn wants_editable_text(event: &RawInputEvent) -> bool {
    event
        .key_press()
        .is_some_and(|key| matches!(key.code, KeyCode::Delete | KeyCode::Backspace))
}

pub fn is_modifier_only(event: &RawInputEvent) -> bool {
    event.key_press().is_some_and(|key| key.code.is_modifier())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::types::{KeyStroke, Modifiers};

    fn key(code: KeyCode, ch: Option<char>, modifiers: Modifiers) -> RawInputEvent {
        RawInputEvent::key(code, ch, modifiers)
    }

    // --- classify ---

    #[test]
    fn plain_letter_is_typed() {
        let action = classify(&RawInputEvent::char_key('a')).expect("classified");
        assert_eq!(action, ActionData::CharTyped { ch: 'a' });
    }

    #[test]
    fn shifted_letter_is_typed() {
        let event = key(KeyCode::Char('a'), Some('A'), Modifiers::shift());
        assert_eq!(classify(&event), Some(ActionData::CharTyped { ch: 'A' }));
    }

    #[test]
    fn ctrl_letter_is_keystroke() {
        let event = key(KeyCode::Char('a'), Some('a'), Modifiers::ctrl());
        assert_eq!(
            classify(&event),
            Some(ActionData::KeyStrokePressed {
                keystroke: KeyStroke::new(KeyCode::Char('a'), Modifiers::ctrl()),
            })
        );
    }

    #[test]
    fn alt_and_meta_letters_are_keystrokes() {
        for modifiers in [Modifiers::alt(), Modifiers::meta()] {
            let event = key(KeyCode::Char('f'), Some('f'), modifiers);
            assert!(matches!(
                classify(&event),
                Some(ActionData::KeyStrokePressed { .. })
            ));
        }
    }

    #[test]
    fn enter_is_keystroke() {
        let event = key(KeyCode::Enter, Some('\n'), Modifiers::NONE);
        assert_eq!(
            classify(&event),
            Some(ActionData::KeyStrokePressed {
                keystroke: KeyStroke::plain(KeyCode::Enter),
            })
        );
    }

    #[test]
    fn control_chars_are_keystrokes() {
        let tab = key(KeyCode::Tab, Some('\t'), Modifiers::NONE);
        let backspace = key(KeyCode::Backspace, Some('\u{8}'), Modifiers::NONE);
        let escape = key(KeyCode::Escape, Some('\u{1b}'), Modifiers::NONE);
        for event in [tab, backspace, escape] {
            assert!(matches!(
                classify(&event),
                Some(ActionData::KeyStrokePressed { .. })
            ));
        }
    }

    #[test]
    fn key_without_char_is_keystroke() {
        let event = key(KeyCode::Function(5), None, Modifiers::NONE);
        assert_eq!(classify(&event).map(|a| a.to_string()).as_deref(), Some("F5"));
    }

    #[test]
    fn click_keeps_dialog_title() {
        let event = RawInputEvent::click(Some("Rename".to_string()));
        assert_eq!(
            classify(&event),
            Some(ActionData::MouseClicked {
                dialog_title: Some("Rename".to_string()),
            })
        );
    }

    #[test]
    fn other_events_are_not_classified() {
        assert_eq!(classify(&RawInputEvent::other()), None);
    }

    // --- trigger_source ---

    #[test]
    fn trigger_for_plain_char_is_keystroke() {
        let trigger = trigger_source(&RawInputEvent::char_key('x')).expect("trigger");
        assert_eq!(trigger.to_string(), "X");
    }

    // --- context sensitivity ---

    #[test]
    fn navigation_and_editing_keys_are_context_sensitive() {
        let codes = [
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Enter,
            KeyCode::Delete,
            KeyCode::Backspace,
            KeyCode::Tab,
        ];
        for code in codes {
            assert!(
                is_context_sensitive(&key(code, None, Modifiers::NONE)),
                "{code:?} should be context sensitive"
            );
        }
    }

    #[test]
    fn letters_are_not_context_sensitive() {
        assert!(!is_context_sensitive(&RawInputEvent::char_key('r')));
        assert!(!is_context_sensitive(&RawInputEvent::other()));
    }

    #[test]
    fn clicks_are_context_sensitive() {
        assert!(is_context_sensitive(&RawInputEvent::click(None)));
    }

    #[test]
    fn only_delete_and_backspace_want_editable_text() {
        assert!(wants_editable_text(&key(KeyCode::Delete, None, Modifiers::NONE)));
        assert!(wants_editable_text(&key(KeyCode::Backspace, None, Modifiers::NONE)));
        assert!(!wants_editable_text(&key(KeyCode::Tab, None, Modifiers::NONE)));
        assert!(!wants_editable_text(&RawInputEvent::click(None)));
    }

    #[test]
    fn bare_modifier_press_is_detected() {
        assert!(is_modifier_only(&key(KeyCode::Control, None, Modifiers::ctrl())));
        assert!(!is_modifier_only(&RawInputEvent::char_key('c')));
    }
}
