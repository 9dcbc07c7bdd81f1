use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{KeyCode, KeyStroke, Modifiers};

static NEXT_EVENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one raw input event as delivered by the host.
///
/// The same gesture must carry the same id through every observation point,
/// so hosts either map their native event object to an id or use
/// [`EventId::fresh`] when they build the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(pub u64);

impl EventId {
    pub fn fresh() -> Self {
        Self(NEXT_EVENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Opaque handle to an on-screen widget, interpreted by the host's `UiContext`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    /// Character produced by the key, if any.
    pub key_char: Option<char>,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(code: KeyCode, key_char: Option<char>, modifiers: Modifiers) -> Self {
        Self {
            code,
            key_char,
            modifiers,
        }
    }

    pub fn keystroke(&self) -> KeyStroke {
        KeyStroke::new(self.code, self.modifiers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseClick {
    /// Title of the dialog owning the clicked widget, when it is a dialog.
    pub dialog_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    KeyPressed(KeyPress),
    MouseClicked(MouseClick),
    /// Anything else the dispatch loop delivers (releases, moves, focus...).
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInputEvent {
    pub id: EventId,
    pub kind: InputKind,
    /// Widget the event was dispatched to.
    pub component: Option<ComponentId>,
}

impl RawInputEvent {
    pub fn key(code: KeyCode, key_char: Option<char>, modifiers: Modifiers) -> Self {
        Self {
            id: EventId::fresh(),
            kind: InputKind::KeyPressed(KeyPress::new(code, key_char, modifiers)),
            component: None,
        }
    }

    /// A plain character key press, e.g. `a` or `7`.
    pub fn char_key(ch: char) -> Self {
        Self::key(KeyCode::Char(ch.to_ascii_lowercase()), Some(ch), Modifiers::NONE)
    }

    pub fn click(dialog_title: Option<String>) -> Self {
        Self {
            id: EventId::fresh(),
            kind: InputKind::MouseClicked(MouseClick { dialog_title }),
            component: None,
        }
    }

    pub fn other() -> Self {
        Self {
            id: EventId::fresh(),
            kind: InputKind::Other,
            component: None,
        }
    }

    pub fn on(mut self, component: ComponentId) -> Self {
        self.component = Some(component);
        self
    }

    pub fn key_press(&self) -> Option<&KeyPress> {
        match &self.kind {
            InputKind::KeyPressed(key) => Some(key),
            _ => None,
        }
    }
}

/// Host notification that a named command is about to run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandInvocation {
    /// Registered command id, e.g. `EditorCopy`.
    pub command_id: Option<String>,
    /// Text the host presents for the command (menu item label).
    pub presentation_text: Option<String>,
    /// Name of the implementing type; anonymous ones contain `$` or `{{closure}}`.
    pub implementation: String,
    /// First shortcut bound to the command locally.
    pub shortcut: Option<KeyStroke>,
    /// Raw input event that fired the command.
    pub input: Option<RawInputEvent>,
}

impl CommandInvocation {
    pub fn new(command_id: impl Into<String>) -> Self {
        Self {
            command_id: Some(command_id.into()),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.presentation_text = Some(text.into());
        self
    }

    pub fn with_input(mut self, input: RawInputEvent) -> Self {
        self.input = Some(input);
        self
    }
}
