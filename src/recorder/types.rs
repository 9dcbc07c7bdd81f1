use std::fmt;

/// Physical key identity, independent of the character it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, identified by its unshifted character.
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key F1..F24.
    Function(u8),
    Shift,
    Control,
    Alt,
    Meta,
    /// Host-specific virtual key code with no name of its own.
    Other(u32),
}

impl KeyCode {
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            KeyCode::Shift | KeyCode::Control | KeyCode::Alt | KeyCode::Meta
        )
    }

    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            KeyCode::Up
                | KeyCode::Down
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Home
                | KeyCode::End
                | KeyCode::PageUp
                | KeyCode::PageDown
                | KeyCode::Enter
        )
    }

    /// Human-readable key name used in keystroke text.
    pub fn name(self) -> String {
        match self {
            KeyCode::Char(c) => c.to_uppercase().collect(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Escape => "Escape".to_string(),
            KeyCode::Space => "Space".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "Page Up".to_string(),
            KeyCode::PageDown => "Page Down".to_string(),
            KeyCode::Function(n) => format!("F{n}"),
            KeyCode::Shift => "Shift".to_string(),
            KeyCode::Control => "Ctrl".to_string(),
            KeyCode::Alt => "Alt".to_string(),
            KeyCode::Meta => "Meta".to_string(),
            KeyCode::Other(code) => format!("Key 0x{code:02X}"),
        }
    }
}

/// Modifier keys held while a key was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub const fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    pub const fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub const fn meta() -> Self {
        Self {
            meta: true,
            ..Self::NONE
        }
    }

    /// Alt, Ctrl or Meta: modifiers that turn a key into a shortcut.
    pub fn has_accelerator(&self) -> bool {
        self.alt || self.ctrl || self.meta
    }
}

/// A key combination, e.g. `Ctrl+Shift+A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyStroke {
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    pub fn text(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(5);
        if self.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.alt {
            parts.push("Alt".to_string());
        }
        if self.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if self.modifiers.meta {
            parts.push("Meta".to_string());
        }
        parts.push(self.code.name());
        parts.join("+")
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// One observable occurrence in a tracking session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionData {
    CharTyped {
        ch: char,
    },
    KeyStrokePressed {
        keystroke: KeyStroke,
    },
    MouseClicked {
        dialog_title: Option<String>,
    },
    CommandInvoked {
        label: String,
        /// Raw input that fired the command, if the host reported one.
        trigger: Option<Box<ActionData>>,
    },
    /// Wraps another action with the selection captured just before it ran.
    ContextSensitiveInvocation {
        selection: String,
        inner: Box<ActionData>,
    },
    Marker {
        label: String,
    },
}

impl ActionData {
    pub fn command(label: impl Into<String>, trigger: Option<ActionData>) -> Self {
        ActionData::CommandInvoked {
            label: label.into(),
            trigger: trigger.map(Box::new),
        }
    }

    pub fn with_selection(self, selection: impl Into<String>) -> Self {
        ActionData::ContextSensitiveInvocation {
            selection: selection.into(),
            inner: Box::new(self),
        }
    }

    /// One-line description used in the transcript.
    pub fn presentable_text(&self) -> String {
        match self {
            ActionData::CharTyped { ch } => format!("typed '{ch}'"),
            ActionData::KeyStrokePressed { keystroke } => keystroke.text(),
            ActionData::MouseClicked { dialog_title } => match dialog_title {
                Some(title) => format!("mouse clicked (in '{title}' dialog)"),
                None => "mouse clicked".to_string(),
            },
            ActionData::CommandInvoked { label, trigger } => {
                let via = match trigger.as_deref() {
                    Some(ActionData::MouseClicked { .. }) => " via mouse click".to_string(),
                    Some(source @ ActionData::KeyStrokePressed { .. }) => {
                        format!(" via {}", source.presentable_text())
                    }
                    Some(ActionData::CharTyped { .. })
                    | Some(ActionData::CommandInvoked { .. })
                    | Some(ActionData::ContextSensitiveInvocation { .. })
                    | Some(ActionData::Marker { .. })
                    | None => String::new(),
                };
                format!("action '{label}'{via}")
            }
            ActionData::ContextSensitiveInvocation { selection, inner } => {
                format!("{} on '{selection}'", inner.presentable_text())
            }
            ActionData::Marker { label } => format!(">>> {label} <<<"),
        }
    }
}

impl fmt::Display for ActionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.presentable_text())
    }
}

/// A timestamped action. Never edited once appended to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub timestamp_ms: i64,
    pub data: ActionData,
}

impl Record {
    pub fn new(timestamp_ms: i64, data: ActionData) -> Self {
        Self { timestamp_ms, data }
    }
}
