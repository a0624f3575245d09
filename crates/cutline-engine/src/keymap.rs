//! Keyboard shortcuts for timeline commands.
//!
//! The host translates its own key events into [`Key`] + [`Modifiers`] and
//! asks the keymap for a command. Ctrl and Cmd are interchangeable as the
//! primary modifier so the same bindings work on every platform.

use std::collections::HashMap;
use std::fmt;

use crate::command::TimelineCommand;
use crate::config::EngineConfig;

// ── Shortcut representation ─────────────────────────────────────

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub command: bool, // ⌘ on macOS
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        command: false,
    };
    pub const CMD: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        command: true,
    };
    pub const CMD_SHIFT: Self = Self {
        ctrl: false,
        shift: true,
        alt: false,
        command: true,
    };
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
        alt: false,
        command: false,
    };

    /// Fold Ctrl into Cmd so either one matches a primary-modifier binding.
    fn normalized(self) -> Self {
        Self {
            ctrl: false,
            command: self.ctrl || self.command,
            ..self
        }
    }
}

/// Keys the timeline responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Delete,
    Backspace,
    Space,
    ArrowLeft,
    ArrowRight,
    /// A printable key, lowercased.
    Char(char),
}

impl Key {
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Delete => f.write_str("Del"),
            Key::Backspace => f.write_str("⌫"),
            Key::Space => f.write_str("Space"),
            Key::ArrowLeft => f.write_str("←"),
            Key::ArrowRight => f.write_str("→"),
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
        }
    }
}

/// A keyboard shortcut (modifier + key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl Shortcut {
    pub fn new(modifiers: Modifiers, key: Key) -> Self {
        Self {
            modifiers: modifiers.normalized(),
            key,
        }
    }

    /// Format for display: "⌘C", "⇧→", etc.
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.alt {
            s.push('⌥');
        }
        if self.modifiers.shift {
            s.push('⇧');
        }
        if self.modifiers.command {
            s.push('⌘');
        }
        s.push_str(&self.key.to_string());
        s
    }
}

// ── Keymap ──────────────────────────────────────────────────────

/// Shortcut → command table.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<Shortcut, TimelineCommand>,
}

impl Keymap {
    /// An empty keymap.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// The built-in bindings, with seek steps taken from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut map = Self::empty();
        let cmd = Modifiers::CMD;

        map.bind(Shortcut::new(Modifiers::NONE, Key::Delete), TimelineCommand::Delete);
        map.bind(Shortcut::new(Modifiers::NONE, Key::Backspace), TimelineCommand::Delete);
        map.bind(Shortcut::new(cmd, Key::char('c')), TimelineCommand::Copy);
        map.bind(Shortcut::new(cmd, Key::char('v')), TimelineCommand::Paste);
        map.bind(Shortcut::new(cmd, Key::char('x')), TimelineCommand::Cut);
        map.bind(Shortcut::new(cmd, Key::char('z')), TimelineCommand::Undo);
        map.bind(Shortcut::new(cmd, Key::char('y')), TimelineCommand::Redo);
        map.bind(
            Shortcut::new(Modifiers::CMD_SHIFT, Key::char('z')),
            TimelineCommand::Redo,
        );
        map.bind(Shortcut::new(Modifiers::NONE, Key::Space), TimelineCommand::TogglePlayback);

        let step = config.seek_step;
        let large = config.seek_step_large;
        map.bind(
            Shortcut::new(Modifiers::NONE, Key::ArrowLeft),
            TimelineCommand::SeekBackward { seconds: step },
        );
        map.bind(
            Shortcut::new(Modifiers::NONE, Key::ArrowRight),
            TimelineCommand::SeekForward { seconds: step },
        );
        map.bind(
            Shortcut::new(Modifiers::SHIFT, Key::ArrowLeft),
            TimelineCommand::SeekBackward { seconds: large },
        );
        map.bind(
            Shortcut::new(Modifiers::SHIFT, Key::ArrowRight),
            TimelineCommand::SeekForward { seconds: large },
        );

        for modifiers in [cmd, Modifiers::CMD_SHIFT] {
            map.bind(Shortcut::new(modifiers, Key::char('=')), TimelineCommand::ZoomIn);
            map.bind(Shortcut::new(modifiers, Key::char('+')), TimelineCommand::ZoomIn);
        }
        map.bind(Shortcut::new(cmd, Key::char('-')), TimelineCommand::ZoomOut);
        map.bind(
            Shortcut::new(cmd, Key::char('0')),
            TimelineCommand::FitToView { width: None },
        );
        map
    }

    /// Add or replace a binding. Returns the command previously bound.
    pub fn bind(&mut self, shortcut: Shortcut, command: TimelineCommand) -> Option<TimelineCommand> {
        self.bindings.insert(shortcut, command)
    }

    pub fn unbind(&mut self, shortcut: &Shortcut) -> Option<TimelineCommand> {
        self.bindings.remove(shortcut)
    }

    /// Look up the command for a key press.
    pub fn resolve(&self, modifiers: Modifiers, key: Key) -> Option<&TimelineCommand> {
        self.bindings.get(&Shortcut::new(modifiers, key))
    }

    /// Shortcut bound to `command`, for menus and tooltips.
    pub fn shortcut_for(&self, command: &TimelineCommand) -> Option<Shortcut> {
        self.bindings
            .iter()
            .filter(|(_, bound)| *bound == command)
            .map(|(shortcut, _)| *shortcut)
            .min_by_key(|shortcut| shortcut.display())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
