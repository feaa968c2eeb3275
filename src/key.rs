//! Key bindings matched against Bubble Tea key messages.
//!
//! A [`Binding`] groups the key presses that trigger one command together with
//! the help text shown for it. Components expose their bindings through the
//! [`KeyMap`] trait so a help line can be rendered from them.
//!
//! ```rust
//! use pomodoro_widget::key::{new_binding, with_help, with_keys_str};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let quit = new_binding(vec![with_keys_str(&["q", "ctrl+c"]), with_help("q", "quit")]);
//!
//! let msg = KeyMsg { key: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
//! assert!(quit.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// One concrete key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key itself.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    /// Parses names like `"space"`, `"tab"`, `"ctrl+c"` or `"q"`.
    pub fn parse(name: &str) -> Option<Self> {
        let (modifiers, key) = match name.strip_prefix("ctrl+") {
            Some(rest) => (KeyModifiers::CONTROL, rest),
            None => (KeyModifiers::NONE, name),
        };
        let code = match key {
            "space" | " " => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "shift+tab" => KeyCode::BackTab,
            "esc" => KeyCode::Esc,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(Self { code, modifiers })
    }

    /// Whether `msg` is this key press.
    ///
    /// Shift is ignored because terminals report it inconsistently for
    /// printable characters.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        let held = msg.modifiers.difference(KeyModifiers::SHIFT);
        let wanted = self.modifiers.difference(KeyModifiers::SHIFT);
        msg.key == self.code && held == wanted
    }
}

/// Short key label and description shown in the help line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key label, e.g. `"space"`.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

/// A set of keys bound to one command.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

/// Option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Binds the given key presses.
pub fn with_keys(keys: Vec<KeyPress>) -> BindingOpt {
    Box::new(move |b: &mut Binding| b.keys = keys)
}

/// Binds keys by name. Unknown names are skipped.
pub fn with_keys_str(names: &[&str]) -> BindingOpt {
    let keys: Vec<KeyPress> = names.iter().filter_map(|n| KeyPress::parse(n)).collect();
    with_keys(keys)
}

/// Sets the help text.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

/// Starts the binding disabled.
pub fn with_disabled() -> BindingOpt {
    Box::new(|b: &mut Binding| b.disabled = true)
}

impl Binding {
    /// Bound key presses.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Replaces the bound keys.
    pub fn set_keys(&mut self, keys: Vec<KeyPress>) {
        self.keys = keys;
    }

    /// Help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the binding responds to keys and shows up in help.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Whether `msg` triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Bindings a component exposes for help rendering.
pub trait KeyMap {
    /// Bindings for the one-line help.
    fn short_help(&self) -> Vec<&Binding>;
}

/// Renders the enabled bindings as `key desc • key desc`.
pub fn short_help_view(map: &dyn KeyMap) -> String {
    map.short_help()
        .into_iter()
        .filter(|b| b.enabled())
        .map(|b| format!("{} {}", b.help.key, b.help.desc))
        .collect::<Vec<_>>()
        .join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(KeyPress::parse("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(KeyPress::parse("tab").unwrap().code, KeyCode::Tab);
        assert_eq!(KeyPress::parse("f").unwrap().code, KeyCode::Char('f'));

        let ctrl_c = KeyPress::parse("ctrl+c").unwrap();
        assert_eq!(ctrl_c.code, KeyCode::Char('c'));
        assert_eq!(ctrl_c.modifiers, KeyModifiers::CONTROL);

        assert!(KeyPress::parse("nonsense").is_none());
    }

    #[test]
    fn test_binding_matches() {
        let binding = new_binding(vec![with_keys_str(&["r", "enter"])]);
        assert!(binding.matches(&key(KeyCode::Char('r'))));
        assert!(binding.matches(&key(KeyCode::Enter)));
        assert!(!binding.matches(&key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_modifiers_must_match() {
        let binding = new_binding(vec![with_keys_str(&["ctrl+c"])]);
        assert!(!binding.matches(&key(KeyCode::Char('c'))));
        assert!(binding.matches(&KeyMsg {
            key: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        }));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut binding = new_binding(vec![with_keys_str(&["r"]), with_disabled()]);
        assert!(!binding.matches(&key(KeyCode::Char('r'))));

        binding.set_enabled(true);
        assert!(binding.matches(&key(KeyCode::Char('r'))));
    }

    #[test]
    fn test_short_help_view_skips_disabled() {
        struct Map {
            a: Binding,
            b: Binding,
        }
        impl KeyMap for Map {
            fn short_help(&self) -> Vec<&Binding> {
                vec![&self.a, &self.b]
            }
        }

        let map = Map {
            a: new_binding(vec![with_keys_str(&["a"]), with_help("a", "alpha")]),
            b: new_binding(vec![
                with_keys_str(&["b"]),
                with_help("b", "beta"),
                with_disabled(),
            ]),
        };
        assert_eq!(short_help_view(&map), "a alpha");
    }
}
