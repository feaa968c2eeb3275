//! Focusable start/stop control.
//!
//! The button owns no timer state. When it has focus it claims the activation
//! keys (Enter and Space) and reports a press, which the owning widget turns
//! into a toggle. The label is chosen by the caller at render time.

use crate::key::{self, KeyMap};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use lipgloss_extras::lipgloss::{Color, Style};

/// Keys that press a focused button.
#[derive(Debug, Clone)]
pub struct ButtonKeyMap {
    /// Presses the button.
    pub activate: key::Binding,
}

impl Default for ButtonKeyMap {
    fn default() -> Self {
        Self {
            activate: key::new_binding(vec![
                key::with_keys_str(&["enter", "space"]),
                key::with_help("enter", "press"),
            ]),
        }
    }
}

impl KeyMap for ButtonKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.activate]
    }
}

/// Styles for the two focus states.
#[derive(Debug, Clone)]
pub struct ButtonStyles {
    /// Style while the button has focus.
    pub focused: Style,
    /// Style otherwise.
    pub blurred: Style,
}

impl Default for ButtonStyles {
    fn default() -> Self {
        Self {
            focused: Style::new()
                .bold(true)
                .foreground(Color::from("#1A1A1A"))
                .background(Color::from("#F25D52"))
                .padding_left(3)
                .padding_right(3),
            blurred: Style::new()
                .foreground(Color::from("#DDDDDD"))
                .background(Color::from("#4A4A4A"))
                .padding_left(3)
                .padding_right(3),
        }
    }
}

/// A push button that only reacts to keys while focused.
#[derive(Debug, Clone)]
pub struct Model {
    /// Activation keys.
    pub keymap: ButtonKeyMap,
    /// Render styles.
    pub styles: ButtonStyles,
    focus: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an unfocused button.
    pub fn new() -> Self {
        Self {
            keymap: ButtonKeyMap::default(),
            styles: ButtonStyles::default(),
            focus: false,
        }
    }

    /// Returns `true` when `msg` presses this button.
    pub fn update(&mut self, msg: &Msg) -> bool {
        if !self.focus {
            return false;
        }
        match msg.downcast_ref::<KeyMsg>() {
            Some(key_msg) => self.keymap.activate.matches(key_msg),
            None => false,
        }
    }

    /// Renders `label` in the style matching the focus state.
    pub fn view(&self, label: &str) -> String {
        if self.focus {
            self.styles.focused.render(label)
        } else {
            self.styles.blurred.render(label)
        }
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
