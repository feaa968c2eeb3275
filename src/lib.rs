#![warn(missing_docs)]

//! # pomodoro-widget
//!
//! A pomodoro interval timer for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The widget alternates 25 minute focus sessions with rest sessions. Rests
//! last 5 minutes, except after every fourth focus session, which earns a 15
//! minute rest. When a session runs out the widget pauses and raises a desktop
//! alert, if the user allowed it.
//!
//! The crate is split along the lines of the Elm Architecture:
//!
//! - [`state`]: the timer state and a pure `transition(state, action)` function
//! - [`ticker`]: a re-armable periodic tick source
//! - [`pomodoro`]: the widget that ties ticks to transitions and raises alerts
//! - [`alert`]: permission-gated alert delivery
//! - [`display`]: read-only formatting and styling of the state
//! - [`button`] and [`key`]: the start/stop control and key bindings
//!
//! ## Quick Start
//!
//! ```rust
//! use pomodoro_widget::prelude::*;
//!
//! let mut timer = pomodoro_new(Config::default(), RecordingGateway::new());
//! let _cmd = timer.dispatch(Action::Start);
//! assert!(timer.state().is_running());
//! assert!(timer.ticker().is_armed());
//!
//! // Feed the tick the runtime would deliver
//! let tick = timer.ticker().next_tick_msg();
//! timer.update(Box::new(tick));
//! assert_eq!(timer.title(), "24:59 - focus");
//! ```
//!
//! ## Key Bindings
//!
//! | Key | Action |
//! |-----|--------|
//! | `space` | start/stop (the start/stop button handles it while focused) |
//! | `enter` | press the focused start/stop button |
//! | `f` | switch to a fresh focus session while resting |
//! | `r` | switch to a fresh rest session while focusing |
//! | `tab` | move focus onto or off the start/stop button |

pub mod alert;
pub mod button;
pub mod config;
pub mod display;
pub mod error;
pub mod key;
pub mod pomodoro;
pub mod state;
pub mod ticker;

use bubbletea_rs::Cmd;

/// Core trait for components that take keyboard focus.
///
/// A focused component receives the keys it binds; a blurred one ignores
/// them. The pomodoro widget uses this to decide whether the start/stop
/// button or the global shortcut handles a key press.
///
/// ```rust
/// use pomodoro_widget::prelude::*;
///
/// let mut button = Button::new();
/// assert!(!button.focused());
///
/// let _ = button.focus();
/// assert!(button.focused());
///
/// button.blur();
/// assert!(!button.focused());
/// ```
pub trait Component {
    /// Gives the component focus. May return a command, e.g. to start an
    /// animation.
    fn focus(&mut self) -> Option<Cmd>;

    /// Takes focus away from the component.
    fn blur(&mut self);

    /// Whether the component currently has focus.
    fn focused(&self) -> bool;
}

#[cfg(feature = "desktop-notifications")]
pub use alert::DesktopNotifier;
pub use alert::{Alert, AlertGateway, Permission, PermissionMsg, RecordingGateway};
pub use button::Model as Button;
pub use config::Config;
pub use error::{Error, Result};
pub use pomodoro::{new as pomodoro_new, ActionMsg, Model as Pomodoro, PomodoroKeyMap};
pub use state::{transition, Action, SessionType, TimerState};
pub use ticker::{TickMsg, Ticker};

/// Prelude module for convenient imports.
///
/// ```rust
/// use pomodoro_widget::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "desktop-notifications")]
    pub use crate::alert::DesktopNotifier;
    pub use crate::alert::{Alert, AlertGateway, Permission, PermissionMsg, RecordingGateway};
    pub use crate::button::Model as Button;
    pub use crate::config::Config;
    pub use crate::display::Snapshot;
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::pomodoro::{new as pomodoro_new, ActionMsg, Model as Pomodoro};
    pub use crate::state::{transition, Action, SessionType, TimerState};
    pub use crate::ticker::{new as ticker_new, TickMsg, Ticker};
    pub use crate::Component;
}
