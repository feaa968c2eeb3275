//! Widget configuration.
//!
//! Session lengths are fixed by the pomodoro rules in [`crate::state`]; what
//! can be tuned is how the widget is driven and how it talks to the host.
//!
//! ```rust
//! use pomodoro_widget::config::Config;
//! use crossterm::event::KeyCode;
//! use std::time::Duration;
//!
//! let config = Config::new()
//!     .with_tick_interval(Duration::from_millis(250))
//!     .with_notifications(false)
//!     .with_toggle_key(KeyCode::Char('p'));
//!
//! assert_eq!(config.tick_interval, Duration::from_millis(250));
//! assert!(!config.notifications);
//! ```

use crossterm::event::KeyCode;
use std::time::Duration;

/// Default cadence of the countdown: one tick per second.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Runtime options for [`crate::pomodoro::Model`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Time between ticks. Each tick removes one second from the clock, so a
    /// shorter interval makes the sessions run faster than real time.
    pub tick_interval: Duration,
    /// Whether end-of-session alerts may be requested at all.
    pub notifications: bool,
    /// Global shortcut that toggles the countdown.
    pub toggle_key: KeyCode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            notifications: true,
            toggle_key: KeyCode::Char(' '),
        }
    }
}

impl Config {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick cadence. A zero interval is raised to one millisecond.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Enables or disables end-of-session alerts.
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications = enabled;
        self
    }

    /// Sets the global toggle shortcut.
    pub fn with_toggle_key(mut self, key: KeyCode) -> Self {
        self.toggle_key = key;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert!(config.notifications);
        assert_eq!(config.toggle_key, KeyCode::Char(' '));
        assert_eq!(Config::new(), config);
    }

    #[test]
    fn test_zero_interval_is_raised() {
        let config = Config::new().with_tick_interval(Duration::ZERO);
        assert_eq!(config.tick_interval, Duration::from_millis(1));
    }
}
