//! Read-only rendering of the timer.
//!
//! Everything here works from a [`Snapshot`] copied out of the timer state, so
//! rendering can never feed back into the countdown.

use crate::state::{SessionType, TimerState, CYCLES_PER_SUPER_CYCLE};
use lipgloss_extras::lipgloss::{Color, Style};

/// The values a display needs, copied out of a [`TimerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Whole minutes left.
    pub minutes: u32,
    /// Seconds left past the whole minutes.
    pub seconds: u32,
    /// Current session kind.
    pub session: SessionType,
    /// Whether the countdown is advancing.
    pub running: bool,
    /// Position within the super-cycle.
    pub focus_cycle: u8,
}

impl From<&TimerState> for Snapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            minutes: state.minutes(),
            seconds: state.seconds(),
            session: state.session(),
            running: state.is_running(),
            focus_cycle: state.focus_cycle(),
        }
    }
}

impl Snapshot {
    /// Countdown as `MM:SS`.
    pub fn clock(&self) -> String {
        format!("{}:{}", format_number(self.minutes), format_number(self.seconds))
    }

    /// Window title text, e.g. `"24:59 - focus"`.
    pub fn title(&self) -> String {
        format!("{} - {}", self.clock(), self.session.label())
    }

    /// Label for the start/stop control.
    pub fn control_label(&self) -> &'static str {
        if self.running {
            "stop"
        } else {
            "start"
        }
    }

    /// Cycle counter line, e.g. `"focus cycles 2/4"`.
    pub fn cycle_line(&self) -> String {
        format!("focus cycles {}/{}", self.focus_cycle, CYCLES_PER_SUPER_CYCLE)
    }
}

/// Zero-pads a value to two digits.
pub fn format_number(n: u32) -> String {
    format!("{:02}", n)
}

/// Palette used for one session kind.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Style of the big clock.
    pub clock: Style,
    /// Style of secondary text.
    pub text: Style,
    /// Style of the session tab that is active.
    pub active_tab: Style,
    /// Style of the session tab that is inactive.
    pub inactive_tab: Style,
}

/// Styles for both sessions. Focus is dark, rest is light.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Used while focusing.
    pub focus: Palette,
    /// Used while resting.
    pub rest: Palette,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            focus: Palette {
                clock: Style::new()
                    .bold(true)
                    .foreground(Color::from("#F3F4F6"))
                    .background(Color::from("#111827")),
                text: Style::new().foreground(Color::from("#F3F4F6")),
                active_tab: Style::new()
                    .bold(true)
                    .underline(true)
                    .foreground(Color::from("#F25D52")),
                inactive_tab: Style::new().faint(true),
            },
            rest: Palette {
                clock: Style::new()
                    .bold(true)
                    .foreground(Color::from("#111827"))
                    .background(Color::from("#D1D5DB")),
                text: Style::new().foreground(Color::from("#374151")),
                active_tab: Style::new()
                    .bold(true)
                    .underline(true)
                    .foreground(Color::from("#2E8B57")),
                inactive_tab: Style::new().faint(true),
            },
        }
    }
}

impl Styles {
    /// Palette for the given session.
    pub fn palette(&self, session: SessionType) -> &Palette {
        match session {
            SessionType::Focus => &self.focus,
            SessionType::Rest => &self.rest,
        }
    }
}

/// Renders the session tabs, clock and cycle counter.
///
/// The start/stop control and help line are appended by the widget.
pub fn render(snapshot: &Snapshot, styles: &Styles) -> String {
    let palette = styles.palette(snapshot.session);

    let tab = |session: SessionType| {
        let style = if session == snapshot.session {
            &palette.active_tab
        } else {
            &palette.inactive_tab
        };
        style.render(session.label())
    };
    let tabs = format!("{}   {}", tab(SessionType::Focus), tab(SessionType::Rest));
    let clock = palette.clock.render(&format!("  {}  ", snapshot.clock()));
    let cycles = palette.text.render(&snapshot.cycle_line());

    [tabs, String::new(), clock, String::new(), cycles].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipgloss_extras::lipgloss::strip_ansi;

    fn snapshot(minutes: u32, seconds: u32, session: SessionType, running: bool) -> Snapshot {
        Snapshot::from(&TimerState::with_values(minutes, seconds, running, session, 2))
    }

    #[test]
    fn test_format_number_pads() {
        assert_eq!(format_number(0), "00");
        assert_eq!(format_number(7), "07");
        assert_eq!(format_number(25), "25");
        assert_eq!(format_number(120), "120");
    }

    #[test]
    fn test_clock_and_title() {
        let snap = snapshot(4, 5, SessionType::Rest, false);
        assert_eq!(snap.clock(), "04:05");
        assert_eq!(snap.title(), "04:05 - rest");
    }

    #[test]
    fn test_control_label_follows_running() {
        assert_eq!(snapshot(1, 0, SessionType::Focus, true).control_label(), "stop");
        assert_eq!(snapshot(1, 0, SessionType::Focus, false).control_label(), "start");
    }

    #[test]
    fn test_snapshot_copies_state() {
        let state = TimerState::with_values(12, 34, true, SessionType::Rest, 3);
        let snap = Snapshot::from(&state);
        assert_eq!(snap.minutes, 12);
        assert_eq!(snap.seconds, 34);
        assert!(snap.running);
        assert_eq!(snap.session, SessionType::Rest);
        assert_eq!(snap.focus_cycle, 3);
        assert_eq!(snap.cycle_line(), "focus cycles 3/4");
    }

    #[test]
    fn test_render_contains_parts() {
        let out = strip_ansi(&render(
            &snapshot(25, 0, SessionType::Focus, false),
            &Styles::default(),
        ));
        assert!(out.contains("25:00"));
        assert!(out.contains("focus"));
        assert!(out.contains("rest"));
        assert!(out.contains("focus cycles 2/4"));
    }
}
