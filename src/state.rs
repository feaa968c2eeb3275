//! Timer state and the pure transition function that drives it.
//!
//! The state machine knows nothing about ticking, keys or notifications. It is
//! a plain mapping from `(TimerState, Action)` to a new `TimerState`, which
//! makes every rule of the pomodoro cycle testable without a runtime:
//!
//! ```rust
//! use pomodoro_widget::state::{transition, Action, SessionType, TimerState};
//!
//! let state = TimerState::new();
//! assert_eq!(state.minutes(), 25);
//! assert_eq!(state.session(), SessionType::Focus);
//!
//! let running = transition(state, Action::Toggle);
//! assert!(running.is_running());
//!
//! let ticked = transition(running, Action::DecrementSecond);
//! assert_eq!((ticked.minutes(), ticked.seconds()), (25, 59));
//! ```
//!
//! Note that a borrow only rolls the seconds over; the orchestrator emits the
//! matching [`Action::DecrementMinute`] itself, exactly once per borrow.

use std::fmt;

/// Length of a focus session in minutes.
pub const FOCUS_MINUTES: u32 = 25;

/// Length of the rest that follows focus cycles 1 to 3.
pub const SHORT_REST_MINUTES: u32 = 5;

/// Length of the rest that follows the last focus cycle of a super-cycle.
pub const LONG_REST_MINUTES: u32 = 15;

/// Number of focus/rest pairs in one super-cycle.
pub const CYCLES_PER_SUPER_CYCLE: u8 = 4;

/// Kind of session the countdown is currently measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SessionType {
    /// The work interval.
    #[default]
    Focus,
    /// The break interval, short or long depending on the cycle.
    Rest,
}

impl SessionType {
    /// Human readable label used in titles and help text.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Focus => "focus",
            SessionType::Rest => "rest",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every state change the timer understands.
///
/// The set is closed: there is no catch-all arm in [`transition`], so adding a
/// variant forces every consumer to decide what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Flip between running and paused.
    Toggle,
    /// Force the countdown to run.
    Start,
    /// Force the countdown to pause.
    Stop,
    /// Count one second down, borrowing 59 seconds when the seconds hit zero.
    DecrementSecond,
    /// Count one minute down. Issued only alongside a seconds borrow.
    DecrementMinute,
    /// Reset the clock to a fresh, paused focus session.
    EnterFocus,
    /// Reset the clock to a fresh, paused rest session.
    EnterRest,
}

/// Snapshot of the countdown.
///
/// Values are only ever changed through [`transition`]; the accessors are
/// read-only so a display can borrow the state without being able to
/// corrupt it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerState {
    minutes: u32,
    seconds: u32,
    running: bool,
    session: SessionType,
    focus_cycle: u8,
}

impl TimerState {
    /// The canonical mount state: `25:00`, paused, focus, cycle 1.
    pub fn new() -> Self {
        Self {
            minutes: FOCUS_MINUTES,
            seconds: 0,
            running: false,
            session: SessionType::Focus,
            focus_cycle: 1,
        }
    }

    /// Builds a state from raw values, clamping them into range.
    ///
    /// Seconds are capped at 59 and the focus cycle is kept within
    /// `1..=4`. Useful for restoring a display or setting up a scenario.
    pub fn with_values(
        minutes: u32,
        seconds: u32,
        running: bool,
        session: SessionType,
        focus_cycle: u8,
    ) -> Self {
        Self {
            minutes,
            seconds: seconds.min(59),
            running,
            session,
            focus_cycle: focus_cycle.clamp(1, CYCLES_PER_SUPER_CYCLE),
        }
    }

    /// Whole minutes left in the session.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Seconds left past the whole minutes, always in `0..=59`.
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Whether the countdown is advancing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current session kind.
    pub fn session(&self) -> SessionType {
        self.session
    }

    /// Position within the super-cycle, in `1..=4`.
    pub fn focus_cycle(&self) -> u8 {
        self.focus_cycle
    }

    /// True once the countdown has reached `00:00`.
    ///
    /// This is the only value at which a tick rolls over into the next
    /// session instead of decrementing.
    pub fn is_at_boundary(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    /// Rest length granted when leaving the focus cycle this state is in.
    pub fn rest_minutes(&self) -> u32 {
        if self.focus_cycle == CYCLES_PER_SUPER_CYCLE {
            LONG_REST_MINUTES
        } else {
            SHORT_REST_MINUTES
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies one action to a state and returns the resulting state.
///
/// Deterministic and side-effect free. Actions used outside their intended
/// precondition never fail: decrements on a paused timer leave it unchanged,
/// and the session resets can be applied from either session.
///
/// Cycle counting only moves when a rest is left for focus, so a full
/// focus+rest pair counts once. The rest length is decided at the moment
/// rest is entered, from the cycle that just finished.
pub fn transition(state: TimerState, action: Action) -> TimerState {
    match action {
        Action::Toggle => TimerState {
            running: !state.running,
            ..state
        },
        Action::Start => TimerState {
            running: true,
            ..state
        },
        Action::Stop => TimerState {
            running: false,
            ..state
        },
        Action::DecrementSecond if state.running => TimerState {
            seconds: if state.seconds == 0 {
                59
            } else {
                state.seconds - 1
            },
            ..state
        },
        Action::DecrementMinute if state.running => TimerState {
            minutes: state.minutes.saturating_sub(1),
            ..state
        },
        Action::DecrementSecond | Action::DecrementMinute => state,
        Action::EnterFocus => {
            // Only a rest that ran out completes a focus+rest pair
            let completed = state.session == SessionType::Rest && state.is_at_boundary();
            let focus_cycle = if !completed {
                state.focus_cycle
            } else if state.focus_cycle >= CYCLES_PER_SUPER_CYCLE {
                1
            } else {
                state.focus_cycle + 1
            };
            TimerState {
                minutes: FOCUS_MINUTES,
                seconds: 0,
                running: false,
                session: SessionType::Focus,
                focus_cycle,
            }
        }
        Action::EnterRest => TimerState {
            minutes: state.rest_minutes(),
            seconds: 0,
            running: false,
            session: SessionType::Rest,
            focus_cycle: state.focus_cycle,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [Action; 7] = [
        Action::Toggle,
        Action::Start,
        Action::Stop,
        Action::DecrementSecond,
        Action::DecrementMinute,
        Action::EnterFocus,
        Action::EnterRest,
    ];

    fn sample_states() -> Vec<TimerState> {
        let mut states = Vec::new();
        for session in [SessionType::Focus, SessionType::Rest] {
            for running in [false, true] {
                for cycle in 1..=CYCLES_PER_SUPER_CYCLE {
                    for (m, s) in [(0, 0), (0, 1), (1, 0), (5, 30), (25, 0), (14, 59)] {
                        states.push(TimerState::with_values(m, s, running, session, cycle));
                    }
                }
            }
        }
        states
    }

    #[test]
    fn test_initial_state() {
        let state = TimerState::new();
        assert_eq!(state.minutes(), 25);
        assert_eq!(state.seconds(), 0);
        assert!(!state.is_running());
        assert_eq!(state.session(), SessionType::Focus);
        assert_eq!(state.focus_cycle(), 1);
        assert_eq!(state, TimerState::default());
    }

    #[test]
    fn test_with_values_clamps() {
        let state = TimerState::with_values(3, 75, true, SessionType::Rest, 9);
        assert_eq!(state.seconds(), 59);
        assert_eq!(state.focus_cycle(), 4);

        let state = TimerState::with_values(3, 0, true, SessionType::Rest, 0);
        assert_eq!(state.focus_cycle(), 1);
    }

    #[test]
    fn test_toggle_is_an_involution() {
        for state in sample_states() {
            let twice = transition(transition(state, Action::Toggle), Action::Toggle);
            assert_eq!(twice, state);
            assert_ne!(
                transition(state, Action::Toggle).is_running(),
                state.is_running()
            );
        }
    }

    #[test]
    fn test_start_and_stop_set_running() {
        for state in sample_states() {
            assert!(transition(state, Action::Start).is_running());
            assert!(!transition(state, Action::Stop).is_running());
        }
    }

    #[test]
    fn test_decrement_second_borrows_at_zero() {
        let state = TimerState::with_values(3, 0, true, SessionType::Focus, 1);
        let next = transition(state, Action::DecrementSecond);
        assert_eq!(next.seconds(), 59);
        // The minute is left to an explicit DecrementMinute
        assert_eq!(next.minutes(), 3);

        let state = TimerState::with_values(3, 12, true, SessionType::Focus, 1);
        assert_eq!(transition(state, Action::DecrementSecond).seconds(), 11);
    }

    #[test]
    fn test_decrements_ignored_while_paused() {
        let state = TimerState::with_values(3, 12, false, SessionType::Focus, 1);
        assert_eq!(transition(state, Action::DecrementSecond), state);
        assert_eq!(transition(state, Action::DecrementMinute), state);
    }

    #[test]
    fn test_decrement_minute_never_underflows() {
        let state = TimerState::with_values(0, 10, true, SessionType::Rest, 2);
        assert_eq!(transition(state, Action::DecrementMinute).minutes(), 0);
    }

    #[test]
    fn test_full_countdown_reaches_zero() {
        for m in 1..=25u32 {
            let mut state = TimerState::with_values(m, 0, true, SessionType::Focus, 1);
            let mut seconds = 0;
            let mut minutes = 0;
            while !state.is_at_boundary() {
                if state.seconds() == 0 {
                    state = transition(state, Action::DecrementMinute);
                    minutes += 1;
                }
                state = transition(state, Action::DecrementSecond);
                seconds += 1;
                assert!(seconds <= m * 60, "countdown overshot for {m} minutes");
            }
            assert_eq!(seconds, m * 60);
            assert_eq!(minutes, m);
        }
    }

    #[test]
    fn test_enter_rest_short_and_long() {
        for cycle in 1..=3 {
            let state = TimerState::with_values(0, 0, true, SessionType::Focus, cycle);
            let rest = transition(state, Action::EnterRest);
            assert_eq!(
                rest,
                TimerState::with_values(5, 0, false, SessionType::Rest, cycle)
            );
        }

        let state = TimerState::with_values(0, 0, true, SessionType::Focus, 4);
        let rest = transition(state, Action::EnterRest);
        assert_eq!(
            rest,
            TimerState::with_values(15, 0, false, SessionType::Rest, 4)
        );
    }

    #[test]
    fn test_enter_focus_from_rest_advances_cycle() {
        let state = TimerState::with_values(0, 0, true, SessionType::Rest, 2);
        assert_eq!(
            transition(state, Action::EnterFocus),
            TimerState::with_values(25, 0, false, SessionType::Focus, 3)
        );

        let state = TimerState::with_values(0, 0, true, SessionType::Rest, 4);
        assert_eq!(
            transition(state, Action::EnterFocus),
            TimerState::with_values(25, 0, false, SessionType::Focus, 1)
        );
    }

    #[test]
    fn test_enter_focus_mid_rest_keeps_cycle() {
        let state = TimerState::with_values(3, 12, false, SessionType::Rest, 2);
        assert_eq!(
            transition(state, Action::EnterFocus),
            TimerState::with_values(25, 0, false, SessionType::Focus, 2)
        );

        let state = TimerState::with_values(0, 1, true, SessionType::Rest, 4);
        assert_eq!(
            transition(state, Action::EnterFocus),
            TimerState::with_values(25, 0, false, SessionType::Focus, 4)
        );
    }

    #[test]
    fn test_enter_focus_from_focus_is_a_reset() {
        for (m, s) in [(0, 0), (3, 17), (24, 59), (25, 0)] {
            let state = TimerState::with_values(m, s, false, SessionType::Focus, 2);
            let reset = transition(state, Action::EnterFocus);
            assert_eq!(
                reset,
                TimerState::with_values(25, 0, false, SessionType::Focus, 2)
            );
            // Applying it again changes nothing
            assert_eq!(transition(reset, Action::EnterFocus), reset);
        }
    }

    #[test]
    fn test_focus_cycle_does_not_move_on_rest_entry() {
        let state = TimerState::with_values(0, 0, true, SessionType::Focus, 3);
        let rest = transition(state, Action::EnterRest);
        assert_eq!(rest.focus_cycle(), 3);
    }

    #[test]
    fn test_transition_is_deterministic() {
        for state in sample_states() {
            for action in ALL_ACTIONS {
                assert_eq!(transition(state, action), transition(state, action));
            }
        }
    }

    #[test]
    fn test_seconds_stay_in_range() {
        for state in sample_states() {
            for action in ALL_ACTIONS {
                let next = transition(state, action);
                assert!(next.seconds() <= 59);
                assert!((1..=4).contains(&next.focus_cycle()));
            }
        }
    }

    #[test]
    fn test_full_super_cycle() {
        let mut state = TimerState::new();
        let mut rests = Vec::new();
        for _ in 0..8 {
            state = TimerState::with_values(
                0,
                0,
                true,
                state.session(),
                state.focus_cycle(),
            );
            state = match state.session() {
                SessionType::Focus => {
                    let rest = transition(state, Action::EnterRest);
                    rests.push(rest.minutes());
                    rest
                }
                SessionType::Rest => transition(state, Action::EnterFocus),
            };
        }
        assert_eq!(rests, vec![5, 5, 5, 15]);
        assert_eq!(state.focus_cycle(), 1);
        assert_eq!(state.session(), SessionType::Focus);
    }

    #[test]
    fn test_session_labels() {
        assert_eq!(SessionType::Focus.to_string(), "focus");
        assert_eq!(SessionType::Rest.label(), "rest");
    }
}
