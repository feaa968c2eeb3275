//! Pomodoro widget: the session orchestrator.
//!
//! The widget couples a [`Ticker`] to the pure [`transition`] function. Every
//! accepted tick applies exactly one step of the countdown or, once the clock
//! reads `00:00`, rolls over into the next session and raises an alert through
//! the [`AlertGateway`]. Each session starts paused, so crossing a boundary
//! also stops the ticker until the user starts the next session.
//!
//! The ticker is re-armed or disarmed on every change of the running flag, no
//! matter where the change came from: a key press, the start/stop button, an
//! [`ActionMsg`] or a session boundary.
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use pomodoro_widget::alert::RecordingGateway;
//! use pomodoro_widget::config::Config;
//! use pomodoro_widget::pomodoro;
//!
//! struct App {
//!     timer: pomodoro::Model<RecordingGateway>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let timer = pomodoro::new(Config::default(), RecordingGateway::new());
//!         let cmd = timer.init();
//!         (Self { timer }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.timer.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.timer.view()
//!     }
//! }
//! ```

use crate::alert::{request_permission, Alert, AlertGateway, Permission, PermissionMsg};
use crate::button;
use crate::config::Config;
use crate::display::{self, Snapshot, Styles};
use crate::key::{self, KeyMap, KeyPress};
use crate::state::{transition, Action, SessionType, TimerState};
use crate::ticker::{self, TickMsg, Ticker};
use crate::Component;
use bubbletea_rs::{batch, tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use std::time::Duration;

/// Message asking a widget to apply an action.
///
/// Built by [`Model::action_msg`] and sent by the [`Model::start`],
/// [`Model::stop`] and [`Model::toggle`] commands.
#[derive(Debug, Clone)]
pub struct ActionMsg {
    /// Identifier of the widget this message targets.
    pub id: i64,
    /// The action to apply.
    pub action: Action,
}

/// Key bindings of the widget.
#[derive(Debug, Clone)]
pub struct PomodoroKeyMap {
    /// Starts or pauses the countdown. Ignored while the start/stop button has
    /// focus, since the button handles its own activation keys.
    pub toggle: key::Binding,
    /// Switches to a fresh focus session. Only enabled while resting.
    pub enter_focus: key::Binding,
    /// Switches to a fresh rest session. Only enabled while focusing.
    pub enter_rest: key::Binding,
    /// Moves keyboard focus onto or off the start/stop button.
    pub cycle_focus: key::Binding,
}

impl PomodoroKeyMap {
    fn new(toggle_key: KeyPress) -> Self {
        Self {
            toggle: key::new_binding(vec![
                key::with_keys(vec![toggle_key]),
                key::with_help(&key_label(toggle_key), "start/stop"),
            ]),
            enter_focus: key::new_binding(vec![
                key::with_keys_str(&["f"]),
                key::with_help("f", "pomodoro"),
                key::with_disabled(),
            ]),
            enter_rest: key::new_binding(vec![
                key::with_keys_str(&["r"]),
                key::with_help("r", "rest"),
            ]),
            cycle_focus: key::new_binding(vec![
                key::with_keys_str(&["tab", "shift+tab"]),
                key::with_help("tab", "focus button"),
            ]),
        }
    }
}

impl Default for PomodoroKeyMap {
    fn default() -> Self {
        Self::new(KeyPress::from(KeyCode::Char(' ')))
    }
}

impl KeyMap for PomodoroKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.toggle,
            &self.enter_focus,
            &self.enter_rest,
            &self.cycle_focus,
        ]
    }
}

fn key_label(press: KeyPress) -> String {
    match press.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

/// Pomodoro timer widget.
///
/// Owns the only copy of the [`TimerState`]. Readers get a shared reference
/// or a [`Snapshot`]; all writes go through [`Model::dispatch`].
#[derive(Debug, Clone)]
pub struct Model<G: AlertGateway> {
    /// Key bindings.
    pub keymap: PomodoroKeyMap,
    /// Clock and tab styles.
    pub styles: Styles,
    state: TimerState,
    ticker: Ticker,
    gateway: G,
    button: button::Model,
    config: Config,
}

/// Creates a widget in the canonical mount state.
///
/// The start/stop button starts out focused, so the activation keys reach it
/// first.
pub fn new<G: AlertGateway>(config: Config, gateway: G) -> Model<G> {
    let mut button = button::Model::new();
    let _ = button.focus();
    let mut model = Model {
        keymap: PomodoroKeyMap::new(KeyPress::from(config.toggle_key)),
        styles: Styles::default(),
        state: TimerState::new(),
        ticker: ticker::new(config.tick_interval),
        gateway,
        button,
        config,
    };
    model.refresh_keymap();
    model
}

impl<G: AlertGateway> Model<G> {
    /// Replaces the timer state, e.g. to restore a display.
    ///
    /// Meant to be called before [`Model::init`]; a running state is picked up
    /// by the tick command that `init` returns.
    pub fn with_state(mut self, state: TimerState) -> Self {
        let was_running = self.state.is_running();
        self.state = state;
        // The first tick command is handed out by init()
        let _ = self.sync_ticker(was_running);
        self.refresh_keymap();
        self
    }

    /// Identifier used to route [`ActionMsg`] values.
    pub fn id(&self) -> i64 {
        self.ticker.id()
    }

    /// Current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Copy of the values a display needs.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    /// The tick source driving the countdown.
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// The alert gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The start/stop button.
    pub fn button(&self) -> &button::Model {
        &self.button
    }

    /// Mutable access to the start/stop button, e.g. to move focus.
    pub fn button_mut(&mut self) -> &mut button::Model {
        &mut self.button
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Commands to run at startup.
    ///
    /// Settles notification permission when it is still pending and, if the
    /// state is already running, schedules the first tick.
    pub fn init(&self) -> Option<Cmd> {
        let mut cmds = Vec::new();
        if self.gateway.permission() == Permission::Pending {
            cmds.push(request_permission(self.config.notifications));
        }
        if let Some(cmd) = self.ticker.schedule() {
            cmds.push(cmd);
        }
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(batch(cmds)),
        }
    }

    /// Command that starts the countdown.
    pub fn start(&self) -> Cmd {
        self.action_cmd(Action::Start)
    }

    /// Command that pauses the countdown.
    pub fn stop(&self) -> Cmd {
        self.action_cmd(Action::Stop)
    }

    /// Command that flips between running and paused.
    pub fn toggle(&self) -> Cmd {
        self.action_cmd(Action::Toggle)
    }

    /// Message that applies `action` to this widget when routed back through
    /// [`Model::update`].
    pub fn action_msg(&self, action: Action) -> ActionMsg {
        ActionMsg {
            id: self.id(),
            action,
        }
    }

    fn action_cmd(&self, action: Action) -> Cmd {
        let msg = self.action_msg(action);
        bubbletea_tick(Duration::from_nanos(1), move |_| Box::new(msg.clone()) as Msg)
    }

    /// Applies `action` and keeps the ticker in step with the running flag.
    ///
    /// Returns the first tick command when the action started the countdown.
    pub fn dispatch(&mut self, action: Action) -> Option<Cmd> {
        let was_running = self.state.is_running();
        self.state = transition(self.state, action);
        tracing::trace!(?action, state = ?self.state, "dispatched");
        self.refresh_keymap();
        self.sync_ticker(was_running)
    }

    /// Changes the tick cadence. A running countdown continues at the new rate.
    pub fn set_tick_interval(&mut self, interval: Duration) -> Option<Cmd> {
        let interval = interval.max(Duration::from_millis(1));
        self.config.tick_interval = interval;
        self.ticker.set_interval(interval)
    }

    fn sync_ticker(&mut self, was_running: bool) -> Option<Cmd> {
        let running = self.state.is_running();
        if running == was_running && running == self.ticker.is_armed() {
            return None;
        }
        let interval = running.then_some(self.config.tick_interval);
        self.ticker.configure(interval)
    }

    fn refresh_keymap(&mut self) {
        let resting = self.state.session() == SessionType::Rest;
        self.keymap.enter_focus.set_enabled(resting);
        self.keymap.enter_rest.set_enabled(!resting);
    }

    /// Advances the countdown by one tick.
    ///
    /// At `00:00` the session flips instead of decrementing, and the alert
    /// that was raised is returned. Otherwise one second is removed, borrowing
    /// a minute when the seconds are at zero. Does nothing while paused.
    pub fn on_tick(&mut self) -> Option<Alert> {
        if !self.state.is_running() {
            return None;
        }
        if self.state.is_at_boundary() {
            let from = self.state.session();
            let (action, alert) = match from {
                SessionType::Rest => (Action::EnterFocus, Alert::RestOver),
                SessionType::Focus => (Action::EnterRest, Alert::WorkOver),
            };
            self.dispatch_paused(action);
            tracing::info!(
                from = %from,
                to = %self.state.session(),
                minutes = self.state.minutes(),
                focus_cycle = self.state.focus_cycle(),
                "session boundary"
            );
            self.raise(alert);
            return Some(alert);
        }

        if self.state.seconds() == 0 {
            self.dispatch_paused(Action::DecrementMinute);
        }
        self.dispatch_paused(Action::DecrementSecond);
        None
    }

    // For actions that never start the countdown, so there is no tick
    // command to hand back.
    fn dispatch_paused(&mut self, action: Action) {
        let cmd = self.dispatch(action);
        debug_assert!(cmd.is_none(), "{:?} started the countdown", action);
    }

    fn raise(&mut self, alert: Alert) {
        if let Err(err) = self.gateway.notify(alert.message()) {
            tracing::warn!(error = %err, ?alert, "alert delivery failed");
        }
    }

    /// Routes a message to the ticker, the permission state, the button or
    /// the key bindings.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if !self.ticker.accept(tick_msg) {
                return None;
            }
            self.on_tick();
            return self.ticker.schedule();
        }

        if let Some(permission_msg) = msg.downcast_ref::<PermissionMsg>() {
            tracing::info!(permission = %permission_msg.permission, "notification permission resolved");
            self.gateway.set_permission(permission_msg.permission);
            return None;
        }

        if let Some(action_msg) = msg.downcast_ref::<ActionMsg>() {
            if action_msg.id != self.id() {
                return None;
            }
            return self.dispatch(action_msg.action);
        }

        if self.button.update(&msg) {
            return self.dispatch(Action::Toggle);
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.cycle_focus.matches(key_msg) {
                if self.button.focused() {
                    self.button.blur();
                    return None;
                }
                return self.button.focus();
            }
            if self.keymap.toggle.matches(key_msg) {
                if self.button.focused() {
                    return None;
                }
                return self.dispatch(Action::Toggle);
            }
            if self.keymap.enter_focus.matches(key_msg) {
                return self.dispatch(Action::EnterFocus);
            }
            if self.keymap.enter_rest.matches(key_msg) {
                return self.dispatch(Action::EnterRest);
            }
        }

        None
    }

    /// Window title text.
    pub fn title(&self) -> String {
        self.snapshot().title()
    }

    /// Renders the whole widget.
    pub fn view(&self) -> String {
        let snapshot = self.snapshot();
        let body = display::render(&snapshot, &self.styles);
        let control = self.button.view(snapshot.control_label());
        let help = self
            .styles
            .palette(snapshot.session)
            .text
            .clone()
            .faint(true)
            .render(&key::short_help_view(&self.keymap));
        format!("{}\n\n{}\n\n{}", body, control, help)
    }
}

impl<G> BubbleTeaModel for Model<G>
where
    G: AlertGateway + Default + Send + 'static,
{
    fn init() -> (Self, Option<Cmd>) {
        let model = new(Config::default(), G::default());
        let cmd = model.init();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
