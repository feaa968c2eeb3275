//! Periodic tick source for Bubble Tea components.
//!
//! A [`Ticker`] emits a [`TickMsg`] every `interval` while it is armed. It has
//! no idea what the ticks mean; the owning component forwards every incoming
//! message to [`Ticker::accept`] and, when it returns `true`, does its work and
//! asks for the next tick with [`Ticker::schedule`].
//!
//! # Re-arming
//!
//! Each tick message carries the ticker's `id` and a `tag`. The tag changes on
//! every arm, disarm and accepted tick, so a message scheduled under an older
//! configuration is rejected when it arrives. Reconfiguring therefore replaces
//! the pending tick instead of stacking a second one on top of it, and a
//! disarmed ticker never fires again even if a tick was already in flight.
//!
//! ```rust
//! use pomodoro_widget::ticker::new;
//! use std::time::Duration;
//!
//! let mut ticker = new(Duration::from_secs(1));
//! assert!(!ticker.is_armed());
//!
//! let _cmd = ticker.arm();
//! let tick = ticker.next_tick_msg();
//! assert!(ticker.accept(&tick));
//!
//! let in_flight = ticker.next_tick_msg();
//! ticker.disarm();
//! assert!(!ticker.accept(&in_flight));
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for ticker instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered once per interval while a ticker is armed.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Identifier of the ticker that scheduled this message.
    pub id: i64,
    // Arming generation the message was scheduled under.
    tag: i64,
}

/// A re-armable periodic tick source.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    armed: bool,
    id: i64,
    tag: i64,
}

/// Creates a disarmed ticker with the given cadence.
pub fn new(interval: Duration) -> Ticker {
    Ticker {
        interval,
        armed: false,
        id: next_id(),
        tag: 0,
    }
}

impl Ticker {
    /// Unique identifier of this ticker.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Cadence used for the next scheduled tick.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether ticks are currently being delivered.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Starts firing and returns the command for the first tick.
    ///
    /// Arming an already armed ticker restarts the interval; the tick that was
    /// pending under the old arming is discarded on arrival.
    pub fn arm(&mut self) -> Cmd {
        self.armed = true;
        self.tag += 1;
        tracing::debug!(id = self.id, tag = self.tag, interval = ?self.interval, "ticker armed");
        self.tick()
    }

    /// Stops firing. Any tick already in flight is rejected by [`accept`].
    ///
    /// [`accept`]: Ticker::accept
    pub fn disarm(&mut self) {
        if self.armed {
            tracing::debug!(id = self.id, tag = self.tag, "ticker disarmed");
        }
        self.armed = false;
        self.tag += 1;
    }

    /// Arms with `Some(interval)` or disarms with `None`.
    ///
    /// Returns the first tick command when the ticker ends up armed.
    pub fn configure(&mut self, interval: Option<Duration>) -> Option<Cmd> {
        match interval {
            Some(interval) => {
                self.interval = interval;
                Some(self.arm())
            }
            None => {
                self.disarm();
                None
            }
        }
    }

    /// Changes the cadence. An armed ticker is re-armed at the new rate.
    pub fn set_interval(&mut self, interval: Duration) -> Option<Cmd> {
        self.interval = interval;
        if self.armed {
            Some(self.arm())
        } else {
            None
        }
    }

    /// Checks whether `msg` is the tick this ticker is waiting for.
    ///
    /// Returns `true` at most once per scheduled tick. Ticks for other tickers,
    /// ticks scheduled before the latest re-arm and ticks arriving after a
    /// disarm all return `false`.
    pub fn accept(&mut self, msg: &TickMsg) -> bool {
        if !self.armed || msg.id != self.id || msg.tag != self.tag {
            return false;
        }
        self.tag += 1;
        true
    }

    /// Command for the next tick, or `None` when disarmed.
    pub fn schedule(&self) -> Option<Cmd> {
        if self.armed {
            Some(self.tick())
        } else {
            None
        }
    }

    /// The message the next scheduled tick will deliver.
    ///
    /// Lets a headless driver or a test advance time without a runtime.
    pub fn next_tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn tick(&self) -> Cmd {
        let msg = self.next_tick_msg();
        bubbletea_tick(self.interval, move |_| Box::new(msg.clone()) as Msg)
    }
}
