//! End-of-session alerts.
//!
//! Delivery goes through an [`AlertGateway`], which owns a tri-state
//! [`Permission`]. Permission starts out [`Permission::Pending`] and is settled
//! later by a [`PermissionMsg`] produced by [`request_permission`], so the
//! widget never waits on the host. Until permission is [`Permission::Granted`]
//! every alert is silently dropped and the countdown carries on unaffected.
//!
//! ```rust
//! use pomodoro_widget::alert::{Alert, AlertGateway, Permission, RecordingGateway};
//!
//! let mut gateway = RecordingGateway::new();
//! gateway.notify(Alert::WorkOver.message()).unwrap();
//! assert!(gateway.delivered().is_empty());
//!
//! gateway.set_permission(Permission::Granted);
//! gateway.notify(Alert::WorkOver.message()).unwrap();
//! assert_eq!(gateway.delivered(), ["your work is over for now!"]);
//! ```

use crate::error::Result;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::fmt;
use std::time::Duration;

/// Title shown on desktop notifications.
pub const DEFAULT_SUMMARY: &str = "Pomodoro";

/// Outcome of asking the host whether alerts may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Permission {
    /// Alerts will be delivered.
    Granted,
    /// The user refused, or the host cannot show alerts.
    Denied,
    /// No answer yet.
    #[default]
    Pending,
}

impl Permission {
    /// Whether alerts may be delivered right now.
    pub fn is_granted(&self) -> bool {
        matches!(self, Permission::Granted)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Permission::Granted => "granted",
            Permission::Denied => "denied",
            Permission::Pending => "pending",
        })
    }
}

/// The two alerts a session boundary can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alert {
    /// A rest session just ended.
    RestOver,
    /// A focus session just ended.
    WorkOver,
}

impl Alert {
    /// Text handed to the gateway.
    pub fn message(&self) -> &'static str {
        match self {
            Alert::RestOver => "your rest is over for now!",
            Alert::WorkOver => "your work is over for now!",
        }
    }
}

/// Message carrying the resolved notification permission.
#[derive(Debug, Clone)]
pub struct PermissionMsg {
    /// The host's answer.
    pub permission: Permission,
}

/// Permission-gated alert delivery.
///
/// Implementors provide raw delivery; the gating lives in [`notify`], which
/// must be what callers use.
///
/// [`notify`]: AlertGateway::notify
pub trait AlertGateway {
    /// Current permission state.
    fn permission(&self) -> Permission;

    /// Records the host's answer to a permission request.
    fn set_permission(&mut self, permission: Permission);

    /// Shows `message` unconditionally.
    fn deliver(&mut self, message: &str) -> Result<()>;

    /// Shows `message` if permission was granted, otherwise does nothing.
    fn notify(&mut self, message: &str) -> Result<()> {
        if !self.permission().is_granted() {
            tracing::debug!(permission = %self.permission(), message, "alert skipped");
            return Ok(());
        }
        self.deliver(message)
    }
}

/// Returns a command that settles notification permission in the background.
///
/// With `enabled` set to `false` the answer is always [`Permission::Denied`].
/// Otherwise the host's notification service is probed; builds without the
/// `desktop-notifications` feature also resolve to denied.
pub fn request_permission(enabled: bool) -> Cmd {
    bubbletea_tick(Duration::from_nanos(1), move |_| {
        Box::new(PermissionMsg {
            permission: resolve_permission(enabled),
        }) as Msg
    })
}

/// Synchronous half of [`request_permission`].
pub fn resolve_permission(enabled: bool) -> Permission {
    if !enabled {
        return Permission::Denied;
    }
    probe_host()
}

#[cfg(all(
    feature = "desktop-notifications",
    unix,
    not(target_os = "macos")
))]
fn probe_host() -> Permission {
    match notify_rust::get_server_information() {
        Ok(info) => {
            tracing::debug!(server = %info.name, "notification server found");
            Permission::Granted
        }
        Err(err) => {
            tracing::warn!(error = %err, "no notification server, alerts disabled");
            Permission::Denied
        }
    }
}

#[cfg(all(
    feature = "desktop-notifications",
    not(all(unix, not(target_os = "macos")))
))]
fn probe_host() -> Permission {
    Permission::Granted
}

#[cfg(not(feature = "desktop-notifications"))]
fn probe_host() -> Permission {
    Permission::Denied
}

/// Gateway backed by the desktop notification service.
#[cfg(feature = "desktop-notifications")]
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    permission: Permission,
    summary: String,
}

#[cfg(feature = "desktop-notifications")]
impl DesktopNotifier {
    /// Creates a notifier with pending permission.
    pub fn new() -> Self {
        Self {
            permission: Permission::Pending,
            summary: DEFAULT_SUMMARY.to_string(),
        }
    }

    /// Sets the notification title.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

#[cfg(feature = "desktop-notifications")]
impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "desktop-notifications")]
impl AlertGateway for DesktopNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn set_permission(&mut self, permission: Permission) {
        self.permission = permission;
    }

    fn deliver(&mut self, message: &str) -> Result<()> {
        let _handle = notify_rust::Notification::new()
            .summary(&self.summary)
            .body(message)
            .show()?;
        Ok(())
    }
}

/// Gateway for builds without a notification backend. Always denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl AlertGateway for Unsupported {
    fn permission(&self) -> Permission {
        Permission::Denied
    }

    fn set_permission(&mut self, _permission: Permission) {}

    fn deliver(&mut self, _message: &str) -> Result<()> {
        Err(crate::error::Error::Unsupported)
    }
}

/// In-memory gateway that keeps every delivered message.
///
/// Handy for headless runs and for asserting on alert behaviour.
#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    permission: Permission,
    delivered: Vec<String>,
}

impl RecordingGateway {
    /// Creates a gateway with pending permission and no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway that already has the given permission.
    pub fn with_permission(permission: Permission) -> Self {
        Self {
            permission,
            delivered: Vec::new(),
        }
    }

    /// Messages that reached [`AlertGateway::deliver`], oldest first.
    pub fn delivered(&self) -> &[String] {
        &self.delivered
    }
}

impl AlertGateway for RecordingGateway {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn set_permission(&mut self, permission: Permission) {
        self.permission = permission;
    }

    fn deliver(&mut self, message: &str) -> Result<()> {
        self.delivered.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_defaults_to_pending() {
        assert_eq!(Permission::default(), Permission::Pending);
        assert!(!Permission::Pending.is_granted());
        assert!(!Permission::Denied.is_granted());
        assert!(Permission::Granted.is_granted());
    }

    #[test]
    fn test_permission_display() {
        assert_eq!(Permission::Granted.to_string(), "granted");
        assert_eq!(Permission::Denied.to_string(), "denied");
        assert_eq!(Permission::Pending.to_string(), "pending");
    }

    #[test]
    fn test_alert_messages() {
        assert_eq!(Alert::RestOver.message(), "your rest is over for now!");
        assert_eq!(Alert::WorkOver.message(), "your work is over for now!");
    }

    #[test]
    fn test_notify_skips_unless_granted() {
        for permission in [Permission::Pending, Permission::Denied] {
            let mut gateway = RecordingGateway::with_permission(permission);
            gateway.notify("hello").unwrap();
            assert!(gateway.delivered().is_empty());
        }

        let mut gateway = RecordingGateway::with_permission(Permission::Granted);
        gateway.notify("hello").unwrap();
        assert_eq!(gateway.delivered(), ["hello"]);
    }

    #[test]
    fn test_permission_can_be_revoked() {
        let mut gateway = RecordingGateway::with_permission(Permission::Granted);
        gateway.notify("first").unwrap();
        gateway.set_permission(Permission::Denied);
        gateway.notify("second").unwrap();
        assert_eq!(gateway.delivered(), ["first"]);
    }

    #[test]
    fn test_disabled_request_resolves_denied() {
        assert_eq!(resolve_permission(false), Permission::Denied);
    }

    #[test]
    fn test_unsupported_gateway_never_delivers() {
        let mut gateway = Unsupported;
        gateway.set_permission(Permission::Granted);
        assert_eq!(gateway.permission(), Permission::Denied);
        assert!(gateway.notify("ignored").is_ok());
        assert!(gateway.deliver("forced").is_err());
    }
}
