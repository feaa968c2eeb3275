//! Error types for the widget's side effects.
//!
//! The timer itself cannot fail. Errors only come from delivering alerts, and
//! the widget logs and drops those so the countdown keeps running.

use thiserror::Error;

/// Failure while talking to the host notification service.
#[derive(Debug, Error)]
pub enum Error {
    /// The notification backend rejected or failed to display an alert.
    #[cfg(feature = "desktop-notifications")]
    #[error("failed to deliver notification: {0}")]
    Notification(#[from] notify_rust::error::Error),

    /// The crate was built without a notification backend.
    #[error("desktop notifications are not supported in this build")]
    Unsupported,
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
