//! User-facing notifications raised by the client.
//!
//! [`Notifier`] is the single seam for surfacing session and request
//! failures; a UI plugs in its own implementation.

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A request was rejected with 401 and the stored token was cleared.
    /// The user has to sign in again.
    SessionExpired,
    /// A request failed with a non-2xx status other than 401.
    RequestFailed { status: u16, message: String },
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Logs notices through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::SessionExpired => {
                tracing::warn!("Session expired, please sign in again");
            }
            Notice::RequestFailed { status, message } => {
                tracing::error!(status, %message, "Request failed");
            }
        }
    }
}

/// Discards every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notice: &Notice) {}
}
