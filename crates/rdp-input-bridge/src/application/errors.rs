//! Adapter error type and the reporting sink.

use rdp_input_core::{InputError, SessionError};
use thiserror::Error;

/// Anything that can go wrong inside the adapter.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The session engine rejected a call or failed to connect.
    #[error("session engine error: {0}")]
    Engine(#[from] SessionError),

    /// Browser input could not be turned into a device event.
    ///
    /// Produced by `?` on [`UnicodeScalar`](rdp_input_core::UnicodeScalar)
    /// construction in engine bindings that build events from page text.  The
    /// keyboard path does not raise it: a multi-scalar `key` falls back to the
    /// scancode of `code` instead.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
}

/// Receives every error the adapter does not return to its caller.
///
/// Engine failures during input forwarding, resize, clipboard and shutdown
/// land here instead of propagating into the browser's event handlers.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &BridgeError);
}

/// Formats an error for display to the user.
///
/// Engine errors show their kind and the engine's trace on separate lines:
///
/// ```text
/// Connection Error:
/// LogonFailure
/// bad credentials at step 3
/// ```
///
/// Other errors show their message.
pub fn render_error_message(error: &BridgeError) -> String {
    match error {
        BridgeError::Engine(session_error) => format!(
            "Connection Error:\n{}\n{}",
            session_error.kind(),
            session_error.backtrace()
        ),
        other => format!("Connection Error:\n{other}"),
    }
}
