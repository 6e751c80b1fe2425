//! Connection parameters for one session.
//!
//! [`Config`] carries what the page knows when the user clicks "connect":
//! who is logging in, with which password, and which proxy (gateway) the
//! engine should dial.  Everything else the engine's builder accepts
//! (destination, server domain, auth token) is left empty by the adapter.

use std::fmt;

use rdp_input_core::DesktopSize;

/// Parameters for [`SessionAdapter::connect`](crate::application::SessionAdapter::connect).
///
/// # Example
///
/// ```rust
/// use rdp_input_bridge::domain::Config;
///
/// let cfg = Config::new("alice", "x", "wss://host/rdpproxy/");
/// assert_eq!(cfg.username, "alice");
/// assert!(cfg.desktop_size.is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub username: String,
    pub password: String,
    /// WebSocket URL of the gateway that relays the session.
    pub proxy_address: String,
    /// Requested desktop size; `None` lets the engine negotiate one.
    pub desktop_size: Option<DesktopSize>,
}

impl Config {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        proxy_address: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            proxy_address: proxy_address.into(),
            desktop_size: None,
        }
    }

    pub fn with_desktop_size(mut self, desktop_size: Option<DesktopSize>) -> Self {
        self.desktop_size = desktop_size;
        self
    }
}

// The password never reaches a log line through `{:?}`.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("proxy_address", &self.proxy_address)
            .field("desktop_size", &self.desktop_size)
            .finish()
    }
}
