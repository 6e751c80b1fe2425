//! The seam between the adapter and the remote-desktop session engine.
//!
//! The engine (protocol stack, graphics decoder, gateway transport) lives
//! outside this crate.  The adapter only needs:
//!
//! - a [`SessionConnector`] that turns a [`SessionRequest`] into a live
//!   session, and
//! - a [`RemoteSession`] that accepts input, resize and clipboard calls and
//!   can be run to completion.
//!
//! The adapter also hands the engine a [`RenderSurface`] to draw on and a set
//! of callbacks (cursor style, clipboard, canvas resize) through the request.
//!
//! Production code plugs in the real engine; the replay binary and the tests
//! use [`LoopbackConnector`](crate::infrastructure::loopback::LoopbackConnector).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use rdp_input_core::{
    ClipboardData, DesktopSize, Extension, InputTransaction, LockKeyState, ResizeRequest,
    SessionError, SessionTerminationInfo,
};

use crate::domain::{ClientRect, CursorStyle};

/// Invoked by the engine whenever the remote pointer shape changes.
pub type CursorStyleCallback = Arc<dyn Fn(CursorStyle) + Send + Sync>;

/// Invoked by the engine when the remote clipboard has new content.
pub type RemoteClipboardChangedCallback = Arc<dyn Fn(ClipboardData) + Send + Sync>;

/// Invoked by the engine when it wants the page to push the local clipboard.
pub type ForceClipboardUpdateCallback = Arc<dyn Fn() + Send + Sync>;

/// Invoked by the engine after it resized the drawing surface itself.
pub type CanvasResizedCallback = Arc<dyn Fn(DesktopSize) + Send + Sync>;

// ── Render surface ────────────────────────────────────────────────────────────

/// The canvas the remote desktop is drawn on.
///
/// The adapter reads its geometry to scale pointer coordinates, resizes it
/// when the desktop size changes, focuses it on mouse enter, and sets its
/// CSS cursor.
pub trait RenderSurface: Send + Sync {
    /// Backing-store size in pixels (`canvas.width` / `canvas.height`).
    fn pixel_size(&self) -> (u32, u32);

    fn set_pixel_size(&self, width: u32, height: u32);

    /// Rendered CSS box (`canvas.getBoundingClientRect()`).
    fn client_rect(&self) -> ClientRect;

    fn focus(&self);

    /// Sets the `cursor` CSS property.
    fn set_cursor(&self, css: &str);

    /// Shows a short status or error text to the user.
    fn show_status_text(&self, text: &str);
}

// ── Session request / builder ────────────────────────────────────────────────

/// Everything the engine needs to open a session.
///
/// Built with [`SessionBuilder`]; string fields default to empty.
#[derive(Clone, Default)]
pub struct SessionRequest {
    pub username: String,
    pub destination: String,
    pub server_domain: String,
    pub password: String,
    pub proxy_address: String,
    pub auth_token: String,
    pub desktop_size: Option<DesktopSize>,
    pub render_surface: Option<Arc<dyn RenderSurface>>,
    pub cursor_style_callback: Option<CursorStyleCallback>,
    pub remote_clipboard_changed_callback: Option<RemoteClipboardChangedCallback>,
    pub force_clipboard_update_callback: Option<ForceClipboardUpdateCallback>,
    pub canvas_resized_callback: Option<CanvasResizedCallback>,
    pub extensions: Vec<Extension>,
}

impl fmt::Debug for SessionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRequest")
            .field("username", &self.username)
            .field("destination", &self.destination)
            .field("server_domain", &self.server_domain)
            .field("password", &"<redacted>")
            .field("proxy_address", &self.proxy_address)
            .field("auth_token", &"<redacted>")
            .field("desktop_size", &self.desktop_size)
            .field("render_surface", &self.render_surface.is_some())
            .field("cursor_style_callback", &self.cursor_style_callback.is_some())
            .field(
                "remote_clipboard_changed_callback",
                &self.remote_clipboard_changed_callback.is_some(),
            )
            .field(
                "force_clipboard_update_callback",
                &self.force_clipboard_update_callback.is_some(),
            )
            .field("canvas_resized_callback", &self.canvas_resized_callback.is_some())
            .field("extensions", &self.extensions)
            .finish()
    }
}

/// Chainable builder for a [`SessionRequest`], terminated by
/// [`connect`](SessionBuilder::connect).
///
/// # Example
///
/// ```rust
/// use rdp_input_bridge::application::SessionBuilder;
///
/// let request = SessionBuilder::new()
///     .username("alice")
///     .password("x")
///     .proxy_address("wss://host/rdpproxy/")
///     .build();
/// assert_eq!(request.username, "alice");
/// assert_eq!(request.destination, "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    request: SessionRequest,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.request.username = username.into();
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.request.destination = destination.into();
        self
    }

    pub fn server_domain(mut self, server_domain: impl Into<String>) -> Self {
        self.request.server_domain = server_domain.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.request.password = password.into();
        self
    }

    pub fn proxy_address(mut self, proxy_address: impl Into<String>) -> Self {
        self.request.proxy_address = proxy_address.into();
        self
    }

    pub fn auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.request.auth_token = auth_token.into();
        self
    }

    pub fn desktop_size(mut self, desktop_size: DesktopSize) -> Self {
        self.request.desktop_size = Some(desktop_size);
        self
    }

    pub fn render_surface(mut self, surface: Arc<dyn RenderSurface>) -> Self {
        self.request.render_surface = Some(surface);
        self
    }

    pub fn cursor_style_callback(mut self, callback: CursorStyleCallback) -> Self {
        self.request.cursor_style_callback = Some(callback);
        self
    }

    pub fn remote_clipboard_changed_callback(
        mut self,
        callback: RemoteClipboardChangedCallback,
    ) -> Self {
        self.request.remote_clipboard_changed_callback = Some(callback);
        self
    }

    pub fn force_clipboard_update_callback(mut self, callback: ForceClipboardUpdateCallback) -> Self {
        self.request.force_clipboard_update_callback = Some(callback);
        self
    }

    pub fn canvas_resized_callback(mut self, callback: CanvasResizedCallback) -> Self {
        self.request.canvas_resized_callback = Some(callback);
        self
    }

    pub fn extension(mut self, extension: Extension) -> Self {
        self.request.extensions.push(extension);
        self
    }

    pub fn build(self) -> SessionRequest {
        self.request
    }

    /// Hands the finished request to `connector`.
    pub async fn connect(
        self,
        connector: &dyn SessionConnector,
    ) -> Result<Arc<dyn RemoteSession>, SessionError> {
        connector.connect(self.build()).await
    }
}

// ── Engine traits ─────────────────────────────────────────────────────────────

/// Opens sessions.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    /// Performs the connection sequence and returns a session ready to run.
    async fn connect(&self, request: SessionRequest) -> Result<Arc<dyn RemoteSession>, SessionError>;
}

/// A connected session.
///
/// All methods take `&self`; implementations synchronise internally.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Drives the session until it terminates (server logoff, shutdown, or a
    /// fatal error).
    async fn run(&self) -> Result<SessionTerminationInfo, SessionError>;

    /// Desktop size agreed during connection.
    fn desktop_size(&self) -> DesktopSize;

    /// Applies every event of `transaction`, in order, as one unit.
    fn apply_inputs(&self, transaction: InputTransaction) -> Result<(), SessionError>;

    /// Releases every key and button the engine believes is held.
    fn release_all_inputs(&self) -> Result<(), SessionError>;

    fn synchronize_lock_keys(&self, state: LockKeyState) -> Result<(), SessionError>;

    /// Asks the session to end; [`run`](RemoteSession::run) then returns.
    fn shutdown(&self) -> Result<(), SessionError>;

    /// Sends local clipboard content to the remote side.
    async fn on_clipboard_paste(&self, data: ClipboardData) -> Result<(), SessionError>;

    fn resize(&self, request: ResizeRequest) -> Result<(), SessionError>;

    /// Whether Unicode key events are honoured while shortcut modifiers are held.
    fn supports_unicode_keyboard_shortcuts(&self) -> Result<bool, SessionError>;

    /// Calls an engine-specific extension and returns its result.
    fn invoke_extension(&self, extension: Extension) -> Result<serde_json::Value, SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_are_empty() {
        let request = SessionBuilder::new().build();
        assert_eq!(request.username, "");
        assert_eq!(request.destination, "");
        assert_eq!(request.server_domain, "");
        assert_eq!(request.auth_token, "");
        assert!(request.desktop_size.is_none());
        assert!(request.render_surface.is_none());
        assert!(request.extensions.is_empty());
    }

    #[test]
    fn test_builder_sets_every_string_field() {
        let request = SessionBuilder::new()
            .username("alice")
            .destination("dc01")
            .server_domain("corp")
            .password("x")
            .proxy_address("wss://host/rdpproxy/")
            .auth_token("tok")
            .desktop_size(DesktopSize::new(800, 600))
            .extension(Extension::new("display_control", serde_json::json!(true)))
            .build();

        assert_eq!(request.username, "alice");
        assert_eq!(request.destination, "dc01");
        assert_eq!(request.server_domain, "corp");
        assert_eq!(request.password, "x");
        assert_eq!(request.proxy_address, "wss://host/rdpproxy/");
        assert_eq!(request.auth_token, "tok");
        assert_eq!(request.desktop_size, Some(DesktopSize::new(800, 600)));
        assert_eq!(request.extensions.len(), 1);
    }

    #[test]
    fn test_request_debug_redacts_secrets() {
        let request = SessionBuilder::new()
            .password("hunter2")
            .auth_token("secret-token")
            .cursor_style_callback(Arc::new(|_: CursorStyle| {}))
            .build();

        let rendered = format!("{request:?}");

        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("cursor_style_callback: true"));
    }
}
