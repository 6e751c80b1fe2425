//! SessionAdapter: the single owner of a remote session and the entry point
//! for every browser event.
//!
//! # Responsibilities
//!
//! - Connect through the injected [`SessionConnector`] and publish the
//!   session lifecycle on observable channels.
//! - Translate mouse, wheel and keyboard events into [`InputTransaction`]s
//!   and submit them to the session.
//! - Forward resize, clipboard, lock-key and extension calls.
//! - Apply the engine's cursor style to the render surface.
//!
//! # Guard and forward
//!
//! Every session call is a no-op when no session is active.  An engine error
//! is caught here and handed to the [`ErrorReporter`]; it never propagates to
//! the browser handler that triggered it.

use std::sync::{Arc, Mutex, PoisonError};

use rdp_input_core::{
    ClipboardData, DesktopSize, DeviceEvent, Extension, InputTransaction, LockKeyState,
    ResizeRequest, Scancode, SessionError, SessionTerminationInfo,
};
use tracing::{debug, info, warn};

use crate::application::engine::{
    CursorStyleCallback, ForceClipboardUpdateCallback, RemoteClipboardChangedCallback,
    RemoteSession, RenderSurface, SessionBuilder, SessionConnector,
};
use crate::application::errors::{BridgeError, ErrorReporter};
use crate::application::keyboard::KeyboardTranslator;
use crate::application::observable::Observable;
use crate::application::translate::{mouse_button_event, scale_mouse_position, wheel_event};
use crate::domain::{
    BrowserEvent, Config, CursorStyle, DynamicResizeEvent, EventDisposition, KeyboardEventData,
    MouseEventData, MousePosition, ResizeEvent, WheelEventData,
};

// ── Observable channels ───────────────────────────────────────────────────────

/// Notifications published by the adapter.
#[derive(Clone, Default)]
pub struct SessionChannels {
    /// A session finished connecting.
    pub session_started: Observable<()>,
    /// The remote desktop size is known or changed.
    pub resize: Observable<ResizeEvent>,
    /// The pointer moved (remote desktop pixels).
    pub mouse_position: Observable<MousePosition>,
    /// The session view became visible or hidden.
    pub visibility: Observable<bool>,
    /// The page requested a new remote resolution.
    pub dynamic_resize: Observable<DynamicResizeEvent>,
}

// ── Session handle ────────────────────────────────────────────────────────────

/// Returned by [`SessionAdapter::connect`].
pub struct SessionHandle {
    pub initial_desktop_size: DesktopSize,
    session: Arc<dyn RemoteSession>,
    visibility: Observable<bool>,
}

impl SessionHandle {
    /// Runs the session until it terminates.
    ///
    /// Publishes `visibility = false` when the session ends, whether it ended
    /// cleanly or with an error.
    pub async fn run(self) -> Result<SessionTerminationInfo, BridgeError> {
        info!("session running");
        let result = self.session.run().await;
        self.visibility.publish(&false);
        match &result {
            Ok(info) => info!(reason = info.reason(), "session terminated"),
            Err(e) => warn!(error = %e, "session terminated with an error"),
        }
        result.map_err(BridgeError::from)
    }
}

// ── Clipboard and cursor state ────────────────────────────────────────────────

struct ClipboardOptions {
    enabled: bool,
    /// Page preference only; see `set_enable_auto_clipboard`.
    auto_sync: bool,
    on_remote_changed: Option<RemoteClipboardChangedCallback>,
    on_force_update: Option<ForceClipboardUpdateCallback>,
}

impl Default for ClipboardOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_sync: false,
            on_remote_changed: None,
            on_force_update: None,
        }
    }
}

#[derive(Default)]
struct CursorState {
    /// Last CSS value the engine asked for.
    engine_css: Option<String>,
    override_css: Option<String>,
}

// ── Adapter ───────────────────────────────────────────────────────────────────

/// Bridges browser events to one remote session.
///
/// # Example
///
/// ```rust,no_run
/// # async fn demo() -> Result<(), rdp_input_bridge::application::BridgeError> {
/// use std::sync::Arc;
/// use rdp_input_bridge::application::SessionAdapter;
/// use rdp_input_bridge::domain::Config;
/// use rdp_input_bridge::infrastructure::loopback::LoopbackConnector;
/// use rdp_input_bridge::infrastructure::surface::{HeadlessSurface, SurfaceErrorReporter};
///
/// let surface = Arc::new(HeadlessSurface::default());
/// let reporter = Arc::new(SurfaceErrorReporter::new(surface.clone()));
/// let mut adapter = SessionAdapter::new(Arc::new(LoopbackConnector::default()), surface, reporter);
///
/// let handle = adapter.connect(Config::new("alice", "x", "wss://host/rdpproxy/")).await?;
/// adapter.ctrl_alt_del();
/// adapter.shutdown();
/// handle.run().await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionAdapter {
    connector: Arc<dyn SessionConnector>,
    surface: Arc<dyn RenderSurface>,
    reporter: Arc<dyn ErrorReporter>,
    session: Option<Arc<dyn RemoteSession>>,
    keyboard: KeyboardTranslator,
    channels: SessionChannels,
    focused: bool,
    unicode_shortcuts: Option<bool>,
    clipboard: ClipboardOptions,
    cursor: Arc<Mutex<CursorState>>,
}

impl SessionAdapter {
    pub fn new(
        connector: Arc<dyn SessionConnector>,
        surface: Arc<dyn RenderSurface>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let channels = SessionChannels::default();

        let resize_surface = Arc::clone(&surface);
        channels.resize.subscribe(move |event: &ResizeEvent| {
            resize_surface.set_pixel_size(
                u32::from(event.desktop_size.width),
                u32::from(event.desktop_size.height),
            );
        });

        Self {
            connector,
            surface,
            reporter,
            session: None,
            keyboard: KeyboardTranslator::default(),
            channels,
            focused: false,
            unicode_shortcuts: None,
            clipboard: ClipboardOptions::default(),
            cursor: Arc::new(Mutex::new(CursorState::default())),
        }
    }

    pub fn channels(&self) -> &SessionChannels {
        &self.channels
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Connects a new session.
    ///
    /// An already active session is shut down first.  On success the desktop
    /// size is published on `resize` (which also resizes the surface), then
    /// `session_started` fires.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Engine`] if the engine refuses the connection.
    /// The error is also reported to the sink.
    pub async fn connect(&mut self, config: Config) -> Result<SessionHandle, BridgeError> {
        self.shutdown();

        info!(
            username = %config.username,
            proxy = %config.proxy_address,
            "connecting session"
        );

        let mut builder = SessionBuilder::new()
            .proxy_address(config.proxy_address.as_str())
            .destination("")
            .server_domain("")
            .password(config.password.as_str())
            .auth_token("")
            .username(config.username.as_str())
            .render_surface(Arc::clone(&self.surface))
            .cursor_style_callback(self.cursor_style_callback());

        if self.clipboard.enabled {
            if let Some(callback) = &self.clipboard.on_remote_changed {
                builder = builder.remote_clipboard_changed_callback(Arc::clone(callback));
            }
            if let Some(callback) = &self.clipboard.on_force_update {
                builder = builder.force_clipboard_update_callback(Arc::clone(callback));
            }
        }

        if let Some(size) = config.desktop_size {
            builder = builder.desktop_size(size);
        }

        let session = match builder.connect(self.connector.as_ref()).await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "connection failed");
                let err = BridgeError::from(e);
                self.reporter.report(&err);
                return Err(err);
            }
        };

        let desktop_size = session.desktop_size();
        info!(%desktop_size, "session connected");

        self.session = Some(Arc::clone(&session));
        self.unicode_shortcuts = None;

        self.channels.resize.publish(&ResizeEvent::new(desktop_size));
        self.channels.session_started.publish(&());

        Ok(SessionHandle {
            initial_desktop_size: desktop_size,
            session,
            visibility: self.channels.visibility.clone(),
        })
    }

    /// Ends the active session.  Calling it again, or without a session, does
    /// nothing.
    pub fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            info!("shutting down session");
            if let Err(e) = session.shutdown() {
                self.report(e.into());
            }
        }
    }

    // ── Engine forwarding ─────────────────────────────────────────────────────

    pub fn release_all_inputs(&self) {
        self.forward("release_all_inputs", |s| s.release_all_inputs());
    }

    pub fn synchronize_lock_keys(&self, state: LockKeyState) {
        self.forward("synchronize_lock_keys", |s| s.synchronize_lock_keys(state));
    }

    pub fn invoke_extension(&self, extension: Extension) -> Option<serde_json::Value> {
        self.forward("invoke_extension", |s| s.invoke_extension(extension))
    }

    /// Requests a new remote resolution.
    pub fn resize(&self, width: u32, height: u32, scale_factor: Option<u32>) {
        info!(width, height, ?scale_factor, "resize requested");
        self.channels
            .dynamic_resize
            .publish(&DynamicResizeEvent { width, height });
        let request = ResizeRequest::new(width, height).with_scale_factor(scale_factor);
        self.forward("resize", |s| s.resize(request));
    }

    /// Whether the session accepts Unicode events while shortcut modifiers are
    /// held.  Cached per session; `true` when unknown.
    pub fn supports_unicode_keyboard_shortcuts(&mut self) -> bool {
        if let Some(cached) = self.unicode_shortcuts {
            return cached;
        }
        let Some(session) = &self.session else {
            return true;
        };
        match session.supports_unicode_keyboard_shortcuts() {
            Ok(supported) => {
                self.unicode_shortcuts = Some(supported);
                supported
            }
            Err(e) => {
                self.report(e.into());
                true
            }
        }
    }

    /// Pushes local clipboard content to the remote side.
    pub async fn on_clipboard_changed(&self, data: ClipboardData) {
        let Some(session) = self.session.clone() else {
            return;
        };
        if let Err(e) = session.on_clipboard_paste(data).await {
            self.report(e.into());
        }
    }

    /// Clears the remote clipboard.
    pub async fn on_clipboard_changed_empty(&self) {
        self.on_clipboard_changed(ClipboardData::new()).await;
    }

    // ── Transactions ──────────────────────────────────────────────────────────

    /// Submits `events` as one transaction.  Empty batches are skipped.
    pub fn apply_events(&self, events: impl IntoIterator<Item = DeviceEvent>) {
        let transaction: InputTransaction = events.into_iter().collect();
        if transaction.is_empty() {
            return;
        }
        debug!(events = transaction.len(), "applying input transaction");
        self.forward("apply_inputs", |s| s.apply_inputs(transaction));
    }

    /// Sends Ctrl+Alt+Delete.
    pub fn ctrl_alt_del(&self) {
        self.apply_events([
            DeviceEvent::key_pressed(Scancode::CONTROL_LEFT),
            DeviceEvent::key_pressed(Scancode::ALT_LEFT),
            DeviceEvent::key_pressed(Scancode::DELETE),
            DeviceEvent::key_released(Scancode::CONTROL_LEFT),
            DeviceEvent::key_released(Scancode::ALT_LEFT),
            DeviceEvent::key_released(Scancode::DELETE),
        ]);
    }

    /// Taps the left Windows/Meta key.
    pub fn send_meta(&self) {
        self.apply_events([
            DeviceEvent::key_pressed(Scancode::META_LEFT),
            DeviceEvent::key_released(Scancode::META_LEFT),
        ]);
    }

    // ── Browser event handlers ────────────────────────────────────────────────

    /// Routes a recorded or forwarded browser event to its handler.
    pub fn dispatch(&mut self, event: &BrowserEvent) -> EventDisposition {
        match event {
            BrowserEvent::MouseMove(e) => self.handle_mouse_move(e),
            BrowserEvent::MouseDown(e) => self.handle_mouse_down(e),
            BrowserEvent::MouseUp(e) => self.handle_mouse_up(e),
            BrowserEvent::MouseEnter(e) => self.handle_mouse_enter(e),
            BrowserEvent::MouseLeave(e) => self.handle_mouse_leave(e),
            BrowserEvent::ContextMenu => EventDisposition::PreventDefault,
            BrowserEvent::Wheel(e) => self.handle_wheel(e),
            BrowserEvent::Key(e) => self.handle_key_event(e),
            BrowserEvent::Focus => {
                self.set_focused(true);
                EventDisposition::Propagate
            }
            BrowserEvent::Blur => {
                self.set_focused(false);
                EventDisposition::Propagate
            }
        }
    }

    pub fn handle_mouse_move(&self, event: &MouseEventData) -> EventDisposition {
        let position =
            scale_mouse_position(event, self.surface.client_rect(), self.surface.pixel_size());
        self.update_mouse_position(position);
        EventDisposition::Propagate
    }

    /// Moves the remote pointer to `position` and publishes it.
    pub fn update_mouse_position(&self, position: MousePosition) {
        self.apply_events([DeviceEvent::mouse_move(position.x, position.y)]);
        self.channels.mouse_position.publish(&position);
    }

    pub fn handle_mouse_down(&self, event: &MouseEventData) -> EventDisposition {
        self.apply_events(mouse_button_event(event, true));
        EventDisposition::PreventDefault
    }

    pub fn handle_mouse_up(&self, event: &MouseEventData) -> EventDisposition {
        self.apply_events(mouse_button_event(event, false));
        EventDisposition::PreventDefault
    }

    /// Focuses the surface and resynchronises lock keys, which may have been
    /// toggled while the pointer was elsewhere.
    pub fn handle_mouse_enter(&self, event: &MouseEventData) -> EventDisposition {
        self.surface.focus();
        self.synchronize_lock_keys(event.modifiers.lock_state());
        EventDisposition::Propagate
    }

    /// Releases the button and everything else held; the matching up events
    /// would be delivered outside the canvas.
    pub fn handle_mouse_leave(&self, event: &MouseEventData) -> EventDisposition {
        self.apply_events(mouse_button_event(event, false));
        self.release_all_inputs();
        EventDisposition::Propagate
    }

    pub fn handle_wheel(&self, event: &WheelEventData) -> EventDisposition {
        self.apply_events([wheel_event(event)]);
        EventDisposition::Propagate
    }

    /// Keyboard events are only handled while the page has focus.
    pub fn handle_key_event(&mut self, event: &KeyboardEventData) -> EventDisposition {
        if !self.focused {
            return EventDisposition::Propagate;
        }

        let supports_unicode_shortcuts = self.supports_unicode_keyboard_shortcuts();
        let outcome = self.keyboard.translate(event, supports_unicode_shortcuts);

        if let Some(state) = outcome.lock_sync {
            self.synchronize_lock_keys(state);
        }
        self.apply_events(outcome.events);

        EventDisposition::PreventDefault
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // ── Settings ──────────────────────────────────────────────────────────────

    pub fn set_keyboard_unicode_mode(&mut self, enabled: bool) {
        info!(enabled, "keyboard unicode mode");
        self.keyboard.set_unicode_mode(enabled);
    }

    pub fn keyboard_unicode_mode(&self) -> bool {
        self.keyboard.unicode_mode()
    }

    /// When disabled, no clipboard callbacks are handed to the engine on the
    /// next connect.
    pub fn set_enable_clipboard(&mut self, enabled: bool) {
        self.clipboard.enabled = enabled;
    }

    pub fn clipboard_enabled(&self) -> bool {
        self.clipboard.enabled
    }

    /// Stores the page's automatic clipboard sync preference.  The adapter
    /// does not act on it; the page reads it back through
    /// [`auto_clipboard_enabled`](Self::auto_clipboard_enabled) to decide
    /// whether to push local clipboard changes without a user gesture.
    pub fn set_enable_auto_clipboard(&mut self, enabled: bool) {
        self.clipboard.auto_sync = enabled;
    }

    pub fn auto_clipboard_enabled(&self) -> bool {
        self.clipboard.auto_sync
    }

    pub fn set_on_remote_clipboard_changed(&mut self, callback: RemoteClipboardChangedCallback) {
        self.clipboard.on_remote_changed = Some(callback);
    }

    pub fn set_on_force_clipboard_update(&mut self, callback: ForceClipboardUpdateCallback) {
        self.clipboard.on_force_update = Some(callback);
    }

    /// Forces a CSS cursor regardless of what the engine reports.  `None`
    /// restores the engine's last style.
    pub fn set_cursor_style_override(&self, css: Option<String>) {
        let mut state = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        state.override_css = css;
        let effective = state
            .override_css
            .as_deref()
            .or(state.engine_css.as_deref())
            .unwrap_or("default");
        self.surface.set_cursor(effective);
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn cursor_style_callback(&self) -> CursorStyleCallback {
        let cursor = Arc::clone(&self.cursor);
        let surface = Arc::clone(&self.surface);
        Arc::new(move |style: CursorStyle| {
            let css = style.to_css();
            let mut state = cursor.lock().unwrap_or_else(PoisonError::into_inner);
            if state.override_css.is_none() {
                surface.set_cursor(&css);
            }
            state.engine_css = Some(css);
        })
    }

    fn forward<T>(
        &self,
        operation: &'static str,
        call: impl FnOnce(&dyn RemoteSession) -> Result<T, SessionError>,
    ) -> Option<T> {
        let session = self.session.as_ref()?;
        match call(session.as_ref()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(operation, error = %e, "session call failed");
                self.report(e.into());
                None
            }
        }
    }

    fn report(&self, error: BridgeError) {
        self.reporter.report(&error);
    }
}
