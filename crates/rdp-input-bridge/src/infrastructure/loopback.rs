//! An in-process session engine that records every call.
//!
//! `LoopbackConnector` never opens a socket.  Each `connect` creates a
//! [`LoopbackSession`] that stores what the adapter sent (transactions, lock
//! states, resizes, clipboard pastes) and logs it at `debug`.  The replay
//! binary prints the recorded transactions; tests inspect them directly.
//!
//! `run()` completes once `shutdown()` has been called, in either order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rdp_input_core::{
    ClipboardData, DesktopSize, Extension, InputTransaction, LockKeyState, ResizeRequest,
    SessionError, SessionTerminationInfo,
};
use tokio::sync::Notify;
use tracing::{debug, info};

use crate::application::engine::{RemoteSession, SessionConnector, SessionRequest};
use crate::domain::CursorStyle;

/// Desktop size used when the request does not ask for one.
pub const DEFAULT_DESKTOP_SIZE: DesktopSize = DesktopSize {
    width: 1024,
    height: 768,
};

/// Behaviour knobs for sessions created by a [`LoopbackConnector`].
#[derive(Debug, Clone)]
pub struct LoopbackOptions {
    /// Returned by `supports_unicode_keyboard_shortcuts`.
    pub unicode_shortcuts: bool,
    /// When set, `connect` fails with this error.
    pub connect_error: Option<SessionError>,
    /// When `true`, every `apply_inputs` call fails.
    pub fail_inputs: bool,
}

impl Default for LoopbackOptions {
    fn default() -> Self {
        Self {
            unicode_shortcuts: true,
            connect_error: None,
            fail_inputs: false,
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Connector ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct LoopbackConnector {
    options: LoopbackOptions,
    requests: Mutex<Vec<SessionRequest>>,
    sessions: Mutex<Vec<Arc<LoopbackSession>>>,
}

impl LoopbackConnector {
    pub fn new(options: LoopbackOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<SessionRequest> {
        lock(&self.requests).clone()
    }

    /// The most recently created session.
    pub fn last_session(&self) -> Option<Arc<LoopbackSession>> {
        lock(&self.sessions).last().cloned()
    }
}

#[async_trait]
impl SessionConnector for LoopbackConnector {
    async fn connect(
        &self,
        request: SessionRequest,
    ) -> Result<Arc<dyn RemoteSession>, SessionError> {
        info!(?request, "loopback connect");
        lock(&self.requests).push(request.clone());

        if let Some(err) = &self.options.connect_error {
            return Err(err.clone());
        }

        let session = Arc::new(LoopbackSession::new(request, self.options.clone()));
        lock(&self.sessions).push(Arc::clone(&session));
        Ok(session)
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorded {
    transactions: Vec<InputTransaction>,
    lock_states: Vec<LockKeyState>,
    resizes: Vec<ResizeRequest>,
    pastes: Vec<ClipboardData>,
    extensions: Vec<Extension>,
    release_all_count: usize,
    shutdown_count: usize,
}

pub struct LoopbackSession {
    request: SessionRequest,
    options: LoopbackOptions,
    desktop_size: DesktopSize,
    recorded: Mutex<Recorded>,
    terminated: Notify,
}

impl LoopbackSession {
    fn new(request: SessionRequest, options: LoopbackOptions) -> Self {
        let desktop_size = request.desktop_size.unwrap_or(DEFAULT_DESKTOP_SIZE);
        Self {
            request,
            options,
            desktop_size,
            recorded: Mutex::new(Recorded::default()),
            terminated: Notify::new(),
        }
    }

    pub fn transactions(&self) -> Vec<InputTransaction> {
        lock(&self.recorded).transactions.clone()
    }

    pub fn lock_states(&self) -> Vec<LockKeyState> {
        lock(&self.recorded).lock_states.clone()
    }

    pub fn resizes(&self) -> Vec<ResizeRequest> {
        lock(&self.recorded).resizes.clone()
    }

    pub fn pastes(&self) -> Vec<ClipboardData> {
        lock(&self.recorded).pastes.clone()
    }

    pub fn extensions(&self) -> Vec<Extension> {
        lock(&self.recorded).extensions.clone()
    }

    pub fn release_all_count(&self) -> usize {
        lock(&self.recorded).release_all_count
    }

    pub fn shutdown_count(&self) -> usize {
        lock(&self.recorded).shutdown_count
    }

    /// Plays the engine's side of a cursor change.  Returns `false` if the
    /// request carried no cursor callback.
    pub fn emit_cursor_style(&self, style: CursorStyle) -> bool {
        match &self.request.cursor_style_callback {
            Some(callback) => {
                callback(style);
                true
            }
            None => false,
        }
    }

    /// Plays the engine's side of a remote clipboard change.
    pub fn emit_remote_clipboard(&self, data: ClipboardData) -> bool {
        match &self.request.remote_clipboard_changed_callback {
            Some(callback) => {
                callback(data);
                true
            }
            None => false,
        }
    }

    /// Plays the engine asking for the local clipboard.
    pub fn request_clipboard_update(&self) -> bool {
        match &self.request.force_clipboard_update_callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl RemoteSession for LoopbackSession {
    async fn run(&self) -> Result<SessionTerminationInfo, SessionError> {
        self.terminated.notified().await;
        Ok(SessionTerminationInfo::new("session shut down"))
    }

    fn desktop_size(&self) -> DesktopSize {
        self.desktop_size
    }

    fn apply_inputs(&self, transaction: InputTransaction) -> Result<(), SessionError> {
        if self.options.fail_inputs {
            return Err(SessionError::general("loopback: input channel closed"));
        }
        debug!(events = ?transaction.events(), "loopback apply_inputs");
        lock(&self.recorded).transactions.push(transaction);
        Ok(())
    }

    fn release_all_inputs(&self) -> Result<(), SessionError> {
        debug!("loopback release_all_inputs");
        lock(&self.recorded).release_all_count += 1;
        Ok(())
    }

    fn synchronize_lock_keys(&self, state: LockKeyState) -> Result<(), SessionError> {
        debug!(?state, "loopback synchronize_lock_keys");
        lock(&self.recorded).lock_states.push(state);
        Ok(())
    }

    fn shutdown(&self) -> Result<(), SessionError> {
        info!("loopback shutdown");
        lock(&self.recorded).shutdown_count += 1;
        // `notify_one` stores a permit, so a later `run()` still completes.
        self.terminated.notify_one();
        Ok(())
    }

    async fn on_clipboard_paste(&self, data: ClipboardData) -> Result<(), SessionError> {
        debug!(items = data.items().len(), "loopback clipboard paste");
        lock(&self.recorded).pastes.push(data);
        Ok(())
    }

    fn resize(&self, request: ResizeRequest) -> Result<(), SessionError> {
        debug!(?request, "loopback resize");
        lock(&self.recorded).resizes.push(request);
        Ok(())
    }

    fn supports_unicode_keyboard_shortcuts(&self) -> Result<bool, SessionError> {
        Ok(self.options.unicode_shortcuts)
    }

    /// Echoes the extension's value back.
    fn invoke_extension(&self, extension: Extension) -> Result<serde_json::Value, SessionError> {
        let value = extension.value.clone();
        lock(&self.recorded).extensions.push(extension);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SessionBuilder;
    use rdp_input_core::{DeviceEvent, SessionErrorKind};

    #[tokio::test]
    async fn test_connect_uses_requested_desktop_size() {
        let connector = LoopbackConnector::default();

        let session = SessionBuilder::new()
            .desktop_size(DesktopSize::new(1600, 900))
            .connect(&connector)
            .await
            .unwrap();

        assert_eq!(session.desktop_size(), DesktopSize::new(1600, 900));
        assert_eq!(connector.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_connect_default_desktop_size() {
        let connector = LoopbackConnector::default();
        let session = SessionBuilder::new().connect(&connector).await.unwrap();
        assert_eq!(session.desktop_size(), DEFAULT_DESKTOP_SIZE);
    }

    #[tokio::test]
    async fn test_connect_error_is_returned() {
        let connector = LoopbackConnector::new(LoopbackOptions {
            connect_error: Some(SessionError::new(SessionErrorKind::ProxyConnect, "refused")),
            ..Default::default()
        });

        let result = SessionBuilder::new().connect(&connector).await;

        assert_eq!(result.err().map(|e| e.kind()), Some(SessionErrorKind::ProxyConnect));
        assert!(connector.last_session().is_none());
    }

    #[tokio::test]
    async fn test_run_returns_after_shutdown_called_first() {
        let connector = LoopbackConnector::default();
        let session = SessionBuilder::new().connect(&connector).await.unwrap();

        session.shutdown().unwrap();
        let info = session.run().await.unwrap();

        assert_eq!(info.reason(), "session shut down");
    }

    #[test]
    fn test_records_transactions() {
        let session = LoopbackSession::new(SessionRequest::default(), LoopbackOptions::default());
        let tx: InputTransaction = [DeviceEvent::mouse_move(1, 2)].into_iter().collect();

        session.apply_inputs(tx.clone()).unwrap();

        assert_eq!(session.transactions(), vec![tx]);
    }

    #[test]
    fn test_fail_inputs() {
        let session = LoopbackSession::new(
            SessionRequest::default(),
            LoopbackOptions {
                fail_inputs: true,
                ..Default::default()
            },
        );

        assert!(session.apply_inputs(InputTransaction::new()).is_err());
        assert!(session.transactions().is_empty());
    }

    #[test]
    fn test_paste_is_recorded() {
        let session = LoopbackSession::new(SessionRequest::default(), LoopbackOptions::default());

        tokio_test::block_on(session.on_clipboard_paste(ClipboardData::plain_text("x"))).unwrap();

        assert_eq!(session.pastes(), vec![ClipboardData::plain_text("x")]);
    }

    #[test]
    fn test_emit_without_callbacks_returns_false() {
        let session = LoopbackSession::new(SessionRequest::default(), LoopbackOptions::default());
        assert!(!session.emit_cursor_style(CursorStyle::Hidden));
        assert!(!session.emit_remote_clipboard(ClipboardData::plain_text("x")));
        assert!(!session.request_clipboard_update());
    }

    #[test]
    fn test_extension_is_echoed() {
        let session = LoopbackSession::new(SessionRequest::default(), LoopbackOptions::default());
        let value = session
            .invoke_extension(Extension::new("ping", serde_json::json!({"n": 1})))
            .unwrap();
        assert_eq!(value, serde_json::json!({"n": 1}));
        assert_eq!(session.extensions().len(), 1);
    }
}
