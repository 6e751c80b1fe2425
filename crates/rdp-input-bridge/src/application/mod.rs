//! Application layer for the input bridge.
//!
//! Knows *what* to send to the session engine for each browser event, and
//! talks to the engine only through the traits in [`engine`].
//!
//! # Responsibilities
//!
//! - Keyboard dispatch policy (scancode vs. Unicode, modifiers, lock keys)
//! - Pointer coordinate scaling and wheel conversion
//! - Owning the session and guarding every call into it
//! - Publishing lifecycle notifications on observable channels
//!
//! # What does NOT belong here?
//!
//! - Reading files or parsing settings (infrastructure)
//! - Concrete engines or surfaces (infrastructure)

pub mod engine;
pub mod errors;
pub mod keyboard;
pub mod observable;
pub mod session_adapter;
pub mod translate;

pub use engine::{
    CanvasResizedCallback, CursorStyleCallback, ForceClipboardUpdateCallback,
    RemoteClipboardChangedCallback, RemoteSession, RenderSurface, SessionBuilder,
    SessionConnector, SessionRequest,
};
pub use errors::{render_error_message, BridgeError, ErrorReporter};
pub use keyboard::{KeyboardOutcome, KeyboardTranslator};
pub use observable::{Observable, SubscriptionId};
pub use session_adapter::{SessionAdapter, SessionChannels, SessionHandle};
