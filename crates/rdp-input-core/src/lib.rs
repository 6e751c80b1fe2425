//! # rdp-input-core
//!
//! Shared library for the remote-desktop input bridge: canonical device
//! events, ordered input transactions, the DOM-code → scan code table, and
//! the value types that cross the session-engine boundary.
//!
//! It has no dependencies on browsers, async runtimes, or the engine itself.
//!
//! # Architecture overview
//!
//! A browser shows the remote desktop on a canvas and forwards the user's
//! keyboard and mouse to a session engine.  The engine speaks the remote
//! desktop protocol; this workspace only decides *what* input to send.
//!
//! - **`domain`** – [`DeviceEvent`] (one key/mouse/wheel occurrence),
//!   [`InputTransaction`] (an ordered batch applied as a unit), and the
//!   engine-facing values ([`DesktopSize`], [`ClipboardData`],
//!   [`SessionError`], ...).
//!
//! - **`keymap`** – translation from DOM `KeyboardEvent.code` strings to
//!   set-1 [`Scancode`]s, plus modifier/lock key classification.

pub mod domain;
pub mod keymap;

pub use domain::{
    ClipboardData, ClipboardItem, ClipboardValue, DesktopSize, DeviceEvent, Extension,
    InputError, InputTransaction, LockKeyState, ResizeRequest, RotationUnit, SessionError,
    SessionErrorKind, SessionTerminationInfo, UnicodeScalar,
};
pub use keymap::{KeyMapper, LockKey, ModifierKey, Scancode};
