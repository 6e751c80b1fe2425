//! Domain types for remote-desktop input.
//!
//! Everything in here is plain data plus validation: no I/O, no async, no
//! knowledge of browsers or of the session engine's internals.  Outer layers
//! (the bridge crate) depend on these types; they never depend on the outer
//! layers.

pub mod clipboard;
pub mod device_event;
pub mod session;
pub mod transaction;

pub use clipboard::{ClipboardData, ClipboardItem, ClipboardValue};
pub use device_event::{DeviceEvent, InputError, RotationUnit, UnicodeScalar};
pub use session::{
    DesktopSize, Extension, LockKeyState, ResizeRequest, SessionError, SessionErrorKind,
    SessionTerminationInfo,
};
pub use transaction::InputTransaction;
