//! Domain layer for the input bridge.
//!
//! Browser event snapshots, connection parameters, cursor styles and the
//! payloads of the observable channels.  No I/O, no async.

pub mod config;
pub mod cursor;
pub mod dom_events;
pub mod notifications;

pub use config::Config;
pub use cursor::CursorStyle;
pub use dom_events::{
    BrowserEvent, ClientRect, EventDisposition, KeyEventType, KeyboardEventData, ModifierState,
    MouseEventData, WheelEventData,
};
pub use notifications::{DynamicResizeEvent, MousePosition, ResizeEvent};
