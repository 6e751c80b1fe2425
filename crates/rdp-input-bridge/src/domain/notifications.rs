//! Payloads published on the adapter's observable channels.

use rdp_input_core::DesktopSize;
use serde::Serialize;

/// The remote desktop changed size (or a session just started).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizeEvent {
    pub desktop_size: DesktopSize,
    /// Always 0: the adapter drives a single session.
    pub session_id: u32,
}

impl ResizeEvent {
    pub fn new(desktop_size: DesktopSize) -> Self {
        Self {
            desktop_size,
            session_id: 0,
        }
    }
}

/// The page asked for a new remote resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DynamicResizeEvent {
    pub width: u32,
    pub height: u32,
}

/// Pointer position in remote desktop pixels, after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MousePosition {
    pub x: u16,
    pub y: u16,
}

impl MousePosition {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}
