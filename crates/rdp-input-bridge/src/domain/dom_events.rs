//! Typed snapshots of the browser events the adapter consumes.
//!
//! The adapter never touches the DOM directly.  Whoever owns the page (a wasm
//! glue layer, a test, or the replay binary reading a recording) copies the
//! relevant fields of each `MouseEvent` / `WheelEvent` / `KeyboardEvent` into
//! these structs and hands them over.
//!
//! # JSON representation
//!
//! Field names follow the DOM's camelCase so a page can forward events with a
//! plain `JSON.stringify` of the interesting properties.  A recording is one
//! [`BrowserEvent`] per line:
//!
//! ```json
//! {"type":"mousemove","clientX":120.5,"clientY":48}
//! {"type":"key","kind":"keydown","code":"KeyA","key":"a"}
//! {"type":"wheel","deltaX":0,"deltaY":-100,"deltaMode":0}
//! ```

use rdp_input_core::LockKeyState;
use serde::{Deserialize, Serialize};

/// The rendered CSS box of the canvas element (`getBoundingClientRect()`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Result of `KeyboardEvent.getModifierState(...)` / `MouseEvent.getModifierState(...)`
/// for every key the adapter cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModifierState {
    pub alt: bool,
    pub control: bool,
    pub meta: bool,
    pub alt_graph: bool,
    #[serde(rename = "OS")]
    pub os: bool,
    pub shift: bool,
    pub caps_lock: bool,
    pub num_lock: bool,
    pub scroll_lock: bool,
    pub kana_mode: bool,
}

impl ModifierState {
    /// Returns `true` if any key that turns a keystroke into a shortcut
    /// (Alt, Control, Meta, AltGraph, OS) is held.
    pub fn holds_shortcut_modifier(&self) -> bool {
        self.alt || self.control || self.meta || self.alt_graph || self.os
    }

    /// Extracts the four toggle states pushed on lock-key synchronisation.
    pub fn lock_state(&self) -> LockKeyState {
        LockKeyState {
            scroll_lock: self.scroll_lock,
            num_lock: self.num_lock,
            caps_lock: self.caps_lock,
            kana_lock: self.kana_mode,
        }
    }
}

/// `keydown` or `keyup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEventType {
    #[serde(rename = "keydown")]
    KeyDown,
    #[serde(rename = "keyup")]
    KeyUp,
}

/// A `KeyboardEvent` snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardEventData {
    pub kind: KeyEventType,
    /// Physical key (`KeyboardEvent.code`), e.g. `"KeyA"`.
    pub code: String,
    /// Produced value (`KeyboardEvent.key`), e.g. `"a"`, `"é"`, `"Enter"`, `"Dead"`.
    pub key: String,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default)]
    pub modifiers: ModifierState,
}

impl KeyboardEventData {
    pub fn new(kind: KeyEventType, code: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            key: key.into(),
            repeat: false,
            modifiers: ModifierState::default(),
        }
    }

    pub fn key_down(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(KeyEventType::KeyDown, code, key)
    }

    pub fn key_up(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(KeyEventType::KeyUp, code, key)
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn with_modifiers(mut self, modifiers: ModifierState) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A `MouseEvent` snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseEventData {
    pub client_x: f64,
    pub client_y: f64,
    /// `MouseEvent.button`: 0 main, 1 auxiliary, 2 secondary, 3 back, 4 forward.
    #[serde(default)]
    pub button: i16,
    #[serde(default)]
    pub modifiers: ModifierState,
}

impl MouseEventData {
    pub fn at(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            ..Default::default()
        }
    }

    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }
}

/// A `WheelEvent` snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelEventData {
    #[serde(default)]
    pub delta_x: f64,
    #[serde(default)]
    pub delta_y: f64,
    /// `WheelEvent.deltaMode`: 0 pixel, 1 line, 2 page.
    #[serde(default)]
    pub delta_mode: u32,
}

/// Any browser event the adapter handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BrowserEvent {
    MouseMove(MouseEventData),
    MouseDown(MouseEventData),
    MouseUp(MouseEventData),
    MouseEnter(MouseEventData),
    MouseLeave(MouseEventData),
    ContextMenu,
    Wheel(WheelEventData),
    Key(KeyboardEventData),
    Focus,
    Blur,
}

/// What the page should do with the original browser event after the
/// adapter has handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Call `preventDefault()` (suppress context menu, browser shortcuts, ...).
    PreventDefault,
    /// Let the browser's default action run.
    Propagate,
}
