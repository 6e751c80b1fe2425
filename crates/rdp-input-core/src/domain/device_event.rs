//! Canonical device events: the unit of input the remote session consumes.
//!
//! A [`DeviceEvent`] describes one hardware occurrence (a key going down, the
//! pointer moving, the wheel turning).  Browser events are translated into
//! device events by the bridge crate; device events are then grouped into an
//! [`InputTransaction`](super::transaction::InputTransaction) and applied to
//! the session as a unit.
//!
//! # Keyboard: scan codes vs. Unicode
//!
//! A key can reach the server in two forms:
//!
//! - **Scan code** ([`DeviceEvent::KeyPressed`]): the physical key position.
//!   The server applies *its own* keyboard layout to decide which character
//!   that produces.
//! - **Unicode** ([`DeviceEvent::UnicodePressed`]): the exact character the
//!   user typed locally, bypassing the server's layout.  Useful when the local
//!   and remote layouts differ.
//!
//! A Unicode event carries exactly one [`UnicodeScalar`].  Strings that hold
//! zero or several scalars, or a lone UTF-16 surrogate, are rejected at
//! construction with an [`InputError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keymap::Scancode;

/// Errors raised while building device events.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    /// The string held zero or more than one Unicode scalar value.
    #[error("expected exactly one Unicode scalar value, got {0:?}")]
    NotASingleScalar(String),

    /// The code point is a surrogate or lies above U+10FFFF.
    #[error("invalid Unicode code point U+{0:04X}")]
    InvalidCodePoint(u32),

    /// A UTF-16 sequence contained a surrogate half without its partner.
    #[error("unpaired UTF-16 surrogate 0x{0:04X}")]
    UnpairedSurrogate(u16),
}

/// Exactly one Unicode scalar value.
///
/// Rust's `char` is already a scalar value; this wrapper exists so that every
/// way a character enters the system (a `&str`, raw UTF-16 from the browser, a
/// numeric code point) goes through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnicodeScalar(char);

impl UnicodeScalar {
    /// Validates that `text` is exactly one scalar value.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NotASingleScalar`] for empty or multi-scalar
    /// strings.
    pub fn from_text(text: &str) -> Result<Self, InputError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(UnicodeScalar(c)),
            _ => Err(InputError::NotASingleScalar(text.to_owned())),
        }
    }

    /// Validates a UTF-16 code unit sequence, as JavaScript strings store text.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnpairedSurrogate`] if the sequence contains a lone
    /// surrogate half, and [`InputError::NotASingleScalar`] if it decodes to
    /// anything other than exactly one scalar value.
    pub fn from_utf16(units: &[u16]) -> Result<Self, InputError> {
        let decoded = char::decode_utf16(units.iter().copied())
            .collect::<Result<String, _>>()
            .map_err(|e| InputError::UnpairedSurrogate(e.unpaired_surrogate()))?;
        Self::from_text(&decoded)
    }

    /// Validates a numeric code point.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidCodePoint`] for surrogates (U+D800–U+DFFF)
    /// and values above U+10FFFF.
    pub fn from_code_point(code_point: u32) -> Result<Self, InputError> {
        char::from_u32(code_point)
            .map(UnicodeScalar)
            .ok_or(InputError::InvalidCodePoint(code_point))
    }

    /// Returns the wrapped character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for UnicodeScalar {
    fn from(c: char) -> Self {
        UnicodeScalar(c)
    }
}

impl TryFrom<String> for UnicodeScalar {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_text(&value)
    }
}

impl From<UnicodeScalar> for String {
    fn from(u: UnicodeScalar) -> String {
        u.0.to_string()
    }
}

impl fmt::Display for UnicodeScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unit of a wheel rotation amount.
///
/// The numeric values match DOM `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum RotationUnit {
    #[default]
    Pixel = 0,
    Line = 1,
    Page = 2,
}

impl RotationUnit {
    /// Maps a DOM `deltaMode` value, falling back to [`RotationUnit::Pixel`]
    /// for anything unrecognised.
    pub fn from_delta_mode(mode: u32) -> Self {
        match mode {
            0 => RotationUnit::Pixel,
            1 => RotationUnit::Line,
            2 => RotationUnit::Page,
            _ => RotationUnit::Pixel,
        }
    }
}

/// One hardware input occurrence.
///
/// Device events are immutable once built and are moved into a transaction,
/// so each is consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceEvent {
    MouseButtonPressed { button: u8 },
    MouseButtonReleased { button: u8 },
    MouseMove { x: u16, y: u16 },
    WheelRotation {
        vertical: bool,
        amount: i16,
        unit: RotationUnit,
    },
    KeyPressed { scancode: Scancode },
    KeyReleased { scancode: Scancode },
    UnicodePressed { character: UnicodeScalar },
    UnicodeReleased { character: UnicodeScalar },
}

impl DeviceEvent {
    pub fn mouse_button_pressed(button: u8) -> Self {
        DeviceEvent::MouseButtonPressed { button }
    }

    pub fn mouse_button_released(button: u8) -> Self {
        DeviceEvent::MouseButtonReleased { button }
    }

    pub fn mouse_move(x: u16, y: u16) -> Self {
        DeviceEvent::MouseMove { x, y }
    }

    pub fn wheel_rotations(vertical: bool, amount: i16, unit: RotationUnit) -> Self {
        DeviceEvent::WheelRotation {
            vertical,
            amount,
            unit,
        }
    }

    pub fn key_pressed(scancode: Scancode) -> Self {
        DeviceEvent::KeyPressed { scancode }
    }

    pub fn key_released(scancode: Scancode) -> Self {
        DeviceEvent::KeyReleased { scancode }
    }

    /// Builds a Unicode key-down from a string holding exactly one scalar.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NotASingleScalar`] otherwise.
    pub fn unicode_pressed(text: &str) -> Result<Self, InputError> {
        UnicodeScalar::from_text(text).map(|character| DeviceEvent::UnicodePressed { character })
    }

    /// Builds a Unicode key-up from a string holding exactly one scalar.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NotASingleScalar`] otherwise.
    pub fn unicode_released(text: &str) -> Result<Self, InputError> {
        UnicodeScalar::from_text(text).map(|character| DeviceEvent::UnicodeReleased { character })
    }

    /// Returns `true` for keyboard events (scan code or Unicode).
    pub fn is_keyboard(&self) -> bool {
        matches!(
            self,
            DeviceEvent::KeyPressed { .. }
                | DeviceEvent::KeyReleased { .. }
                | DeviceEvent::UnicodePressed { .. }
                | DeviceEvent::UnicodeReleased { .. }
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_pressed_accepts_single_ascii_scalar() {
        // Arrange / Act
        let event = DeviceEvent::unicode_pressed("A").unwrap();

        // Assert
        assert_eq!(
            event,
            DeviceEvent::UnicodePressed {
                character: UnicodeScalar::from('A')
            }
        );
    }

    #[test]
    fn test_unicode_pressed_accepts_astral_scalar() {
        // One scalar even though JavaScript would count two code units.
        let event = DeviceEvent::unicode_pressed("😀").unwrap();
        assert!(matches!(event, DeviceEvent::UnicodePressed { character } if character.as_char() == '😀'));
    }

    #[test]
    fn test_unicode_pressed_rejects_empty_and_multi_scalar_strings() {
        assert!(matches!(
            DeviceEvent::unicode_pressed(""),
            Err(InputError::NotASingleScalar(_))
        ));
        assert!(matches!(
            DeviceEvent::unicode_released("ab"),
            Err(InputError::NotASingleScalar(_))
        ));
        // "e" + combining acute accent: one grapheme, two scalars.
        assert!(DeviceEvent::unicode_pressed("e\u{301}").is_err());
    }

    #[test]
    fn test_isolated_high_surrogate_fails_validation() {
        // 😀 is D83D DE00 in UTF-16; take only the high half.
        let result = UnicodeScalar::from_utf16(&[0xD83D]);
        assert_eq!(result, Err(InputError::UnpairedSurrogate(0xD83D)));
    }

    #[test]
    fn test_full_surrogate_pair_decodes_to_one_scalar() {
        let scalar = UnicodeScalar::from_utf16(&[0xD83D, 0xDE00]).unwrap();
        assert_eq!(scalar.as_char(), '😀');
    }

    #[test]
    fn test_code_point_validation() {
        assert_eq!(UnicodeScalar::from_code_point(0x41).unwrap().as_char(), 'A');
        assert_eq!(
            UnicodeScalar::from_code_point(0xD800),
            Err(InputError::InvalidCodePoint(0xD800))
        );
        assert_eq!(
            UnicodeScalar::from_code_point(0x11_0000),
            Err(InputError::InvalidCodePoint(0x11_0000))
        );
    }

    #[test]
    fn test_rotation_unit_from_delta_mode_defaults_to_pixel() {
        assert_eq!(RotationUnit::from_delta_mode(0), RotationUnit::Pixel);
        assert_eq!(RotationUnit::from_delta_mode(1), RotationUnit::Line);
        assert_eq!(RotationUnit::from_delta_mode(2), RotationUnit::Page);
        assert_eq!(RotationUnit::from_delta_mode(7), RotationUnit::Pixel);
    }

    #[test]
    fn test_device_event_json_shape() {
        let event = DeviceEvent::key_pressed(Scancode::new(0x1E));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({"type": "key_pressed", "scancode": 30}));

        let event = DeviceEvent::unicode_released("é").unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({"type": "unicode_released", "character": "é"}));
    }

    #[test]
    fn test_unicode_scalar_deserialization_validates() {
        let bad: Result<DeviceEvent, _> =
            serde_json::from_str(r#"{"type":"unicode_pressed","character":"ab"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_is_keyboard() {
        assert!(DeviceEvent::key_released(Scancode::DELETE).is_keyboard());
        assert!(!DeviceEvent::mouse_move(1, 2).is_keyboard());
    }
}
