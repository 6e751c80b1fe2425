//! Key classification and DOM-code translation.
//!
//! The canonical keyboard representation sent to the remote session is the
//! set-1 [`Scancode`].  Browser events are translated at the adapter boundary;
//! nothing downstream sees DOM strings.

pub mod scancode;

pub use scancode::{Scancode, DOM_CODE_TABLE};

use serde::{Deserialize, Serialize};

/// The six modifier keys whose press state the translator tracks.
///
/// Meta keys are not tracked; the repeat and unicode rules treat them as
/// regular keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKey {
    ControlLeft,
    ControlRight,
    ShiftLeft,
    ShiftRight,
    AltLeft,
    AltRight,
}

impl ModifierKey {
    /// Classifies a DOM `KeyboardEvent.code`.
    pub fn from_dom_code(code: &str) -> Option<Self> {
        match code {
            "ControlLeft" => Some(ModifierKey::ControlLeft),
            "ControlRight" => Some(ModifierKey::ControlRight),
            "ShiftLeft" => Some(ModifierKey::ShiftLeft),
            "ShiftRight" => Some(ModifierKey::ShiftRight),
            "AltLeft" => Some(ModifierKey::AltLeft),
            "AltRight" => Some(ModifierKey::AltRight),
            _ => None,
        }
    }
}

/// Toggle keys whose state is synchronised rather than pressed/released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockKey {
    CapsLock,
    ScrollLock,
    NumLock,
    KanaMode,
}

impl LockKey {
    /// Classifies a DOM `KeyboardEvent.code`.
    pub fn from_dom_code(code: &str) -> Option<Self> {
        match code {
            "CapsLock" => Some(LockKey::CapsLock),
            "ScrollLock" => Some(LockKey::ScrollLock),
            "NumLock" => Some(LockKey::NumLock),
            "KanaMode" => Some(LockKey::KanaMode),
            _ => None,
        }
    }
}

/// Unified key mapper.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a DOM code (or key name) to a scan code.
    ///
    /// Returns `None` if the string has no entry in the table.
    pub fn dom_code_to_scancode(code: &str) -> Option<Scancode> {
        let sc = Scancode::from_dom_code(code);
        if sc.is_none() {
            tracing::trace!(code, "no scancode mapping");
        }
        sc
    }

    /// Returns `true` for the six tracked modifier codes.
    pub fn is_modifier_code(code: &str) -> bool {
        ModifierKey::from_dom_code(code).is_some()
    }

    /// Returns `true` for the four lock-key codes.
    pub fn is_lock_code(code: &str) -> bool {
        LockKey::from_dom_code(code).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_codes_are_classified() {
        for code in [
            "ControlLeft",
            "ControlRight",
            "ShiftLeft",
            "ShiftRight",
            "AltLeft",
            "AltRight",
        ] {
            assert!(KeyMapper::is_modifier_code(code), "{code} should be a modifier");
            assert!(!KeyMapper::is_lock_code(code));
        }
    }

    #[test]
    fn test_meta_is_not_a_tracked_modifier() {
        assert!(!KeyMapper::is_modifier_code("MetaLeft"));
        assert!(!KeyMapper::is_modifier_code("MetaRight"));
    }

    #[test]
    fn test_lock_codes_are_classified() {
        assert_eq!(LockKey::from_dom_code("CapsLock"), Some(LockKey::CapsLock));
        assert_eq!(LockKey::from_dom_code("ScrollLock"), Some(LockKey::ScrollLock));
        assert_eq!(LockKey::from_dom_code("NumLock"), Some(LockKey::NumLock));
        assert_eq!(LockKey::from_dom_code("KanaMode"), Some(LockKey::KanaMode));
        assert_eq!(LockKey::from_dom_code("KeyA"), None);
    }

    #[test]
    fn test_every_modifier_and_lock_has_a_scancode() {
        for code in ["ControlLeft", "AltRight", "CapsLock", "KanaMode", "NumLock"] {
            assert!(KeyMapper::dom_code_to_scancode(code).is_some(), "{code}");
        }
    }

    #[test]
    fn test_translation_is_deterministic() {
        for &(code, _) in DOM_CODE_TABLE {
            let first = KeyMapper::dom_code_to_scancode(code);
            let second = KeyMapper::dom_code_to_scancode(code);
            assert_eq!(first, second, "{code} translated differently on repeat");
        }
    }
}
