//! Keyboard dispatch policy: one browser key event → zero or more device events.
//!
//! # Decision tree
//!
//! For every `keydown` / `keyup`:
//!
//! 1. Track the six modifier keys (left/right Control, Shift, Alt) in the
//!    pressed set.
//! 2. Lock keys (CapsLock, ScrollLock, NumLock, KanaMode) only resynchronise
//!    the four lock states read from the event; they never produce key
//!    events.
//! 3. Auto-repeat of a modifier key is dropped.  Other keys repeat normally.
//! 4. Scancode mode: the physical `code` is looked up in the scancode table.
//! 5. Unicode mode: `Dead` and `Unidentified` keys are dropped.  A `key` that
//!    is a single character with no table entry is sent as a Unicode event,
//!    unless a shortcut modifier is held and the session does not accept
//!    Unicode shortcuts; then the scancode of `code` is sent instead.

use rdp_input_core::{
    DeviceEvent, KeyMapper, LockKey, LockKeyState, ModifierKey, Scancode, UnicodeScalar,
};
use tracing::debug;

use crate::domain::{KeyEventType, KeyboardEventData};

/// What one key event turns into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardOutcome {
    /// Lock states to push to the session before `events`.
    pub lock_sync: Option<LockKeyState>,
    pub events: Vec<DeviceEvent>,
}

/// Stateful translator for keyboard events.
#[derive(Debug, Default)]
pub struct KeyboardTranslator {
    unicode_mode: bool,
    pressed_modifiers: Vec<ModifierKey>,
}

impl KeyboardTranslator {
    pub fn new(unicode_mode: bool) -> Self {
        Self {
            unicode_mode,
            pressed_modifiers: Vec::new(),
        }
    }

    pub fn unicode_mode(&self) -> bool {
        self.unicode_mode
    }

    pub fn set_unicode_mode(&mut self, enabled: bool) {
        self.unicode_mode = enabled;
    }

    /// Modifiers currently held, in press order.
    pub fn pressed_modifiers(&self) -> &[ModifierKey] {
        &self.pressed_modifiers
    }

    /// Translates one key event.
    ///
    /// `supports_unicode_shortcuts` is the session's answer to
    /// [`RemoteSession::supports_unicode_keyboard_shortcuts`](crate::application::RemoteSession::supports_unicode_keyboard_shortcuts).
    pub fn translate(
        &mut self,
        event: &KeyboardEventData,
        supports_unicode_shortcuts: bool,
    ) -> KeyboardOutcome {
        let mut outcome = KeyboardOutcome::default();

        let unicode_allowed =
            supports_unicode_shortcuts || !event.modifiers.holds_shortcut_modifier();

        let modifier = ModifierKey::from_dom_code(&event.code);
        if let Some(modifier) = modifier {
            self.track_modifier(modifier, event.kind);
        }

        if LockKey::from_dom_code(&event.code).is_some() {
            outcome.lock_sync = Some(event.modifiers.lock_state());
            return outcome;
        }

        if event.repeat && modifier.is_some() {
            debug!(code = %event.code, "dropping modifier auto-repeat");
            return outcome;
        }

        let code_scancode = KeyMapper::dom_code_to_scancode(&event.code);

        if !self.unicode_mode {
            match code_scancode {
                Some(scancode) => outcome.events.push(key_event(event.kind, scancode)),
                None => debug!(code = %event.code, "no scancode for key code"),
            }
            return outcome;
        }

        if matches!(event.key.as_str(), "Dead" | "Unidentified") {
            debug!(key = %event.key, "dropping non-character key");
            return outcome;
        }

        let key_has_scancode = KeyMapper::dom_code_to_scancode(&event.key).is_some();
        let character = if key_has_scancode || modifier.is_some() {
            None
        } else {
            UnicodeScalar::from_text(&event.key).ok()
        };

        match (character, code_scancode) {
            (Some(character), _) if unicode_allowed => {
                outcome.events.push(unicode_event(event.kind, character));
            }
            (_, Some(scancode)) => outcome.events.push(key_event(event.kind, scancode)),
            (_, None) => debug!(code = %event.code, key = %event.key, "key produced no event"),
        }

        outcome
    }

    fn track_modifier(&mut self, modifier: ModifierKey, kind: KeyEventType) {
        match kind {
            KeyEventType::KeyDown => {
                if !self.pressed_modifiers.contains(&modifier) {
                    self.pressed_modifiers.push(modifier);
                }
            }
            KeyEventType::KeyUp => self.pressed_modifiers.retain(|m| *m != modifier),
        }
    }
}

fn key_event(kind: KeyEventType, scancode: Scancode) -> DeviceEvent {
    match kind {
        KeyEventType::KeyDown => DeviceEvent::key_pressed(scancode),
        KeyEventType::KeyUp => DeviceEvent::key_released(scancode),
    }
}

fn unicode_event(kind: KeyEventType, character: UnicodeScalar) -> DeviceEvent {
    match kind {
        KeyEventType::KeyDown => DeviceEvent::UnicodePressed { character },
        KeyEventType::KeyUp => DeviceEvent::UnicodeReleased { character },
    }
}
