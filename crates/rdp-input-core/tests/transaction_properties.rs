//! Integration tests for rdp-input-core.
//!
//! These exercise the public API the bridge relies on: table determinism,
//! event construction and validation, and transaction ordering.

use rdp_input_core::{
    keymap::DOM_CODE_TABLE, DeviceEvent, InputError, InputTransaction, KeyMapper, RotationUnit,
    Scancode, UnicodeScalar,
};

#[test]
fn test_every_table_code_translates_to_the_same_scancode_each_call() {
    for &(code, raw) in DOM_CODE_TABLE {
        for _ in 0..3 {
            assert_eq!(
                KeyMapper::dom_code_to_scancode(code),
                Some(Scancode::new(raw)),
                "{code} must always translate to 0x{raw:04X}"
            );
        }
    }
}

#[test]
fn test_ctrl_alt_del_sequence_builds_in_order() {
    let tx: InputTransaction = [
        DeviceEvent::key_pressed(Scancode::CONTROL_LEFT),
        DeviceEvent::key_pressed(Scancode::ALT_LEFT),
        DeviceEvent::key_pressed(Scancode::DELETE),
        DeviceEvent::key_released(Scancode::CONTROL_LEFT),
        DeviceEvent::key_released(Scancode::ALT_LEFT),
        DeviceEvent::key_released(Scancode::DELETE),
    ]
    .into_iter()
    .collect();

    assert_eq!(tx.len(), 6);
    assert_eq!(tx.events()[2], DeviceEvent::key_pressed(Scancode::new(0xE053)));
    assert_eq!(tx.events()[5], DeviceEvent::key_released(Scancode::new(0xE053)));
}

#[test]
fn test_unicode_event_from_browser_utf16() {
    // "é" as a browser would hand it over.
    let scalar = UnicodeScalar::from_utf16(&[0x00E9]).expect("valid scalar");
    let event = DeviceEvent::unicode_pressed(&scalar.to_string()).expect("single scalar");
    assert!(event.is_keyboard());

    let err = UnicodeScalar::from_utf16(&[0xDE00]).unwrap_err();
    assert_eq!(err, InputError::UnpairedSurrogate(0xDE00));
}

#[test]
fn test_wheel_event_carries_unit() {
    let event = DeviceEvent::wheel_rotations(false, -5, RotationUnit::from_delta_mode(1));
    assert_eq!(
        event,
        DeviceEvent::WheelRotation {
            vertical: false,
            amount: -5,
            unit: RotationUnit::Line
        }
    );
}
