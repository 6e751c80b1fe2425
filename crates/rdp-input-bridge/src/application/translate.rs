//! Pointer translation: browser mouse and wheel events → device events.

use rdp_input_core::{DeviceEvent, RotationUnit};

use crate::domain::{ClientRect, MouseEventData, MousePosition, WheelEventData};

/// Maps client coordinates to remote desktop pixels.
///
/// The canvas may be rendered at a different CSS size than its backing
/// store; coordinates are scaled by `pixel / css` on each axis, rounded, and
/// saturated into `u16`.  A degenerate rect (zero width or height) scales by 1.
pub fn scale_mouse_position(
    event: &MouseEventData,
    rect: ClientRect,
    pixel_size: (u32, u32),
) -> MousePosition {
    let scale_x = axis_scale(pixel_size.0, rect.width);
    let scale_y = axis_scale(pixel_size.1, rect.height);

    MousePosition::new(
        to_u16(((event.client_x - rect.left) * scale_x).round()),
        to_u16(((event.client_y - rect.top) * scale_y).round()),
    )
}

fn axis_scale(pixels: u32, css: f64) -> f64 {
    if css > 0.0 {
        f64::from(pixels) / css
    } else {
        1.0
    }
}

// Float-to-int `as` saturates and maps NaN to 0.
fn to_u16(value: f64) -> u16 {
    value as u16
}

/// Builds a button press/release for `MouseEvent.button`.
///
/// Returns `None` for negative or out-of-range button numbers.
pub fn mouse_button_event(event: &MouseEventData, pressed: bool) -> Option<DeviceEvent> {
    let button = u8::try_from(event.button).ok()?;
    Some(if pressed {
        DeviceEvent::mouse_button_pressed(button)
    } else {
        DeviceEvent::mouse_button_released(button)
    })
}

/// Builds one wheel rotation from a `WheelEvent`.
///
/// A non-zero `deltaY` wins and produces a vertical rotation; otherwise the
/// horizontal delta is used.  The amount is the negated delta, rounded and
/// saturated into `i16`, so scrolling down (positive delta) rotates negative.
pub fn wheel_event(event: &WheelEventData) -> DeviceEvent {
    let vertical = event.delta_y != 0.0;
    let delta = if vertical { event.delta_y } else { event.delta_x };
    let amount = (-delta).round() as i16;

    DeviceEvent::wheel_rotations(vertical, amount, RotationUnit::from_delta_mode(event.delta_mode))
}
