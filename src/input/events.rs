use crate::core::geo::Vector2;
use serde::{Deserialize, Serialize};

/// Kind of device behind a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// Mouse buttons, numbered the way pointer events number them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum MouseButton {
    #[default]
    Primary,
    /// Auxiliary button, usually the wheel
    Middle,
    Secondary,
    Other(u16),
}

impl MouseButton {
    pub fn from_index(index: u16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// A pointer event in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    pub pointer_id: i32,
    pub pointer_type: PointerType,
    pub button: MouseButton,
    /// Offset from the canvas' top-left corner
    pub position: Vector2,
}

impl PointerEvent {
    pub fn mouse(pointer_id: i32, button: MouseButton, position: Vector2) -> Self {
        Self {
            pointer_id,
            pointer_type: PointerType::Mouse,
            button,
            position,
        }
    }

    /// Primary mouse button event at `(x, y)`
    pub fn primary(pointer_id: i32, x: f64, y: f64) -> Self {
        Self::mouse(pointer_id, MouseButton::Primary, Vector2::new(x, y))
    }

    /// Middle mouse button event at `(x, y)`
    pub fn middle(pointer_id: i32, x: f64, y: f64) -> Self {
        Self::mouse(pointer_id, MouseButton::Middle, Vector2::new(x, y))
    }

    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }
}

/// Scroll wheel input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelEvent {
    /// Positive scrolls toward the user
    pub delta_y: f64,
    pub position: Vector2,
}

impl WheelEvent {
    pub fn new(delta_y: f64) -> Self {
        Self {
            delta_y,
            position: Vector2::ZERO,
        }
    }
}

/// Every event the minimap canvas reacts to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    /// The pointer capture was taken away, or the pointer was cancelled
    LostPointerCapture {
        #[serde(rename = "pointerId")]
        pointer_id: i32,
    },
    Wheel(WheelEvent),
}

/// Whether an event changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    Ignored,
}

impl EventHandled {
    pub fn is_handled(self) -> bool {
        self == Self::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_numbering() {
        assert_eq!(MouseButton::from_index(0), MouseButton::Primary);
        assert_eq!(MouseButton::from_index(1), MouseButton::Middle);
        assert_eq!(MouseButton::from_index(2), MouseButton::Secondary);
        assert_eq!(MouseButton::from_index(4), MouseButton::Other(4));
    }

    #[test]
    fn test_event_json() {
        let event: InputEvent = serde_json::from_str(
            r#"{"type":"pointerDown","pointerId":1,"pointerType":"pen","button":"middle","position":{"x":3,"y":4}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            InputEvent::PointerDown(
                PointerEvent::middle(1, 3.0, 4.0).with_pointer_type(PointerType::Pen)
            )
        );
    }
}
