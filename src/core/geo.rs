use serde::{Deserialize, Serialize};

/// A point in either world space or canvas-pixel space.
///
/// The space is never stored alongside the value: it is implied by the
/// function that produced it, so every conversion goes through an explicit
/// transform in [`crate::core::viewport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Vector2 {
        Vector2::new(self.x * scalar, self.y * scalar)
    }

    /// Linear blend towards `other`; `t` is not clamped.
    pub fn lerp(&self, other: &Vector2, t: f64) -> Vector2 {
        Vector2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn squared_distance_to(&self, other: &Vector2) -> f64 {
        squared_distance(self, other)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// `(a.x-b.x)² + (a.y-b.y)²`, for comparisons where the square root is irrelevant.
pub fn squared_distance(a: &Vector2, b: &Vector2) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Rotates `point` about `pivot` by `angle` radians, counter-clockwise in a
/// Y-up frame.
///
/// Rotating by `-angle` undoes a rotation by `angle`; compass mode relies on
/// that pairing between drawing and click resolution.
pub fn rotate_around(pivot: &Vector2, point: &Vector2, angle: f64) -> Vector2 {
    if angle == 0.0 {
        return *point;
    }
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;
    Vector2::new(
        pivot.x + dx * cos - dy * sin,
        pivot.y + dx * sin + dy * cos,
    )
}
