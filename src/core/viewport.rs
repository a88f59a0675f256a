use crate::core::constants::PAN_PIXELS_PER_WORLD_UNIT;
use crate::core::geo::{rotate_around, Vector2};
use serde::{Deserialize, Serialize};

/// The projection between world space and canvas pixels for one draw.
///
/// The camera `center` lands on the middle of the canvas. One world unit
/// spans `PAN_PIXELS_PER_WORLD_UNIT / zoom` pixels, world Y grows upwards
/// while canvas Y grows downwards. When `rotation` is set (compass mode) the
/// world is turned about the center by that angle before projecting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Camera center in world coordinates
    pub center: Vector2,
    /// Zoom distance: world units covered by `PAN_PIXELS_PER_WORLD_UNIT` pixels
    pub zoom: f64,
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Rotation applied around `center` before projecting, in radians
    pub rotation: f64,
}

impl Viewport {
    pub fn new(center: Vector2, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Canvas pixels per world unit.
    pub fn scale(&self) -> f64 {
        scale_for_zoom(self.zoom)
    }

    pub fn canvas_center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Forward projection used by the renderer.
    pub fn world_to_canvas(&self, world: &Vector2) -> Vector2 {
        let rotated = rotate_around(&self.center, world, self.rotation);
        let scale = self.scale();
        Vector2::new(
            self.width / 2.0 + (rotated.x - self.center.x) * scale,
            self.height / 2.0 - (rotated.y - self.center.y) * scale,
        )
    }

    /// Inverse of [`Viewport::world_to_canvas`], including the rotation.
    pub fn canvas_to_world(&self, canvas: &Vector2) -> Vector2 {
        let unrotated = canvas_to_world(canvas, &self.center, self.zoom, self.width, self.height);
        rotate_around(&self.center, &unrotated, -self.rotation)
    }

    /// World-space delta for a canvas drag of `delta` pixels. Dragging the
    /// content right moves the camera left, dragging it down moves the camera
    /// up in world space.
    pub fn drag_to_world_delta(&self, delta: &Vector2) -> Vector2 {
        drag_to_world_delta(delta, self.zoom)
    }
}

/// Pixels per world unit for a zoom distance.
pub fn scale_for_zoom(zoom: f64) -> f64 {
    PAN_PIXELS_PER_WORLD_UNIT / zoom
}

/// Maps a canvas pixel to world space for an unrotated view centered on
/// `center` at zoom distance `zoom`.
pub fn canvas_to_world(
    canvas: &Vector2,
    center: &Vector2,
    zoom: f64,
    width: f64,
    height: f64,
) -> Vector2 {
    let scale = scale_for_zoom(zoom);
    Vector2::new(
        center.x + (canvas.x - width / 2.0) / scale,
        center.y - (canvas.y - height / 2.0) / scale,
    )
}

pub fn drag_to_world_delta(delta: &Vector2, zoom: f64) -> Vector2 {
    let world_per_pixel = zoom / PAN_PIXELS_PER_WORLD_UNIT;
    Vector2::new(-delta.x * world_per_pixel, delta.y * world_per_pixel)
}
