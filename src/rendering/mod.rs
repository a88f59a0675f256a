//! Render state and the renderer boundary.
//!
//! Pixel drawing lives outside this crate. A [`Renderer`] owns the
//! [`RenderState`] and is told when to redraw; the interaction controller,
//! the position setter and the frame scheduler mutate that state through it.

pub mod headless;
pub mod state;

pub use headless::{HeadlessRenderer, RedrawStats};
pub use state::{DrawParameters, RenderState, ZoomLevels};

use crate::core::config::{MinimapSettings, SurfaceKind};

pub trait Renderer {
    fn state(&self) -> &RenderState;

    fn state_mut(&mut self) -> &mut RenderState;

    /// Redraw the whole canvas. An unforced redraw may be skipped when
    /// nothing changed; a forced one always runs immediately.
    fn redraw(&mut self, forced: bool);

    /// Current zoom distance.
    fn zoom_level(&self) -> f64 {
        self.state().zoom_level()
    }

    fn zoom_by(&mut self, delta: f64) {
        self.state_mut().zoom_by(delta);
        self.redraw(true);
    }

    /// Picks up new settings. Zoom levels are reset to the configured ones.
    fn configure(&mut self, settings: &MinimapSettings, _surface: SurfaceKind) {
        self.state_mut().zoom = ZoomLevels::from_settings(settings);
    }

    /// The canvas changed size; a forced redraw follows.
    fn resize(&mut self, _width: f64, _height: f64) {}
}
