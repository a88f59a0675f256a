use crate::core::config::{FrameTimingConfig, MinimapSettings, SurfaceKind};
use crate::core::viewport::Viewport;
use crate::rendering::{DrawParameters, RenderState, Renderer, ZoomLevels};
use instant::Instant;
use std::time::Duration;

/// Redraw counters of a [`HeadlessRenderer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawStats {
    pub forced: u64,
    pub interpolated: u64,
    /// Unforced redraws skipped because nothing changed
    pub skipped: u64,
}

/// A renderer that computes draw parameters without touching pixels.
///
/// Used by the headless driver and integration tests, and as the reference
/// for how a pixel renderer consumes [`RenderState`].
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    state: RenderState,
    width: f64,
    height: f64,
    compass: bool,
    timing: FrameTimingConfig,
    stats: RedrawStats,
}

impl HeadlessRenderer {
    pub fn new(state: RenderState, width: f64, height: f64) -> Self {
        Self {
            state,
            width,
            height,
            compass: false,
            timing: FrameTimingConfig::default(),
            stats: RedrawStats::default(),
        }
    }

    pub fn from_settings(settings: &MinimapSettings, surface: SurfaceKind, width: f64, height: f64) -> Self {
        let mut renderer = Self::new(
            RenderState::new(Default::default(), ZoomLevels::from_settings(settings)),
            width,
            height,
        );
        renderer.configure(settings, surface);
        renderer
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn stats(&self) -> RedrawStats {
        self.stats
    }

    pub fn draw_parameters(&self, now: Instant) -> DrawParameters {
        let interval = Duration::from_secs_f64(self.timing.update_interval_ms / 1000.0);
        let player_position =
            self.state
                .displayed_player_position(now, interval, self.timing.interpolation);
        let center = self.state.camera_override.unwrap_or(player_position);
        let rotation = if self.compass {
            self.state.player_heading
        } else {
            0.0
        };

        DrawParameters {
            viewport: Viewport::new(center, self.state.zoom.at(&center), self.width, self.height)
                .with_rotation(rotation),
            player_position,
            player_heading: self.state.player_heading,
            friend_count: self.state.friends.len(),
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn state(&self) -> &RenderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RenderState {
        &mut self.state
    }

    fn configure(&mut self, settings: &MinimapSettings, surface: SurfaceKind) {
        self.compass = settings.compass_active(surface);
        self.timing = settings.frame_timing();
        self.state.zoom = ZoomLevels::from_settings(settings);
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn redraw(&mut self, forced: bool) {
        let parameters = self.draw_parameters(Instant::now());
        if !forced && self.state.last_draw.as_ref() == Some(&parameters) {
            self.stats.skipped += 1;
            return;
        }

        if forced {
            self.stats.forced += 1;
        } else {
            self.stats.interpolated += 1;
        }
        self.state.last_draw = Some(parameters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Vector2;

    #[test]
    fn test_unchanged_unforced_redraw_is_skipped() {
        let mut renderer = HeadlessRenderer::from_settings(
            &MinimapSettings::default(),
            SurfaceKind::Opaque,
            400.0,
            300.0,
        );
        renderer.redraw(true);
        renderer.redraw(false);
        renderer.redraw(false);
        assert_eq!(
            renderer.stats(),
            RedrawStats {
                forced: 1,
                interpolated: 0,
                skipped: 2
            }
        );
    }

    #[test]
    fn test_draw_parameters_follow_camera_override() {
        let mut renderer = HeadlessRenderer::from_settings(
            &MinimapSettings::default(),
            SurfaceKind::Opaque,
            400.0,
            300.0,
        );
        renderer.state_mut().camera_override = Some(Vector2::new(50.0, 60.0));
        renderer.redraw(true);
        let drawn = renderer.state().last_draw.clone().unwrap();
        assert_eq!(drawn.viewport.center, Vector2::new(50.0, 60.0));
        assert_eq!(drawn.viewport.rotation, 0.0);
        assert_eq!(drawn.viewport.width, 400.0);
    }

    #[test]
    fn test_compass_rotation_uses_heading() {
        let settings = MinimapSettings {
            compass_mode: true,
            ..MinimapSettings::default()
        };
        let mut renderer =
            HeadlessRenderer::from_settings(&settings, SurfaceKind::Transparent, 200.0, 200.0);
        renderer.state_mut().player_heading = 0.75;
        let parameters = renderer.draw_parameters(Instant::now());
        assert_eq!(parameters.viewport.rotation, 0.75);
    }

    #[test]
    fn test_zoom_by_redraws() {
        let mut renderer = HeadlessRenderer::from_settings(
            &MinimapSettings::default(),
            SurfaceKind::Opaque,
            400.0,
            300.0,
        );
        let before = renderer.zoom_level();
        renderer.zoom_by(1.0);
        assert_eq!(renderer.zoom_level(), before + 1.0);
        assert_eq!(renderer.stats().forced, 1);
    }
}
