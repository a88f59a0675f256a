use crate::animation::interpolation::PositionTrack;
use crate::core::config::{InterpolationMode, MinimapSettings};
use crate::core::constants::{MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};
use crate::core::geo::Vector2;
use crate::core::landmarks::ZoomPolicy;
use crate::core::viewport::Viewport;
use crate::friends::FriendData;
use instant::Instant;
use std::time::Duration;

/// The two zoom distances the renderer switches between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevels {
    pub town: f64,
    pub open_world: f64,
}

impl ZoomLevels {
    pub fn from_settings(settings: &MinimapSettings) -> Self {
        Self {
            town: settings.town_zoom_level,
            open_world: settings.zoom_level,
        }
    }

    /// Zoom distance in effect when the camera is centered on `center`.
    pub fn at(&self, center: &Vector2) -> f64 {
        match ZoomPolicy::at(center) {
            ZoomPolicy::Town => self.town,
            ZoomPolicy::OpenWorld => self.open_world,
        }
    }

    /// Changes the zoom distance of whichever policy applies at `center`.
    pub fn zoom_by(&mut self, center: &Vector2, delta: f64) {
        let level = match ZoomPolicy::at(center) {
            ZoomPolicy::Town => &mut self.town,
            ZoomPolicy::OpenWorld => &mut self.open_world,
        };
        let next = *level + delta;
        if next.is_finite() {
            *level = next.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL);
        }
    }
}

impl Default for ZoomLevels {
    fn default() -> Self {
        Self::from_settings(&MinimapSettings::default())
    }
}

/// Everything the last draw was computed from. Hover labels resolve the
/// pointer against these instead of the live state.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawParameters {
    pub viewport: Viewport,
    pub player_position: Vector2,
    pub player_heading: f64,
    pub friend_count: usize,
}

/// Live render state of one minimap instance.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    player: PositionTrack,
    /// Player heading in radians
    pub player_heading: f64,
    /// Viewport center while the user has panned away from the player
    pub camera_override: Option<Vector2>,
    pub zoom: ZoomLevels,
    pub friends: Vec<FriendData>,
    pub last_draw: Option<DrawParameters>,
}

impl RenderState {
    pub fn new(initial_position: Vector2, zoom: ZoomLevels) -> Self {
        Self {
            player: PositionTrack::starting_at(initial_position),
            zoom,
            ..Self::default()
        }
    }

    pub fn player_position(&self) -> Vector2 {
        self.player.latest()
    }

    pub fn set_player_position(&mut self, position: Vector2) {
        self.set_player_position_at(position, Instant::now());
    }

    pub fn set_player_position_at(&mut self, position: Vector2, at: Instant) {
        self.player.push(position, at);
    }

    /// Player position to draw at `now`, smoothed across one update interval.
    pub fn displayed_player_position(
        &self,
        now: Instant,
        update_interval: Duration,
        mode: InterpolationMode,
    ) -> Vector2 {
        self.player.interpolate(now, update_interval, mode)
    }

    /// Camera override when panned, otherwise the player.
    pub fn effective_center(&self) -> Vector2 {
        self.camera_override.unwrap_or_else(|| self.player_position())
    }

    /// Center of the frame on screen. Differs from
    /// [`RenderState::effective_center`] while the player position is still
    /// being interpolated towards its latest sample.
    pub fn drawn_center(&self) -> Vector2 {
        self.camera_override
            .or_else(|| self.last_draw.as_ref().map(|drawn| drawn.viewport.center))
            .unwrap_or_else(|| self.player_position())
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom.at(&self.effective_center())
    }

    pub fn zoom_by(&mut self, delta: f64) {
        let center = self.effective_center();
        self.zoom.zoom_by(&center, delta);
    }
}
