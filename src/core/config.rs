//! User-facing minimap settings and the window context the minimap runs in.
//!
//! Settings arrive as JSON from the host's settings store and are validated
//! once on load; everything downstream treats them as well-formed.

use crate::core::constants::{DEFAULT_POSITION_UPDATE_RATE_MS, DEFAULT_RESAMPLING_RATE};
use crate::{MinimapError, Result};
use serde::{Deserialize, Serialize};

/// Which application window hosts the minimap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowVariant {
    /// Standalone desktop window: pan-drag and toolbar are available
    Desktop,
    /// In-game window: zoom hotkeys are registered
    InGame,
    /// Any other overlay window
    Overlay,
}

impl WindowVariant {
    pub fn allows_pan_drag(self) -> bool {
        matches!(self, Self::Desktop)
    }

    pub fn shows_toolbar(self) -> bool {
        matches!(self, Self::Desktop)
    }

    pub fn registers_hotkeys(self) -> bool {
        matches!(self, Self::InGame)
    }
}

/// Whether the canvas is drawn on a transparent overlay surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceKind {
    #[default]
    Opaque,
    Transparent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationMode {
    None,
    #[default]
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinimapSettings {
    /// Zoom distance away from towns
    pub zoom_level: f64,
    /// Zoom distance near a town
    pub town_zoom_level: f64,
    /// Rotate the map so that up follows the player heading
    pub compass_mode: bool,
    /// Publish the player position to the friend server
    pub share_location: bool,
    pub friend_server_url: String,
    pub animation_interpolation: InterpolationMode,
    /// Redraws per position update
    pub resampling_rate: f64,
    pub position_update_rate_ms: f64,
    /// Labels are always drawn, so hover labels are skipped
    pub show_text: bool,
    pub icon_scale: f64,
}

impl Default for MinimapSettings {
    fn default() -> Self {
        Self {
            zoom_level: 4.0,
            town_zoom_level: 2.0,
            compass_mode: false,
            share_location: false,
            friend_server_url: String::new(),
            animation_interpolation: InterpolationMode::Linear,
            resampling_rate: DEFAULT_RESAMPLING_RATE,
            position_update_rate_ms: DEFAULT_POSITION_UPDATE_RATE_MS,
            show_text: false,
            icon_scale: 1.0,
        }
    }
}

impl MinimapSettings {
    /// Parses settings from JSON and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).map_err(MinimapError::from)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self).map_err(MinimapError::from)?)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("zoomLevel", self.zoom_level),
            ("townZoomLevel", self.town_zoom_level),
            ("resamplingRate", self.resampling_rate),
            ("positionUpdateRateMs", self.position_update_rate_ms),
            ("iconScale", self.icon_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MinimapError::InvalidSettings(format!(
                    "{name} must be a positive number, got {value}"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Compass rotation only applies to transparent overlay surfaces.
    pub fn compass_active(&self, surface: SurfaceKind) -> bool {
        self.compass_mode && surface == SurfaceKind::Transparent
    }

    pub fn interpolation_enabled(&self) -> bool {
        self.animation_interpolation != InterpolationMode::None
    }

    pub fn frame_timing(&self) -> FrameTimingConfig {
        FrameTimingConfig {
            update_interval_ms: self.position_update_rate_ms,
            resampling_rate: self.resampling_rate,
            interpolation: self.animation_interpolation,
        }
    }
}

/// The inputs of the redraw cadence. The frame scheduler restarts whenever
/// any of them changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTimingConfig {
    pub update_interval_ms: f64,
    pub resampling_rate: f64,
    pub interpolation: InterpolationMode,
}

impl FrameTimingConfig {
    /// Minimum time between two accepted animation frames.
    pub fn min_frame_time_ms(&self) -> f64 {
        self.update_interval_ms / self.resampling_rate
    }
}

impl Default for FrameTimingConfig {
    fn default() -> Self {
        MinimapSettings::default().frame_timing()
    }
}
