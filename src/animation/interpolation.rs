use crate::core::config::InterpolationMode;
use crate::core::geo::Vector2;
use instant::Instant;
use std::time::Duration;

/// A position reported by the game at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub position: Vector2,
    pub at: Instant,
}

/// The two most recent position samples.
///
/// Position updates arrive at a fixed, slow cadence. Redraws happen much more
/// often, so the displayed position walks from the previous sample to the
/// latest one over one update interval instead of jumping.
#[derive(Debug, Clone, Default)]
pub struct PositionTrack {
    previous: Option<PositionSample>,
    current: Option<PositionSample>,
}

impl PositionTrack {
    pub fn starting_at(position: Vector2) -> Self {
        Self {
            previous: None,
            current: Some(PositionSample {
                position,
                at: Instant::now(),
            }),
        }
    }

    pub fn push(&mut self, position: Vector2, at: Instant) {
        self.previous = self.current.take();
        self.current = Some(PositionSample { position, at });
    }

    pub fn latest(&self) -> Vector2 {
        self.current.map(|s| s.position).unwrap_or_default()
    }

    pub fn previous(&self) -> Option<Vector2> {
        self.previous.map(|s| s.position)
    }

    /// Progress through the current update interval, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant, interval: Duration) -> f64 {
        let Some(current) = self.current else {
            return 1.0;
        };
        if interval.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(current.at);
        (elapsed.as_secs_f64() / interval.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Position to display at `now`.
    pub fn interpolate(&self, now: Instant, interval: Duration, mode: InterpolationMode) -> Vector2 {
        match (mode, self.previous, self.current) {
            (InterpolationMode::Linear, Some(previous), Some(current)) => previous
                .position
                .lerp(&current.position, self.progress(now, interval)),
            _ => self.latest(),
        }
    }
}
