//! Redraw cadence driven by the host's animation frames.
//!
//! The scheduler re-arms itself on every frame it is handed, but only lets a
//! redraw through when at least `min_frame_time` has passed since the last
//! accepted one. With a high resampling rate that degrades to the display
//! refresh rate; with a low one the minimap redraws a few times per position
//! update. Cancellation is cooperative: `stop` clears the armed flag, and a
//! frame the host had already queued is swallowed when it arrives. At most
//! one frame is ever outstanding, so a loop restarted before that frame
//! arrives adopts it instead of requesting a second one.

use crate::core::config::FrameTimingConfig;
use crate::rendering::Renderer;

/// Something that can deliver an animation frame callback later.
pub trait FrameHost {
    /// Ask for [`FrameScheduler::on_animation_frame`] to be called on the
    /// next available frame. Every request must eventually be delivered.
    fn request_animation_frame(&mut self);
}

/// What happened on one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Enough time passed, an unforced redraw was issued
    Redrawn,
    /// Too early, only re-armed
    Throttled,
    /// The scheduler was stopped; nothing was done
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    timing: FrameTimingConfig,
    armed: bool,
    /// A requested frame has not arrived yet
    frame_pending: bool,
    last_timestamp: f64,
    frames_seen: u64,
    redraws: u64,
}

impl FrameScheduler {
    pub fn new(timing: FrameTimingConfig) -> Self {
        Self {
            timing,
            armed: false,
            frame_pending: false,
            last_timestamp: 0.0,
            frames_seen: 0,
            redraws: 0,
        }
    }

    pub fn timing(&self) -> FrameTimingConfig {
        self.timing
    }

    pub fn min_frame_time(&self) -> f64 {
        self.timing.min_frame_time_ms()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Unforced redraws issued since construction.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Arms the loop. `now` is the host clock in milliseconds, the same clock
    /// frame timestamps are measured with.
    pub fn start(&mut self, now: f64, host: &mut dyn FrameHost) {
        if self.armed {
            return;
        }
        self.armed = true;
        self.last_timestamp = now;
        log::debug!(
            "frame scheduler started (min frame time {:.2}ms)",
            self.min_frame_time()
        );
        if !self.frame_pending {
            self.request_frame(host);
        }
    }

    /// Prevents any further re-arming. An already requested frame still
    /// arrives but is ignored.
    pub fn stop(&mut self) {
        if self.armed {
            log::debug!("frame scheduler stopped after {} redraws", self.redraws);
        }
        self.armed = false;
    }

    /// Tears the loop down and starts a new one when the timing inputs
    /// changed. Returns whether a restart happened.
    pub fn reconfigure(
        &mut self,
        timing: FrameTimingConfig,
        now: f64,
        host: &mut dyn FrameHost,
    ) -> bool {
        if timing == self.timing {
            return false;
        }
        let was_armed = self.armed;
        self.stop();
        self.timing = timing;
        if was_armed {
            self.start(now, host);
        }
        true
    }

    /// Animation frame callback. `time` is the high resolution frame
    /// timestamp in milliseconds.
    pub fn on_animation_frame(
        &mut self,
        time: f64,
        renderer: &mut dyn Renderer,
        host: &mut dyn FrameHost,
    ) -> FrameOutcome {
        self.frame_pending = false;
        if !self.armed {
            return FrameOutcome::Cancelled;
        }
        self.frames_seen += 1;

        let outcome = if time - self.last_timestamp >= self.min_frame_time() {
            self.last_timestamp = time;
            self.redraws += 1;
            renderer.redraw(false);
            FrameOutcome::Redrawn
        } else {
            FrameOutcome::Throttled
        };

        self.request_frame(host);
        outcome
    }

    fn request_frame(&mut self, host: &mut dyn FrameHost) {
        self.frame_pending = true;
        host.request_animation_frame();
    }
}
