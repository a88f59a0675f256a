pub mod interpolation;
pub mod scheduler;

// Re-export commonly used types and functions for convenience
pub use interpolation::{PositionSample, PositionTrack};
pub use scheduler::{FrameHost, FrameOutcome, FrameScheduler};
