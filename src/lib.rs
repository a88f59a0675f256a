//! # Minimap
//!
//! Core of a real-time 2D game minimap: world/canvas projection, pan, zoom
//! and compass rotation, pointer gestures, navigation target placement and a
//! throttled redraw loop that smooths the player between position updates.
//!
//! Pixel drawing, tile caching, hotkeys, persistence and the native bridge
//! are external collaborators reached through the traits in [`traits`].

pub mod animation;
pub mod core;
pub mod friends;
pub mod input;
pub mod navigation;
pub mod prelude;
pub mod rendering;
pub mod runtime;
pub mod status;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::MinimapBuilder,
    command::{MinimapCommand, MinimapHandle, PositionUpdate},
    config::{MinimapSettings, SurfaceKind, WindowVariant},
    geo::{rotate_around, squared_distance, Vector2},
    landmarks::{nearest_landmark, NearestLandmark},
    minimap::{Minimap, MountEnvironment},
    viewport::{canvas_to_world, Viewport},
};

pub use crate::input::{events::InputEvent, handler::InteractionController};

pub use crate::animation::scheduler::{FrameHost, FrameOutcome, FrameScheduler};

pub use crate::rendering::{HeadlessRenderer, Renderer};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MinimapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Bridge error: {0}")]
    Bridge(String),
}

/// Error type alias for convenience
pub type Error = MinimapError;

/// Routes `log` output to stderr, filtered by `RUST_LOG`. Safe to call more
/// than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(cfg!(test))
        .try_init();
}
