//! Prelude module for common minimap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use minimap::prelude::*;`

pub use crate::core::{
    builder::MinimapBuilder,
    command::{MinimapCommand, MinimapHandle, PositionUpdate},
    config::{FrameTimingConfig, InterpolationMode, MinimapSettings, SurfaceKind, WindowVariant},
    geo::{rotate_around, squared_distance, Vector2},
    landmarks::{nearest_landmark, Landmark, NearestLandmark, ZoomPolicy},
    minimap::{Minimap, MountEnvironment},
    viewport::{canvas_to_world, Viewport},
};

pub use crate::input::{
    events::{EventHandled, InputEvent, MouseButton, PointerEvent, PointerType, WheelEvent},
    handler::{DragSession, InteractionController},
};

pub use crate::animation::{
    interpolation::PositionTrack,
    scheduler::{FrameHost, FrameOutcome, FrameScheduler},
};

pub use crate::rendering::{DrawParameters, HeadlessRenderer, RenderState, Renderer};

pub use crate::navigation::{NavToggle, NavigationModule, SingleTargetNavigation};

pub use crate::friends::{FriendData, FriendLocationService, HttpFriendLocationService};

pub use crate::traits::{
    CanvasSurface, CommandPort, HotkeyManager, HoverLabelPainter, MarkerSource, MemoryStore,
    PersistentStore, PositionEventSource, Registration, TileStatusSource,
};

pub use crate::runtime::{runtime, AsyncHandle, AsyncSpawner};

pub use crate::{Error as MinimapError, Result};

pub use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
