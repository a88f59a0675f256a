//! Core constants for minimap interaction and scheduling.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// A pointer must move more than this many pixels on either axis before a
/// press turns into a pan.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Canvas pixels per world unit at zoom distance 1. One pixel of drag moves
/// the camera by `zoom / PAN_PIXELS_PER_WORLD_UNIT` world units.
pub const PAN_PIXELS_PER_WORLD_UNIT: f64 = 4.0;

/// Zoom buttons, hotkeys and the wheel all step by `zoom / ZOOM_STEP_DIVISOR`.
pub const ZOOM_STEP_DIVISOR: f64 = 5.0;

/// Wheel deltas are expressed in hundredths of a zoom step.
pub const WHEEL_DELTA_UNIT: f64 = 100.0;

/// Middle-clicking within this squared world distance of the current
/// navigation target clears it instead of placing a new one.
pub const NAV_TOGGLE_SQUARED_DISTANCE: f64 = 200.0;

/// Squared world distance to the nearest town under which the town zoom
/// level applies.
pub const TOWN_ZOOM_SQUARED_DISTANCE: f64 = 200.0 * 200.0;

/// Interval between two position updates from the game, in milliseconds.
pub const DEFAULT_POSITION_UPDATE_RATE_MS: f64 = 100.0;

/// Redraws per position update when interpolation is enabled.
pub const DEFAULT_RESAMPLING_RATE: f64 = 6.0;

/// Persistent store key holding the last known player position.
pub const LAST_KNOWN_POSITION_KEY: &str = "lastKnownPosition";

/// Name published to the friend service until the game reports one.
pub const DEFAULT_PLAYER_NAME: &str = "UnknownFriend";

/// Hotkey names registered by the in-game window.
pub const HOTKEY_ZOOM_IN: &str = "zoomIn";
pub const HOTKEY_ZOOM_OUT: &str = "zoomOut";

/// Zoom distances are kept within this range by zoom buttons, hotkeys and the wheel.
pub const MIN_ZOOM_LEVEL: f64 = 0.25;
pub const MAX_ZOOM_LEVEL: f64 = 64.0;
