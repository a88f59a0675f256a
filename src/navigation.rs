//! Navigation target gate
//!
//! The navigation target itself belongs to an external navigation module.
//! The minimap only reads it and decides, on a middle-click, whether the
//! click toggles the current target off or places a new one.

use crate::core::constants::NAV_TOGGLE_SQUARED_DISTANCE;
use crate::core::geo::{squared_distance, Vector2};

/// The single global navigation target.
pub trait NavigationModule {
    fn nav_target(&self) -> Option<Vector2>;

    /// Route from `from` to `to`, replacing any previous target.
    fn set_nav(&mut self, from: Vector2, to: Vector2);

    fn reset_nav(&mut self);
}

/// Plain in-memory navigation module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleTargetNavigation {
    route: Option<(Vector2, Vector2)>,
}

impl SingleTargetNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Origin the current route was set from.
    pub fn origin(&self) -> Option<Vector2> {
        self.route.map(|(from, _)| from)
    }
}

impl NavigationModule for SingleTargetNavigation {
    fn nav_target(&self) -> Option<Vector2> {
        self.route.map(|(_, to)| to)
    }

    fn set_nav(&mut self, from: Vector2, to: Vector2) {
        self.route = Some((from, to));
    }

    fn reset_nav(&mut self) {
        self.route = None;
    }
}

/// What a navigation click did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavToggle {
    Cleared,
    Set(Vector2),
}

/// Applies a navigation click at world point `clicked`.
///
/// Clicking close to the existing target clears it; anywhere else sets a new
/// target routed from the player.
pub fn toggle_nav_target(
    navigation: &mut dyn NavigationModule,
    player_position: Vector2,
    clicked: Vector2,
) -> NavToggle {
    let near_target = navigation
        .nav_target()
        .map(|target| squared_distance(&target, &clicked) < NAV_TOGGLE_SQUARED_DISTANCE)
        .unwrap_or(false);

    if near_target {
        navigation.reset_nav();
        log::info!("navigation target cleared");
        NavToggle::Cleared
    } else {
        navigation.set_nav(player_position, clicked);
        log::info!("navigation target set to ({:.1}, {:.1})", clicked.x, clicked.y);
        NavToggle::Set(clicked)
    }
}
