//! Fixed table of towns and the nearest-town lookup that picks a zoom policy.

use crate::core::config::MinimapSettings;
use crate::core::constants::TOWN_ZOOM_SQUARED_DISTANCE;
use crate::core::geo::{squared_distance, Vector2};
use serde::Serialize;

/// A named world position. The table below is the only source of landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Landmark {
    pub name: &'static str,
    pub position: Vector2,
}

impl Landmark {
    pub const fn new(name: &'static str, x: f64, y: f64) -> Self {
        Self {
            name,
            position: Vector2::new(x, y),
        }
    }
}

/// Town centers in world coordinates, in lookup order.
pub const TOWN_LOCATIONS: &[Landmark] = &[
    Landmark::new("cutlass_keys", 7935.0, 1916.0),
    Landmark::new("first_light", 8859.0, 711.0),
    Landmark::new("windsward", 9346.0, 2700.0),
    Landmark::new("monarchs_bluff", 7361.0, 3714.0),
    Landmark::new("reekwater", 11006.0, 3290.0),
    Landmark::new("everfall", 8913.0, 4222.0),
    Landmark::new("ebonscale_reach", 7281.0, 5390.0),
    Landmark::new("brightwood", 9596.0, 6341.0),
    Landmark::new("weavers_fen", 11447.0, 5341.0),
    Landmark::new("restless_shore", 12993.0, 4430.0),
    Landmark::new("mourningdale", 13179.0, 6970.0),
];

/// Result of [`nearest_landmark`]. `distance` is squared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestLandmark {
    pub name: &'static str,
    pub distance: f64,
}

impl NearestLandmark {
    /// Whether the town zoom policy applies at this distance.
    pub fn is_in_town(&self) -> bool {
        self.distance <= TOWN_ZOOM_SQUARED_DISTANCE
    }
}

/// Closest town to `position` in [`TOWN_LOCATIONS`].
pub fn nearest_landmark(position: &Vector2) -> NearestLandmark {
    nearest_in(TOWN_LOCATIONS, position)
}

/// Linear scan keeping the first landmark on ties. An empty table yields
/// `"none"` at infinite distance.
pub fn nearest_in(table: &[Landmark], position: &Vector2) -> NearestLandmark {
    let mut nearest = NearestLandmark {
        name: "none",
        distance: f64::INFINITY,
    };

    for landmark in table {
        let distance = squared_distance(position, &landmark.position);
        if distance < nearest.distance {
            nearest = NearestLandmark {
                name: landmark.name,
                distance,
            };
        }
    }

    nearest
}

/// Which configured zoom distance applies around a world position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPolicy {
    Town,
    OpenWorld,
}

impl ZoomPolicy {
    pub fn at(position: &Vector2) -> Self {
        if nearest_landmark(position).is_in_town() {
            Self::Town
        } else {
            Self::OpenWorld
        }
    }

    pub fn zoom_level(self, settings: &MinimapSettings) -> f64 {
        match self {
            Self::Town => settings.town_zoom_level,
            Self::OpenWorld => settings.zoom_level,
        }
    }
}

/// Zoom distance the renderer uses when centered on `center`.
pub fn zoom_level_at(center: &Vector2, settings: &MinimapSettings) -> f64 {
    ZoomPolicy::at(center).zoom_level(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_town_position() {
        let result = nearest_landmark(&Vector2::new(8913.0, 4222.0));
        assert_eq!(result.name, "everfall");
        assert_eq!(result.distance, 0.0);
        assert!(result.is_in_town());
    }

    #[test]
    fn test_every_town_resolves_to_itself() {
        let towns = [
            ("cutlass_keys", 7935.0, 1916.0),
            ("first_light", 8859.0, 711.0),
            ("windsward", 9346.0, 2700.0),
            ("monarchs_bluff", 7361.0, 3714.0),
            ("reekwater", 11006.0, 3290.0),
            ("everfall", 8913.0, 4222.0),
            ("ebonscale_reach", 7281.0, 5390.0),
            ("brightwood", 9596.0, 6341.0),
            ("weavers_fen", 11447.0, 5341.0),
            ("restless_shore", 12993.0, 4430.0),
            ("mourningdale", 13179.0, 6970.0),
        ];
        assert_eq!(TOWN_LOCATIONS.len(), towns.len());
        for (landmark, (name, x, y)) in TOWN_LOCATIONS.iter().zip(towns) {
            assert_eq!(landmark.name, name);
            let result = nearest_landmark(&Vector2::new(x, y));
            assert_eq!(result.name, name);
            assert_eq!(result.distance, 0.0);
        }
    }

    #[test]
    fn test_distance_is_table_minimum() {
        let probes = [
            Vector2::new(0.0, 0.0),
            Vector2::new(10000.0, 3000.0),
            Vector2::new(13000.0, 7000.0),
            Vector2::new(-5000.0, 99999.0),
        ];
        for probe in &probes {
            let result = nearest_landmark(probe);
            let minimum = TOWN_LOCATIONS
                .iter()
                .map(|l| squared_distance(probe, &l.position))
                .fold(f64::INFINITY, f64::min);
            assert_eq!(result.distance, minimum);
            let expected = TOWN_LOCATIONS
                .iter()
                .find(|l| squared_distance(probe, &l.position) == minimum)
                .map(|l| l.name);
            assert_eq!(Some(result.name), expected);
        }
    }

    #[test]
    fn test_ties_keep_first_in_table_order() {
        let table = [
            Landmark::new("west", -10.0, 0.0),
            Landmark::new("east", 10.0, 0.0),
            Landmark::new("north", 0.0, 10.0),
        ];
        let result = nearest_in(&table, &Vector2::ZERO);
        assert_eq!(result.name, "west");
        assert_eq!(result.distance, 100.0);
    }

    #[test]
    fn test_empty_table() {
        let result = nearest_in(&[], &Vector2::new(1.0, 1.0));
        assert_eq!(result.name, "none");
        assert!(result.distance.is_infinite());
        assert!(!result.is_in_town());
    }

    #[test]
    fn test_zoom_policy() {
        let settings = MinimapSettings {
            zoom_level: 6.0,
            town_zoom_level: 2.0,
            ..MinimapSettings::default()
        };
        assert_eq!(zoom_level_at(&Vector2::new(9346.0, 2750.0), &settings), 2.0);
        assert_eq!(zoom_level_at(&Vector2::new(100.0, 100.0), &settings), 6.0);
        assert_eq!(ZoomPolicy::at(&Vector2::new(7935.0, 1916.0)), ZoomPolicy::Town);
    }
}
