//! This module contains all the constants used in the game.

use std::time::Duration;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The default level layout: one row of whitespace-separated tile ids per line.
pub const RAW_LEVEL: &str = include_str!("../assets/level.txt");

/// Player movement speed, in world units per second.
pub const PLAYER_SPEED: f32 = 2.0;

pub mod session {
    /// Countdown length of a round, in seconds.
    pub const TIME_LIMIT: f32 = 120.0;
    pub const MAX_LIVES: u8 = 3;

    /// The plant catalog. Catalog position is the plant id.
    pub const PLANT_NAMES: [&str; 8] = [
        "Rafflesia Arnoldii",
        "Ginger",
        "Orchid",
        "Protea",
        "Agapanthus",
        "Mustard",
        "Nightshade",
        "Pimpernel",
    ];
}

pub mod streaming {
    use glam::Vec2;

    /// Visible window around the player, in tiles.
    pub const VIEW_WIDTH: u32 = 10;
    pub const VIEW_HEIGHT: u32 = 6;
    /// World size of one tile.
    pub const CELL_SIZE: f32 = 1.0;
    /// World position of tile (0, 0).
    pub const MAP_OFFSET: Vec2 = Vec2::ZERO;
}

pub mod wander {
    pub const MOVE_SPEED: f32 = 1.0;
    /// Distance at which a snake chases the player instead of picking a random heading.
    pub const DETECTION_RANGE: f32 = 5.0;
    pub const IDLE_MIN: f32 = 1.0;
    pub const IDLE_MAX: f32 = 2.0;
    pub const MOVE_MIN: f32 = 2.0;
    pub const MOVE_MAX: f32 = 5.0;
    /// Per-frame displacement below which a moving snake counts as stuck.
    pub const STUCK_DISTANCE: f32 = 0.01;
    /// Accumulated stuck time that forces a new heading, in seconds.
    pub const STUCK_TIMEOUT: f32 = 0.5;
}

/// Collider sizes, in world units.
pub mod collider {
    pub const PLAYER: f32 = 0.8;
    pub const SNAKE: f32 = 0.8;
    pub const PLANT: f32 = 0.6;
}

/// Tile kinds of the default level, indexed by tile id: `(name, solid)`.
pub const TILE_KINDS: [(&str, bool); 5] = [("grass", false), ("water", true), ("rock", true), ("path", false), ("tree", true)];

/// Spawn points of the default level. Tile (row, col) sits at world `(col, -row)`.
pub mod level {
    use glam::Vec2;

    pub const PLAYER_START: Vec2 = Vec2::new(2.0, -1.0);

    pub const SNAKE_STARTS: [Vec2; 3] = [Vec2::new(18.0, -4.0), Vec2::new(8.0, -11.0), Vec2::new(20.0, -13.0)];

    /// `(plant id, position)` pairs, one of each catalog plant.
    pub const PLANTS: [(u32, Vec2); 8] = [
        (0, Vec2::new(21.0, -1.0)),
        (1, Vec2::new(7.0, -4.0)),
        (2, Vec2::new(13.0, -11.0)),
        (3, Vec2::new(2.0, -13.0)),
        (4, Vec2::new(19.0, -9.0)),
        (5, Vec2::new(9.0, -6.0)),
        (6, Vec2::new(5.0, -10.0)),
        (7, Vec2::new(14.0, -14.0)),
    ];
}

/// Fallback display name for a plant id outside the catalog.
pub const UNKNOWN_PLANT: &str = "Plant";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_level_rows_share_width() {
        let widths: Vec<usize> = RAW_LEVEL.lines().map(|line| line.split_whitespace().count()).collect();
        assert!(!widths.is_empty());
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_every_catalog_plant_spawns() {
        for id in 0..session::PLANT_NAMES.len() as u32 {
            assert!(level::PLANTS.iter().any(|(plant, _)| *plant == id), "plant {id} has no spawn");
        }
    }

    #[test]
    fn test_catalog_is_large_enough() {
        assert!(session::PLANT_NAMES.len() >= 2);
    }
}
