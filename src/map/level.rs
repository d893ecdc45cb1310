use glam::Vec2;

use crate::constants::{self, RAW_LEVEL};
use crate::map::builder::TileSet;
use crate::systems::inventory::PlantId;

/// Where a collectible plant appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantSpawn {
    pub id: PlantId,
    pub position: Vec2,
}

/// Everything needed to populate a world: the map text, its tile kinds and spawn points.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub map_text: String,
    pub tile_set: TileSet,
    pub player_start: Vec2,
    pub snake_starts: Vec<Vec2>,
    pub plants: Vec<PlantSpawn>,
}

impl Default for Level {
    fn default() -> Self {
        Self {
            map_text: RAW_LEVEL.to_string(),
            tile_set: TileSet::default(),
            player_start: constants::level::PLAYER_START,
            snake_starts: constants::level::SNAKE_STARTS.to_vec(),
            plants: constants::level::PLANTS
                .iter()
                .map(|&(id, position)| PlantSpawn { id, position })
                .collect(),
        }
    }
}

impl Level {
    /// Replaces the map text, keeping tile kinds and spawn points.
    pub fn with_map_text(mut self, map_text: impl Into<String>) -> Self {
        self.map_text = map_text.into();
        self
    }
}
