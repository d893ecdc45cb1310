//! Tile maps: text parsing, instance building and the default level.

pub mod builder;
pub mod direction;
pub mod level;
pub mod parser;

pub use builder::{build_tiles, Tile, TilePrototype, TileSet};
pub use level::{Level, PlantSpawn};
pub use parser::{TileGrid, TileId};
