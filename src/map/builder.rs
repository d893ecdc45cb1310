//! Spawning tile instances from a parsed grid.

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource, world::World};
use glam::IVec2;
use tracing::{debug, warn};

use crate::constants::TILE_KINDS;
use crate::error::MapError;
use crate::map::parser::{TileGrid, TileId};
use crate::systems::components::{Collider, EntityType, Position, Solid, Visibility};

/// One kind of tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePrototype {
    pub name: String,
    pub solid: bool,
}

/// The tile kinds of a level. A kind's position in the set is its [`TileId`].
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    prototypes: Vec<TilePrototype>,
}

impl TileSet {
    pub fn new(prototypes: Vec<TilePrototype>) -> Self {
        Self { prototypes }
    }

    /// Pairs names with solidity flags. Names without a flag are not solid.
    pub fn from_flags<S: Into<String>>(names: impl IntoIterator<Item = S>, solid_flags: &[bool]) -> Self {
        let prototypes = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| TilePrototype {
                name: name.into(),
                solid: solid_flags.get(index).copied().unwrap_or(false),
            })
            .collect();
        Self { prototypes }
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&TilePrototype> {
        self.prototypes.get(usize::from(id))
    }

    pub fn is_solid(&self, id: TileId) -> bool {
        self.get(id).is_some_and(|prototype| prototype.solid)
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::new(
            TILE_KINDS
                .iter()
                .map(|(name, solid)| TilePrototype {
                    name: name.to_string(),
                    solid: *solid,
                })
                .collect(),
        )
    }
}

/// A built tile instance.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub coord: IVec2,
    pub kind: TileId,
}

#[derive(Bundle)]
pub struct TileBundle {
    pub tile: Tile,
    pub position: Position,
    pub visibility: Visibility,
    pub entity_type: EntityType,
}

/// Spawns one hidden instance per occupied cell and records it in the grid.
///
/// Solid kinds get a static [`Collider`] the size of a cell. Returns the number of
/// instances spawned. A grid can only be built once.
pub fn build_tiles(world: &mut World, grid: &mut TileGrid, tile_set: &TileSet) -> Result<usize, MapError> {
    if grid.is_built() {
        return Err(MapError::AlreadyBuilt);
    }

    let occupied: Vec<(IVec2, TileId)> = grid.occupied().collect();
    let mut spawned = 0;
    let mut solid = 0;

    for (coord, kind) in occupied {
        let Some(prototype) = tile_set.get(kind) else {
            warn!(kind, row = coord.y, col = coord.x, "Tile kind missing from tile set, skipping");
            continue;
        };

        let mut instance = world.spawn(TileBundle {
            tile: Tile { coord, kind },
            position: Position(grid.world_position(coord)),
            visibility: Visibility::hidden(),
            entity_type: EntityType::Tile,
        });
        if prototype.solid {
            instance.insert((
                Solid,
                Collider {
                    size: grid.cell_size(),
                },
            ));
            solid += 1;
        }

        grid.record_instance(coord, instance.id());
        spawned += 1;
    }

    debug!(spawned, solid, "Built tile instances");
    Ok(spawned)
}
