use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;

use crate::systems::inventory::PlantId;
use crate::systems::wander::Wanderer;

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A tag component denoting the type of entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Player,
    Snake,
    Plant,
    Tile,
}

/// World position, Y axis up.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Position at the start of the current frame, used to undo moves into solid tiles.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct PreviousPosition(pub Vec2);

/// Spawn point, restored on restart.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct InitialPosition(pub Vec2);

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

/// Movement speed in world units per second.
#[derive(Component, Debug, Clone, Copy)]
pub struct Movable {
    pub speed: f32,
}

/// Square collision box centered on the entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct Collider {
    pub size: f32,
}

impl Collider {
    /// Axis-aligned overlap test between two square boxes.
    pub fn overlaps(&self, position: Vec2, other: &Collider, other_position: Vec2) -> bool {
        let reach = (self.size + other.size) / 2.0;
        let delta = (position - other_position).abs();
        delta.x < reach && delta.y < reach
    }
}

/// Static obstacle. Only visible solids block movement.
#[derive(Component, Debug, Default)]
pub struct Solid;

/// Movement lock. Frozen entities keep their velocity at zero and are skipped by integration.
#[derive(Component, Debug, Default)]
pub struct Frozen;

/// Whether a host should draw the entity. Hidden tiles also stop colliding.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility(pub bool);

impl Visibility {
    pub fn visible() -> Self {
        Self(true)
    }

    pub fn hidden() -> Self {
        Self(false)
    }

    pub fn is_visible(&self) -> bool {
        self.0
    }
}

/// A collectible plant.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub previous: PreviousPosition,
    pub initial: InitialPosition,
    pub velocity: Velocity,
    pub movable: Movable,
    pub collider: Collider,
    pub entity_type: EntityType,
}

impl PlayerBundle {
    pub fn new(position: Vec2, speed: f32, size: f32) -> Self {
        Self {
            player: PlayerControlled,
            position: Position(position),
            previous: PreviousPosition(position),
            initial: InitialPosition(position),
            velocity: Velocity::default(),
            movable: Movable { speed },
            collider: Collider { size },
            entity_type: EntityType::Player,
        }
    }
}

#[derive(Bundle)]
pub struct SnakeBundle {
    pub wanderer: Wanderer,
    pub position: Position,
    pub previous: PreviousPosition,
    pub initial: InitialPosition,
    pub velocity: Velocity,
    pub collider: Collider,
    pub entity_type: EntityType,
}

impl SnakeBundle {
    pub fn new(wanderer: Wanderer, position: Vec2, size: f32) -> Self {
        Self {
            wanderer,
            position: Position(position),
            previous: PreviousPosition(position),
            initial: InitialPosition(position),
            velocity: Velocity::default(),
            collider: Collider { size },
            entity_type: EntityType::Snake,
        }
    }
}

#[derive(Bundle)]
pub struct PlantBundle {
    pub plant: Plant,
    pub position: Position,
    pub collider: Collider,
    pub entity_type: EntityType,
}

impl PlantBundle {
    pub fn new(plant: Plant, position: Vec2, size: f32) -> Self {
        Self {
            plant,
            position: Position(position),
            collider: Collider { size },
            entity_type: EntityType::Plant,
        }
    }
}

#[derive(Resource, Default)]
pub struct GlobalState {
    pub exit: bool,
}

/// Frame timing. `seconds` is the length of the current frame, `ticks` counts frames run.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime {
    pub seconds: f32,
    pub ticks: u64,
}
