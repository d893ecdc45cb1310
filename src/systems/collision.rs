use std::collections::HashSet;

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::{With, Without},
    resource::Resource,
    system::{Query, Res, ResMut},
};
use glam::IVec2;
use tracing::trace;

use crate::{
    events::{GameEvent, SolidCollision},
    map::parser::TileGrid,
    systems::components::{Collider, EntityType, PlayerControlled, Position, PreviousPosition, Solid, Visibility},
};

/// Player contacts seen last frame, so that only new contacts raise events.
#[derive(Resource, Debug, Default)]
pub struct ContactTracker {
    touching: HashSet<(Entity, Entity)>,
}

impl ContactTracker {
    pub fn is_touching(&self, player: Entity, other: Entity) -> bool {
        self.touching.contains(&(player, other))
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }
}

/// Pushes movers back out of visible solid tiles.
///
/// Only the 3x3 cells around a mover are checked, which holds while colliders are no
/// larger than a cell. One [`SolidCollision`] is emitted per blocked mover per frame.
pub fn solid_collision_system(
    grid: Res<TileGrid>,
    mut mover_query: Query<(Entity, &mut Position, &PreviousPosition, &Collider), Without<Solid>>,
    tile_query: Query<(&Position, &Collider, &Visibility), With<Solid>>,
    mut events: EventWriter<SolidCollision>,
) {
    for (entity, mut position, previous, collider) in mover_query.iter_mut() {
        let center = grid.tile_coord(position.0);

        let blocking = (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| center.saturating_add(IVec2::new(dx, dy))))
            .filter_map(|coord| grid.instance(coord))
            .find(|tile| {
                tile_query.get(*tile).is_ok_and(|(tile_position, tile_collider, visibility)| {
                    visibility.is_visible() && collider.overlaps(position.0, tile_collider, tile_position.0)
                })
            });

        if let Some(tile) = blocking {
            trace!(?entity, ?tile, "Blocked by solid tile");
            position.0 = previous.0;
            events.write(SolidCollision { entity, tile });
        }
    }
}

/// Detects the player starting to touch plants and snakes.
///
/// Emits one `GameEvent::Collision(player, other)` when a contact begins. Staying in
/// contact raises nothing further until the two separate and touch again.
pub fn collision_system(
    mut tracker: ResMut<ContactTracker>,
    player_query: Query<(Entity, &Position, &Collider), With<PlayerControlled>>,
    other_query: Query<(Entity, &Position, &Collider, &EntityType), (Without<PlayerControlled>, Without<Solid>)>,
    mut events: EventWriter<GameEvent>,
) {
    let mut touching = HashSet::new();

    for (player, player_position, player_collider) in player_query.iter() {
        for (other, other_position, other_collider, entity_type) in other_query.iter() {
            if !matches!(entity_type, EntityType::Plant | EntityType::Snake) {
                continue;
            }
            if !player_collider.overlaps(player_position.0, other_collider, other_position.0) {
                continue;
            }

            touching.insert((player, other));
            if !tracker.is_touching(player, other) {
                trace!(?player, ?other, kind = ?entity_type, "Contact started");
                events.write(GameEvent::Collision(player, other));
            }
        }
    }

    tracker.touching = touching;
}
