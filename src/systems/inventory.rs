use std::collections::HashMap;

use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::With,
    resource::Resource,
    system::{Commands, Query, ResMut},
};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::{
    events::GameEvent,
    map::level::PlantSpawn,
    systems::{
        audio::{AudioEvent, Cue},
        components::{Plant, PlayerControlled},
    },
};

/// Catalog index of a plant.
pub type PlantId = u32;

/// Collected plant counts.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: HashMap<PlantId, u32>,
}

impl Inventory {
    /// Records one more plant of this id.
    pub fn add(&mut self, id: PlantId) {
        *self.counts.entry(id).or_insert(0) += 1;
    }

    /// How many plants of this id were collected, 0 if none.
    pub fn count(&self, id: PlantId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Non-zero counts, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (PlantId, u32)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }
}

/// Plant spawn points of the loaded level, replayed on restart.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlantSpawns(pub Vec<PlantSpawn>);

/// Collects plants the player touched this frame.
///
/// A plant is counted once even when several contacts with it arrive in the same frame,
/// since its despawn only applies after the system finishes.
pub fn pickup_system(
    mut commands: Commands,
    mut collision_events: EventReader<GameEvent>,
    mut inventory: ResMut<Inventory>,
    player_query: Query<Entity, With<PlayerControlled>>,
    plant_query: Query<&Plant>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    let mut collected: SmallVec<[Entity; 4]> = SmallVec::new();

    for event in collision_events.read() {
        let GameEvent::Collision(entity1, entity2) = *event else {
            continue;
        };

        let plant_entity = if player_query.contains(entity1) {
            entity2
        } else if player_query.contains(entity2) {
            entity1
        } else {
            continue;
        };

        let Ok(plant) = plant_query.get(plant_entity) else {
            continue;
        };

        if collected.contains(&plant_entity) {
            trace!(entity = ?plant_entity, "Plant already collected this frame");
            continue;
        }
        collected.push(plant_entity);

        inventory.add(plant.id);
        info!(plant = %plant.name, id = plant.id, count = inventory.count(plant.id), "Plant collected");

        commands.entity(plant_entity).despawn();
        audio_events.write(AudioEvent::PlayCue(Cue::Pickup));
    }

    if !collected.is_empty() {
        debug!(collected = collected.len(), total = inventory.total(), "Pickups processed");
    }
}
