#![allow(dead_code)]

use std::collections::VecDeque;

use bevy_ecs::{entity::Entity, event::Events, world::World};
use forager::{
    config::{SessionConfig, WanderConfig},
    constants::collider,
    events::{GameCommand, GameEvent, SolidCollision},
    rng::{GameRng, RandomSource},
    systems::{
        AudioEvent, AudioState, ContactTracker, DeltaTime, GlobalState, Hud, Inventory, PlantBundle, PlantSpawns, PlayerBundle,
        Plant, PlayerInput, SessionController, SnakeBundle, Wanderer,
    },
};
use glam::Vec2;

/// A random source that replays queued values. Empty queues yield `min` and index 0.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    floats: VecDeque<f32>,
    indices: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(floats: impl IntoIterator<Item = f32>, indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            floats: floats.into_iter().collect(),
            indices: indices.into_iter().collect(),
        }
    }

    pub fn with_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::new([], indices)
    }
}

impl RandomSource for ScriptedRandom {
    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        self.floats.pop_front().map_or(min, |value| value.clamp(min, max))
    }

    fn index(&mut self, len: usize) -> usize {
        self.indices.pop_front().map_or(0, |value| value % len)
    }
}

pub const DT: f32 = 1.0 / 60.0;

/// Creates a world with every resource and event queue the gameplay systems read.
pub fn create_test_world() -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<AudioEvent>::default());
    world.insert_resource(Events::<SolidCollision>::default());
    world.insert_resource(DeltaTime { seconds: DT, ticks: 0 });
    world.insert_resource(GameRng::new(ScriptedRandom::default()));
    world.insert_resource(Inventory::default());
    world.insert_resource(ContactTracker::default());
    world.insert_resource(PlayerInput::default());
    world.insert_resource(AudioState::default());
    world.insert_resource(GlobalState::default());
    world.insert_resource(Hud::default());
    world.insert_resource(PlantSpawns::default());

    world
}

pub fn test_catalog() -> Vec<String> {
    ["Ginger", "Orchid", "Protea", "Mustard"].iter().map(|s| s.to_string()).collect()
}

pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        time_limit: 120.0,
        max_lives: 3,
        catalog: test_catalog(),
    }
}

/// A session whose required pair is plants 0 and 1.
pub fn test_session() -> SessionController {
    let mut rng = ScriptedRandom::with_indices([0, 1]);
    SessionController::new(test_session_config(), &mut rng).unwrap()
}

pub fn insert_test_session(world: &mut World) {
    world.insert_resource(test_session());
}

pub fn spawn_test_player(world: &mut World, position: Vec2) -> Entity {
    world.spawn(PlayerBundle::new(position, 2.0, collider::PLAYER)).id()
}

pub fn spawn_test_snake(world: &mut World, position: Vec2) -> Entity {
    let wanderer = Wanderer::new(WanderConfig::default(), &mut ScriptedRandom::default());
    world.spawn(SnakeBundle::new(wanderer, position, collider::SNAKE)).id()
}

pub fn spawn_test_plant(world: &mut World, id: u32, position: Vec2) -> Entity {
    let plant = Plant {
        id,
        name: test_catalog().get(id as usize).cloned().unwrap_or_default(),
    };
    world.spawn(PlantBundle::new(plant, position, collider::PLANT)).id()
}

pub fn send_collision_event(world: &mut World, entity1: Entity, entity2: Entity) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(GameEvent::Collision(entity1, entity2));
}

pub fn send_command(world: &mut World, command: GameCommand) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(GameEvent::Command(command));
}

/// Drains the audio events written so far.
pub fn drain_audio(world: &mut World) -> Vec<AudioEvent> {
    world.resource_mut::<Events<AudioEvent>>().drain().collect()
}
