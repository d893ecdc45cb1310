//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::constants::collider;
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent, SolidCollision};
use crate::map::{build_tiles, Level, TileGrid};
use crate::rng::GameRng;
use crate::systems::{
    self, audio_system, collision_system, damage_system, hud_system, input_system, movement_system, pickup_system,
    player_velocity_system, session_command_system, session_tick_system, solid_collision_system, tile_visibility_system,
    wander_system, AudioEvent, AudioState, ContactTracker, DeltaTime, Frozen, GlobalState, Hud, Inventory, PlantSpawns,
    PlayerBundle, PlayerInput, SessionController, SnakeBundle, TileStreamer, Wanderer,
};

/// Frame phases, run in declaration order.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Host commands: buttons, movement axis, exit.
    Input,
    /// Integration and contact detection.
    Physics,
    /// Pickups, damage and wandering agents.
    Agents,
    /// Tile visibility around the player.
    Streaming,
    /// Timer, win and loss checks, HUD.
    Session,
    /// Audio dispatch.
    Present,
}

/// Core game state: an ECS `World` plus the `Schedule` that advances it one frame at a time.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds a game on the default level.
    pub fn new(config: GameConfig) -> GameResult<Game> {
        Self::with_level(config, Level::default())
    }

    /// Validates the configuration, builds the level's tiles and spawns the player, snakes and plants.
    ///
    /// The session starts in the not-started stage with the player frozen.
    pub fn with_level(config: GameConfig, level: Level) -> GameResult<Game> {
        config.validate()?;
        debug!(seed = ?config.seed, "Creating game world");

        let mut world = World::default();
        Self::setup_ecs(&mut world);

        let mut rng = GameRng::from_seed_or_os(config.seed);

        let mut grid = TileGrid::load(&level.map_text, level.tile_set.len())
            .with_layout(config.streaming.cell_size, config.streaming.offset);
        let tiles = build_tiles(&mut world, &mut grid, &level.tile_set)?;
        info!(rows = grid.rows(), cols = grid.cols(), tiles, "Level built");

        let session = SessionController::new(config.session.clone(), &mut rng)?;

        world
            .spawn(PlayerBundle::new(level.player_start, config.player_speed, collider::PLAYER))
            .insert(Frozen);

        for start in &level.snake_starts {
            let wanderer = Wanderer::new(config.wander, &mut rng);
            world.spawn(SnakeBundle::new(wanderer, *start, collider::SNAKE));
        }
        debug!(snakes = level.snake_starts.len(), "Snakes spawned");

        for spawn in &level.plants {
            if spawn.id as usize >= session.catalog().len() {
                return Err(GameError::InvalidState(format!("Plant spawn uses unknown plant id {}", spawn.id)));
            }
            world.spawn(systems::plant_bundle(spawn, &session));
        }
        debug!(plants = level.plants.len(), "Plants spawned");

        Self::insert_resources(&mut world, &config, grid, level, session, rng);

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        Self::configure_schedule(&mut schedule);

        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<AudioEvent>(world);
        EventRegistry::register_event::<SolidCollision>(world);
    }

    fn insert_resources(
        world: &mut World,
        config: &GameConfig,
        grid: TileGrid,
        level: Level,
        session: SessionController,
        rng: GameRng,
    ) {
        world.insert_resource(grid);
        world.insert_resource(level.tile_set);
        world.insert_resource(PlantSpawns(level.plants));
        world.insert_resource(session);
        world.insert_resource(rng);
        world.insert_resource(TileStreamer::new(config.streaming.view_width, config.streaming.view_height));
        world.insert_resource(Inventory::default());
        world.insert_resource(ContactTracker::default());
        world.insert_resource(PlayerInput::default());
        world.insert_resource(Hud::default());
        world.insert_resource(AudioState::default());
        world.insert_resource(GlobalState::default());
        world.insert_resource(DeltaTime::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                (input_system, session_command_system, player_velocity_system)
                    .chain()
                    .in_set(GameplaySet::Input),
                (movement_system, solid_collision_system, collision_system)
                    .chain()
                    .in_set(GameplaySet::Physics),
                (pickup_system, damage_system, wander_system)
                    .chain()
                    .in_set(GameplaySet::Agents),
                tile_visibility_system.in_set(GameplaySet::Streaming),
                (session_tick_system, hud_system).chain().in_set(GameplaySet::Session),
                audio_system.in_set(GameplaySet::Present),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Physics,
                    GameplaySet::Agents,
                    GameplaySet::Streaming,
                    GameplaySet::Session,
                    GameplaySet::Present,
                )
                    .chain(),
            );
    }

    /// Queues a host command for the next tick.
    pub fn send(&mut self, command: GameCommand) {
        trace!(?command, "Command queued");
        self.world.resource_mut::<Events<GameEvent>>().send(GameEvent::Command(command));
    }

    /// Runs one frame.
    ///
    /// # Returns
    ///
    /// `true` if the game should terminate (exit command received), `false` to continue
    pub fn tick(&mut self, dt: f32) -> bool {
        let ticks = self.world.get_resource::<DeltaTime>().map_or(0, |delta| delta.ticks) + 1;
        self.world.insert_resource(DeltaTime { seconds: dt, ticks });

        self.schedule.run(&mut self.world);

        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();
        self.world.resource_mut::<Events<SolidCollision>>().update();

        self.world.get_resource::<GlobalState>().is_some_and(|state| state.exit)
    }

    pub fn session(&self) -> &SessionController {
        self.world.resource::<SessionController>()
    }

    pub fn inventory(&self) -> &Inventory {
        self.world.resource::<Inventory>()
    }

    pub fn hud(&self) -> &Hud {
        self.world.resource::<Hud>()
    }
}
