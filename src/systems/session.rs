//! The timed collection round: stage machine, lives and the required plant pair.

use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::{Has, With},
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use strum_macros::AsRefStr;
use tracing::{debug, info, trace, warn};

use crate::{
    config::SessionConfig,
    constants::{collider, UNKNOWN_PLANT},
    error::ConfigError,
    events::{GameCommand, GameEvent},
    map::level::PlantSpawn,
    rng::{GameRng, RandomSource},
    systems::{
        audio::{AudioEvent, Cue},
        collision::ContactTracker,
        components::{DeltaTime, Frozen, InitialPosition, Plant, PlantBundle, PlayerControlled, Position, PreviousPosition, Velocity},
        input::PlayerInput,
        inventory::{Inventory, PlantId, PlantSpawns},
        wander::Wanderer,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FailureReason {
    Time,
    Lives,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure(FailureReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStage {
    #[default]
    NotStarted,
    Playing,
    Ended(Outcome),
}

/// The two distinct plants the player must collect this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredPair {
    pub first: PlantId,
    pub second: PlantId,
}

impl RequiredPair {
    pub fn contains(&self, id: PlantId) -> bool {
        self.first == id || self.second == id
    }
}

/// Result of [`SessionController::lose_life`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLoss {
    /// No lives left to lose.
    Ignored,
    Lost { remaining: u8 },
    /// The last life was lost and the session ended.
    Depleted,
}

/// Picks two distinct catalog indices, each uniform over `[0, catalog_len)`.
///
/// Redraws both until they differ. A catalog with fewer than 2 plants is rejected.
pub fn select_required_items(catalog_len: usize, rng: &mut dyn RandomSource) -> Result<RequiredPair, ConfigError> {
    if catalog_len < 2 {
        return Err(ConfigError::CatalogTooSmall(catalog_len));
    }
    loop {
        let first = rng.index(catalog_len);
        let second = rng.index(catalog_len);
        if first != second {
            return Ok(RequiredPair {
                first: first as PlantId,
                second: second as PlantId,
            });
        }
        trace!(first, "Drew the same plant twice, redrawing");
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SessionController {
    config: SessionConfig,
    stage: SessionStage,
    time_remaining: f32,
    lives: u8,
    required: RequiredPair,
}

impl SessionController {
    pub fn new(config: SessionConfig, rng: &mut dyn RandomSource) -> Result<Self, ConfigError> {
        config.validate()?;
        let required = select_required_items(config.catalog.len(), rng)?;
        debug!(first = required.first, second = required.second, "Required plants selected");
        Ok(Self {
            stage: SessionStage::NotStarted,
            time_remaining: config.time_limit,
            lives: config.max_lives,
            required,
            config,
        })
    }

    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    pub fn is_playing(&self) -> bool {
        self.stage == SessionStage::Playing
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.stage {
            SessionStage::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn time_limit(&self) -> f32 {
        self.config.time_limit
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn max_lives(&self) -> u8 {
        self.config.max_lives
    }

    pub fn required(&self) -> RequiredPair {
        self.required
    }

    pub fn catalog(&self) -> &[String] {
        &self.config.catalog
    }

    pub fn plant_name(&self, id: PlantId) -> &str {
        self.config.catalog.get(id as usize).map_or(UNKNOWN_PLANT, String::as_str)
    }

    /// NotStarted to Playing. Returns whether the stage changed.
    pub fn start(&mut self) -> bool {
        if self.stage != SessionStage::NotStarted {
            return false;
        }
        self.stage = SessionStage::Playing;
        info!(
            first = self.plant_name(self.required.first),
            second = self.plant_name(self.required.second),
            "Session started"
        );
        true
    }

    /// Counts the timer down and checks for an outcome. Only runs while playing.
    ///
    /// Running out of time is checked before success, so collecting the second plant on the
    /// frame the timer expires still fails.
    pub fn tick(&mut self, dt: f32, inventory: &Inventory) -> Option<Outcome> {
        if !self.is_playing() {
            return None;
        }

        self.time_remaining -= dt;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            let outcome = Outcome::Failure(FailureReason::Time);
            self.end(outcome);
            return Some(outcome);
        }

        if inventory.count(self.required.first) >= 1 && inventory.count(self.required.second) >= 1 {
            self.end(Outcome::Success);
            return Some(Outcome::Success);
        }
        None
    }

    /// Takes one life. Losing the last one ends the session with a lives failure.
    pub fn lose_life(&mut self) -> LifeLoss {
        if self.lives == 0 {
            return LifeLoss::Ignored;
        }
        self.lives -= 1;
        if self.lives == 0 {
            self.end(Outcome::Failure(FailureReason::Lives));
            return LifeLoss::Depleted;
        }
        LifeLoss::Lost { remaining: self.lives }
    }

    /// Moves to Ended. Returns false, changing nothing, if the session already ended.
    pub fn end(&mut self, outcome: Outcome) -> bool {
        if matches!(self.stage, SessionStage::Ended(_)) {
            trace!(?outcome, "Session already ended");
            return false;
        }
        self.stage = SessionStage::Ended(outcome);
        true
    }

    /// Back to NotStarted with a full timer, full lives and a new pair.
    pub fn restart(&mut self, rng: &mut dyn RandomSource) {
        self.time_remaining = self.config.time_limit;
        self.lives = self.config.max_lives;
        // The catalog was validated in `new`, so a redraw only fails if that check is bypassed.
        match select_required_items(self.config.catalog.len(), rng) {
            Ok(required) => self.required = required,
            Err(error) => warn!(%error, "Keeping the previous required plants"),
        }
        self.stage = SessionStage::NotStarted;
        debug!(first = self.required.first, second = self.required.second, "Session reset");
    }
}

pub fn plant_bundle(spawn: &PlantSpawn, session: &SessionController) -> PlantBundle {
    PlantBundle::new(
        Plant {
            id: spawn.id,
            name: session.plant_name(spawn.id).to_string(),
        },
        spawn.position,
        collider::PLANT,
    )
}

/// Presentation effects of a session ending: music off, result cue, player frozen.
fn apply_end(
    outcome: Outcome,
    commands: &mut Commands,
    players: impl IntoIterator<Item = Entity>,
    audio_events: &mut EventWriter<AudioEvent>,
) {
    match outcome {
        Outcome::Success => info!("Session won"),
        Outcome::Failure(reason) => info!(reason = reason.as_ref(), "Session lost"),
    }

    audio_events.write(AudioEvent::StopMusic);
    audio_events.write(AudioEvent::PlayCue(match outcome {
        Outcome::Success => Cue::Success,
        Outcome::Failure(_) => Cue::Failure,
    }));

    for player in players {
        commands.entity(player).insert(Frozen);
    }
}

/// Handles the start and restart buttons.
#[allow(clippy::too_many_arguments)]
pub fn session_command_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    mut session: ResMut<SessionController>,
    mut rng: ResMut<GameRng>,
    mut inventory: ResMut<Inventory>,
    mut contacts: ResMut<ContactTracker>,
    mut input: ResMut<PlayerInput>,
    spawns: Res<PlantSpawns>,
    mut mover_query: Query<(
        Entity,
        &mut Position,
        &mut PreviousPosition,
        &InitialPosition,
        &mut Velocity,
        Option<&mut Wanderer>,
        Has<PlayerControlled>,
    )>,
    plant_query: Query<Entity, With<Plant>>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    let mut restarted = false;

    for event in events.read() {
        match event {
            GameEvent::Command(GameCommand::Start) => {
                if !session.start() {
                    debug!(stage = ?session.stage(), "Start ignored");
                    continue;
                }
                audio_events.write(AudioEvent::StartMusic);
                for (entity, .., is_player) in mover_query.iter() {
                    if is_player {
                        commands.entity(entity).remove::<Frozen>();
                    }
                }
            }
            GameEvent::Command(GameCommand::Restart) => {
                // Plant respawns are deferred, so a second restart in one frame would duplicate them.
                if restarted {
                    debug!("Restart already applied this frame");
                    continue;
                }
                restarted = true;
                info!(stage = ?session.stage(), "Restarting session");
                session.restart(&mut *rng);
                inventory.clear();
                contacts.clear();
                input.0 = Vec2::ZERO;
                audio_events.write(AudioEvent::StopMusic);

                for (entity, mut position, mut previous, initial, mut velocity, wanderer, is_player) in mover_query.iter_mut() {
                    position.0 = initial.0;
                    previous.0 = initial.0;
                    velocity.0 = Vec2::ZERO;
                    if let Some(mut wanderer) = wanderer {
                        wanderer.reset(&mut *rng);
                    }
                    if is_player {
                        commands.entity(entity).insert(Frozen);
                    }
                }

                let mut removed = 0;
                for plant in plant_query.iter() {
                    commands.entity(plant).despawn();
                    removed += 1;
                }
                for spawn in spawns.0.iter() {
                    commands.spawn(plant_bundle(spawn, &session));
                }
                debug!(removed, spawned = spawns.0.len(), "Plants respawned");
            }
            _ => {}
        }
    }
}

/// Counts the session timer down and applies the outcome when the round ends.
pub fn session_tick_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    mut session: ResMut<SessionController>,
    inventory: Res<Inventory>,
    player_query: Query<Entity, With<PlayerControlled>>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    if let Some(outcome) = session.tick(delta_time.seconds, &inventory) {
        apply_end(outcome, &mut commands, player_query.iter(), &mut audio_events);
    }
}

/// Costs the player a life when a contact with a wandering agent begins during play.
pub fn damage_system(
    mut commands: Commands,
    mut collision_events: EventReader<GameEvent>,
    mut session: ResMut<SessionController>,
    player_query: Query<Entity, With<PlayerControlled>>,
    agent_query: Query<(), With<Wanderer>>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    for event in collision_events.read() {
        let GameEvent::Collision(entity1, entity2) = *event else {
            continue;
        };

        let agent = if player_query.contains(entity1) {
            entity2
        } else if player_query.contains(entity2) {
            entity1
        } else {
            continue;
        };
        if !agent_query.contains(agent) {
            continue;
        }

        if !session.is_playing() {
            trace!(?agent, stage = ?session.stage(), "Contact outside of play, no damage");
            continue;
        }

        match session.lose_life() {
            LifeLoss::Ignored => warn!("Damage with no lives left"),
            LifeLoss::Lost { remaining } => {
                info!(remaining, "Life lost");
                audio_events.write(AudioEvent::PlayCue(Cue::LoseLife));
            }
            LifeLoss::Depleted => {
                info!("Last life lost");
                audio_events.write(AudioEvent::PlayCue(Cue::LoseLife));
                apply_end(
                    Outcome::Failure(FailureReason::Lives),
                    &mut commands,
                    player_query.iter(),
                    &mut audio_events,
                );
            }
        }
    }
}
