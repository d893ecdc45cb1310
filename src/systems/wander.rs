//! Wandering agents (snakes).
//!
//! An agent alternates between idling in place and moving along one heading. When a phase
//! ends it either chases the player (if close enough) or picks a random cardinal heading.
//! Bumping into a solid tile, or making no progress for a while, forces a new heading.

use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::EventReader,
    query::{With, Without},
    system::{Query, Res, ResMut},
};
use glam::Vec2;
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::{
    config::WanderConfig,
    constants::wander::{STUCK_DISTANCE, STUCK_TIMEOUT},
    events::SolidCollision,
    map::direction::Direction,
    rng::{GameRng, RandomSource},
    systems::components::{DeltaTime, PlayerControlled, Position, Velocity},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WanderState {
    #[default]
    Idle,
    Moving,
}

#[derive(Component, Debug, Clone)]
pub struct Wanderer {
    pub config: WanderConfig,
    pub state: WanderState,
    /// Current heading. A unit cardinal vector, or an arbitrary unit vector when chasing.
    pub direction: Vec2,
    /// Time left in the current phase.
    pub phase_timer: f32,
    pub last_position: Vec2,
    pub stuck_timer: f32,
}

impl Wanderer {
    /// A new agent in the idle phase.
    pub fn new(config: WanderConfig, rng: &mut dyn RandomSource) -> Self {
        Self {
            config,
            state: WanderState::Idle,
            direction: Vec2::ZERO,
            phase_timer: config.idle_duration.sample(rng),
            last_position: Vec2::ZERO,
            stuck_timer: 0.0,
        }
    }

    /// Back to idle with a fresh timer. Velocity is cleared by the caller.
    pub fn reset(&mut self, rng: &mut dyn RandomSource) {
        self.state = WanderState::Idle;
        self.phase_timer = self.config.idle_duration.sample(rng);
        self.stuck_timer = 0.0;
    }

    /// Picks a random cardinal heading other than the current one.
    ///
    /// State and phase timer are left alone. A chase heading is not cardinal, so all four
    /// directions are candidates then.
    pub fn redirect(&mut self, rng: &mut dyn RandomSource) {
        let current = Direction::from_vec2(self.direction);
        let candidates: SmallVec<[Direction; 4]> = Direction::iter().filter(|d| Some(*d) != current).collect();
        let pick = candidates[rng.index(candidates.len())];
        trace!(from = ?current, to = pick.as_ref(), "Redirected");
        self.direction = pick.as_vec2();
    }

    fn random_heading(rng: &mut dyn RandomSource) -> Vec2 {
        let directions: SmallVec<[Direction; 4]> = Direction::iter().collect();
        directions[rng.index(directions.len())].as_vec2()
    }

    /// Advances the agent by `dt` and returns its velocity for this frame.
    pub fn step(&mut self, dt: f32, position: Vec2, player: Option<Vec2>, rng: &mut dyn RandomSource) -> Vec2 {
        match self.state {
            WanderState::Idle => {
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.direction = match player {
                        Some(target) if position.distance(target) <= self.config.detection_range => (target - position)
                            .try_normalize()
                            .unwrap_or_else(|| Self::random_heading(rng)),
                        _ => Self::random_heading(rng),
                    };
                    self.phase_timer = self.config.move_duration.sample(rng);
                    self.state = WanderState::Moving;
                    self.last_position = position;
                    self.stuck_timer = 0.0;
                    trace!(direction = ?self.direction, duration = self.phase_timer, "Started moving");
                }
                Vec2::ZERO
            }
            WanderState::Moving => {
                self.phase_timer -= dt;

                if position.distance(self.last_position) < STUCK_DISTANCE {
                    self.stuck_timer += dt;
                    if self.stuck_timer >= STUCK_TIMEOUT {
                        self.redirect(rng);
                        self.stuck_timer = 0.0;
                    }
                } else {
                    self.stuck_timer = 0.0;
                }
                self.last_position = position;

                if self.phase_timer <= 0.0 {
                    self.state = WanderState::Idle;
                    self.phase_timer = self.config.idle_duration.sample(rng);
                    return Vec2::ZERO;
                }

                self.direction * self.config.move_speed
            }
        }
    }
}

/// Redirects agents that bumped into solids, then steps every agent.
pub fn wander_system(
    delta_time: Res<DeltaTime>,
    mut rng: ResMut<GameRng>,
    mut collisions: EventReader<SolidCollision>,
    player_query: Query<&Position, With<PlayerControlled>>,
    mut agent_query: Query<(Entity, &Position, &mut Velocity, &mut Wanderer), Without<PlayerControlled>>,
) {
    for collision in collisions.read() {
        if let Ok((entity, _, _, mut wanderer)) = agent_query.get_mut(collision.entity) {
            debug!(?entity, tile = ?collision.tile, "Agent hit a solid tile");
            wanderer.redirect(&mut *rng);
        }
    }

    let player = player_query.single().ok().map(|position| position.0);

    for (_, position, mut velocity, mut wanderer) in agent_query.iter_mut() {
        velocity.0 = wanderer.step(delta_time.seconds, position.0, player, &mut *rng);
    }
}
