use bevy_ecs::{
    query::{Has, With},
    system::{Query, Res},
};

use crate::systems::{
    components::{DeltaTime, Frozen, Movable, PlayerControlled, Position, PreviousPosition, Velocity},
    input::PlayerInput,
};

/// Turns the held input axis into the player's velocity. Frozen players stand still.
pub fn player_velocity_system(
    input: Res<PlayerInput>,
    mut player_query: Query<(&mut Velocity, &Movable, Has<Frozen>), With<PlayerControlled>>,
) {
    for (mut velocity, movable, frozen) in player_query.iter_mut() {
        velocity.0 = if frozen {
            glam::Vec2::ZERO
        } else {
            input.0.normalize_or_zero() * movable.speed
        };
    }
}

/// Integrates velocities, remembering where each mover started the frame.
pub fn movement_system(
    delta_time: Res<DeltaTime>,
    mut query: Query<(&mut Position, &mut PreviousPosition, &Velocity, Has<Frozen>)>,
) {
    for (mut position, mut previous, velocity, frozen) in query.iter_mut() {
        previous.0 = position.0;
        if !frozen {
            position.0 += velocity.0 * delta_time.seconds;
        }
    }
}
