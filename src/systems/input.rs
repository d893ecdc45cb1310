use bevy_ecs::{
    event::EventReader,
    resource::Resource,
    system::ResMut,
};
use glam::Vec2;
use tracing::{debug, info};

use crate::{
    events::{GameCommand, GameEvent},
    systems::{audio::AudioState, components::GlobalState},
};

/// The held movement axis, as last reported by the host.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput(pub Vec2);

/// Applies movement, mute and exit commands. Session commands are handled by the session systems.
pub fn input_system(
    mut events: EventReader<GameEvent>,
    mut input: ResMut<PlayerInput>,
    mut audio_state: ResMut<AudioState>,
    mut state: ResMut<GlobalState>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = *event else {
            continue;
        };
        match command {
            GameCommand::MovePlayer(axis) => {
                if input.0 != axis {
                    debug!(x = axis.x, y = axis.y, "Movement axis changed");
                    input.0 = axis;
                }
            }
            GameCommand::ToggleMute => {
                audio_state.muted = !audio_state.muted;
                info!(muted = audio_state.muted, "Audio mute toggled");
            }
            GameCommand::Exit => {
                info!("Exit requested");
                state.exit = true;
            }
            GameCommand::Start | GameCommand::Restart => {}
        }
    }
}
