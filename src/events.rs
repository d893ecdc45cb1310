use bevy_ecs::prelude::*;
use glam::Vec2;

/// Requests from the host (UI buttons, keyboard, autopilot).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameCommand {
    /// The start button.
    Start,
    /// The restart button on the result panel.
    Restart,
    /// Held movement axis. Persists until the next `MovePlayer`.
    MovePlayer(Vec2),
    ToggleMute,
    Exit,
}

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Command(GameCommand),
    /// Two entities started touching this frame.
    Collision(Entity, Entity),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// A mover was pushed back out of a visible solid tile.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolidCollision {
    pub entity: Entity,
    pub tile: Entity,
}
