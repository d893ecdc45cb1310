//! Text and panel state for a host UI to display.

use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};

use crate::systems::{
    inventory::Inventory,
    session::{FailureReason, Outcome, SessionController, SessionStage},
};

/// Everything the on-screen UI shows, rebuilt every frame.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    pub task_text: String,
    pub timer_text: String,
    pub progress_text: String,
    pub result_text: String,

    pub task_panel: bool,
    pub start_button: bool,
    pub timer: bool,
    pub progress: bool,
    pub result: bool,
    pub restart_button: bool,

    /// One entry per max life, `true` while that life remains.
    pub hearts: Vec<bool>,
}

/// `Time Left: MM:SS`, both fields floored.
pub fn timer_text(time_remaining: f32) -> String {
    let remaining = time_remaining.max(0.0);
    let minutes = (remaining / 60.0).floor() as u32;
    let seconds = (remaining % 60.0).floor() as u32;
    format!("Time Left: {minutes:02}:{seconds:02}")
}

fn describe_limit(time_limit: f32) -> String {
    let seconds = time_limit.round() as u32;
    match (seconds / 60, seconds % 60) {
        (1, 0) => "1 minute".to_string(),
        (minutes, 0) => format!("{minutes} minutes"),
        _ => format!("{seconds} seconds"),
    }
}

pub fn task_text(first: &str, second: &str, time_limit: f32) -> String {
    format!(
        "Find the {first} and {second} in {} to finish the potion!",
        describe_limit(time_limit)
    )
}

pub fn progress_text(first: &str, first_count: u32, second: &str, second_count: u32) -> String {
    format!("{first} × {first_count}    {second} × {second_count}")
}

pub fn result_text(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => "Congratulations!\nYou have successfully gathered the plants!",
        Outcome::Failure(FailureReason::Time) => "Time's up!\nYou failed to gather the necessary plants.",
        Outcome::Failure(FailureReason::Lives) => "You ran out of lives!\nYou failed to gather the necessary plants.",
    }
}

pub fn hud_system(session: Res<SessionController>, inventory: Res<Inventory>, mut hud: ResMut<Hud>) {
    let required = session.required();
    let (first, second) = (session.plant_name(required.first), session.plant_name(required.second));
    let stage = session.stage();

    let next = Hud {
        task_text: task_text(first, second, session.time_limit()),
        timer_text: timer_text(session.time_remaining()),
        progress_text: progress_text(first, inventory.count(required.first), second, inventory.count(required.second)),
        result_text: session.outcome().map(result_text).unwrap_or_default().to_string(),

        task_panel: stage == SessionStage::NotStarted,
        start_button: stage == SessionStage::NotStarted,
        timer: stage != SessionStage::NotStarted,
        progress: stage != SessionStage::NotStarted,
        result: matches!(stage, SessionStage::Ended(_)),
        restart_button: matches!(stage, SessionStage::Ended(_)),

        hearts: (0..session.max_lives()).map(|index| index < session.lives()).collect(),
    };

    if *hud != next {
        *hud = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_text_floors() {
        assert_eq!(timer_text(120.0), "Time Left: 02:00");
        assert_eq!(timer_text(59.99), "Time Left: 00:59");
        assert_eq!(timer_text(61.5), "Time Left: 01:01");
        assert_eq!(timer_text(0.0), "Time Left: 00:00");
    }

    #[test]
    fn test_task_text_uses_limit() {
        assert_eq!(
            task_text("Ginger", "Orchid", 120.0),
            "Find the Ginger and Orchid in 2 minutes to finish the potion!"
        );
        assert_eq!(
            task_text("Ginger", "Orchid", 90.0),
            "Find the Ginger and Orchid in 90 seconds to finish the potion!"
        );
    }
}
