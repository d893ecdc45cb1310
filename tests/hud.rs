use bevy_ecs::system::RunSystemOnce;
use forager::systems::{hud_system, progress_text, result_text, FailureReason, Hud, Inventory, Outcome, SessionController};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn run_hud(world: &mut bevy_ecs::world::World) -> Hud {
    world.run_system_once(hud_system).expect("System should run successfully");
    world.resource::<Hud>().clone()
}

#[test]
fn test_pre_start_layout() {
    let mut world = common::create_test_world();
    common::insert_test_session(&mut world);

    let hud = run_hud(&mut world);

    assert_eq!(hud.task_text, "Find the Ginger and Orchid in 2 minutes to finish the potion!");
    assert_that(&hud.task_panel).is_true();
    assert_that(&hud.start_button).is_true();
    assert_that(&hud.timer).is_false();
    assert_that(&hud.progress).is_false();
    assert_that(&hud.result).is_false();
    assert_that(&hud.restart_button).is_false();
    assert_eq!(hud.hearts, vec![true, true, true]);
}

#[test]
fn test_playing_layout_tracks_progress() {
    let mut world = common::create_test_world();
    common::insert_test_session(&mut world);
    {
        let mut session = world.resource_mut::<SessionController>();
        session.start();
        session.lose_life();
        session.tick(45.5, &Inventory::default());
    }
    world.resource_mut::<Inventory>().add(1);

    let hud = run_hud(&mut world);

    assert_that(&hud.task_panel).is_false();
    assert_that(&hud.timer).is_true();
    assert_that(&hud.progress).is_true();
    assert_eq!(hud.timer_text, "Time Left: 01:14");
    assert_eq!(hud.progress_text, "Ginger × 0    Orchid × 1");
    assert_eq!(hud.hearts, vec![true, true, false]);
}

#[test]
fn test_ended_layout_shows_result() {
    let mut world = common::create_test_world();
    common::insert_test_session(&mut world);
    {
        let mut session = world.resource_mut::<SessionController>();
        session.start();
        session.end(Outcome::Failure(FailureReason::Lives));
    }

    let hud = run_hud(&mut world);

    assert_that(&hud.result).is_true();
    assert_that(&hud.restart_button).is_true();
    assert_that(&hud.timer).is_true();
    assert_eq!(hud.result_text, "You ran out of lives!\nYou failed to gather the necessary plants.");
}

#[test]
fn test_result_texts_differ_per_outcome() {
    assert_that(&result_text(Outcome::Success).starts_with("Congratulations!")).is_true();
    assert_that(&result_text(Outcome::Failure(FailureReason::Time)).starts_with("Time's up!")).is_true();
}

#[test]
fn test_progress_text_format() {
    assert_eq!(progress_text("Protea", 2, "Mustard", 0), "Protea × 2    Mustard × 0");
}
