use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::constants::LOOP_TIME;
use crate::formatter;
use crate::game::Game;

/// Drives a [`Game`] at a fixed frame rate.
///
/// In realtime mode frames are paced to [`LOOP_TIME`] with a precise sleep and measured with
/// the wall clock. Otherwise every frame advances exactly one `LOOP_TIME` step, as fast as possible.
pub struct App {
    pub game: Game,
    last_tick: Instant,
    realtime: bool,
}

impl App {
    pub fn new(game: Game, realtime: bool) -> Self {
        info!(realtime, "Application ready");
        App {
            game,
            last_tick: Instant::now(),
            realtime,
        }
    }

    /// Runs one frame. Returns `false` once the game asked to exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let dt = if self.realtime {
            self.last_tick.elapsed().as_secs_f32()
        } else {
            LOOP_TIME.as_secs_f32()
        };
        self.last_tick = start;

        formatter::increment_tick();

        if self.game.tick(dt) {
            debug!("Exit flag set, stopping loop");
            return false;
        }

        if self.realtime {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        }

        true
    }
}
