#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use bevy_ecs::query::With;
use forager::{
    app::App,
    config::GameConfig,
    constants::LOOP_TIME,
    events::GameCommand,
    game::Game,
    logging,
    map::Level,
    systems::{task_text, AudioResource, DeltaTime, LoggingAudio, Plant, PlayerControlled, Position},
};
use glam::Vec2;
use tracing::{info, warn};

const DEFAULT_MAX_SECONDS: f32 = 180.0;

struct Args {
    seed: Option<u64>,
    map: Option<PathBuf>,
    realtime: bool,
    max_seconds: f32,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        seed: None,
        map: None,
        realtime: false,
        max_seconds: DEFAULT_MAX_SECONDS,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().context("--seed needs a value")?;
                args.seed = Some(value.parse().with_context(|| format!("invalid seed: {value}"))?);
            }
            "--map" => args.map = Some(iter.next().context("--map needs a path")?.into()),
            "--realtime" => args.realtime = true,
            "--max-seconds" => {
                let value = iter.next().context("--max-seconds needs a value")?;
                args.max_seconds = value.parse().with_context(|| format!("invalid duration: {value}"))?;
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

/// Walks the player towards the nearest required plant still missing, one axis at a time.
///
/// Switches axis when the player made no progress last frame, which is enough to slide
/// around most single obstacles.
#[derive(Default)]
struct Autopilot {
    last_position: Option<Vec2>,
    prefer_vertical: bool,
}

impl Autopilot {
    fn steer(&mut self, game: &mut Game) -> Option<Vec2> {
        let required = game.session().required();
        let inventory = game.inventory().clone();

        let mut player_query = game.world.query_filtered::<&Position, With<PlayerControlled>>();
        let player = player_query.single(&game.world).ok()?.0;

        let mut plant_query = game.world.query::<(&Plant, &Position)>();
        let target = plant_query
            .iter(&game.world)
            .filter(|(plant, _)| required.contains(plant.id) && inventory.count(plant.id) == 0)
            .map(|(_, position)| position.0)
            .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))?;

        if self.last_position.is_some_and(|last| last.distance(player) < 1e-4) {
            self.prefer_vertical = !self.prefer_vertical;
        }
        self.last_position = Some(player);

        let delta = target - player;
        let vertical = Vec2::new(0.0, delta.y.signum());
        let horizontal = Vec2::new(delta.x.signum(), 0.0);
        let axis = match (self.prefer_vertical, delta.x.abs() < 0.05, delta.y.abs() < 0.05) {
            (_, true, _) => vertical,
            (_, _, true) => horizontal,
            (true, _, _) => vertical,
            (false, _, _) => horizontal,
        };
        Some(axis)
    }
}

fn main() -> anyhow::Result<()> {
    logging::setup_logging();
    let args = parse_args()?;

    let config = GameConfig {
        seed: args.seed,
        ..GameConfig::default()
    };

    let mut level = Level::default();
    if let Some(path) = &args.map {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading map {}", path.display()))?;
        level = level.with_map_text(text);
        info!(path = %path.display(), "Loaded custom map");
    }

    let mut game = Game::with_level(config, level)?;
    game.world.insert_resource(AudioResource::new(LoggingAudio::default()));

    let session = game.session();
    let required = session.required();
    let (first, second) = (session.plant_name(required.first), session.plant_name(required.second));
    info!("{}", task_text(first, second, session.time_limit()));

    let mut app = App::new(game, args.realtime);
    app.game.send(GameCommand::Start);

    let mut autopilot = Autopilot::default();
    let mut elapsed = 0.0;

    loop {
        if let Some(axis) = autopilot.steer(&mut app.game) {
            app.game.send(GameCommand::MovePlayer(axis));
        }
        if !app.run() {
            break;
        }
        elapsed += app.game.world.resource::<DeltaTime>().seconds;

        if let Some(outcome) = app.game.session().outcome() {
            let hud = app.game.hud();
            info!(?outcome, elapsed, lives = app.game.session().lives(), "{}", hud.result_text.replace('\n', " "));
            break;
        }
        if elapsed >= args.max_seconds {
            warn!(elapsed, "Simulation time limit reached");
            break;
        }
    }

    info!(frames = app.game.world.resource::<DeltaTime>().ticks, loop_ms = LOOP_TIME.as_millis() as u64, "Done");
    Ok(())
}
