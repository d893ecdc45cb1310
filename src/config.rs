//! Runtime configuration. Every struct defaults to the values in [`crate::constants`].

use glam::Vec2;

use crate::constants;
use crate::error::ConfigError;
use crate::rng::RandomSource;

/// An inclusive `[min, max]` range of seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationRange {
    pub min: f32,
    pub max: f32,
}

impl DurationRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draws a uniform duration from the range.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> f32 {
        rng.range_f32(self.min, self.max)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min < 0.0 {
            return Err(ConfigError::NonPositive { name, value: self.min });
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Round length in seconds.
    pub time_limit: f32,
    pub max_lives: u8,
    /// Display names of the collectible plants; the index is the plant id.
    pub catalog: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: constants::session::TIME_LIMIT,
            max_lives: constants::session::MAX_LIVES,
            catalog: constants::session::PLANT_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.len() < 2 {
            return Err(ConfigError::CatalogTooSmall(self.catalog.len()));
        }
        if self.time_limit <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "time limit",
                value: self.time_limit,
            });
        }
        if self.max_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamingConfig {
    /// Window width, in tiles. Tiles within `view_width / 2` columns of the player are shown.
    pub view_width: u32,
    /// Window height, in tiles. Tiles within `view_height / 2` rows of the player are shown.
    pub view_height: u32,
    pub cell_size: f32,
    pub offset: Vec2,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            view_width: constants::streaming::VIEW_WIDTH,
            view_height: constants::streaming::VIEW_HEIGHT,
            cell_size: constants::streaming::CELL_SIZE,
            offset: constants::streaming::MAP_OFFSET,
        }
    }
}

impl StreamingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view_width == 0 || self.view_height == 0 {
            return Err(ConfigError::EmptyView {
                width: self.view_width,
                height: self.view_height,
            });
        }
        if self.cell_size <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "cell size",
                value: self.cell_size,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderConfig {
    pub move_speed: f32,
    pub detection_range: f32,
    pub idle_duration: DurationRange,
    pub move_duration: DurationRange,
}

impl Default for WanderConfig {
    fn default() -> Self {
        use constants::wander::*;
        Self {
            move_speed: MOVE_SPEED,
            detection_range: DETECTION_RANGE,
            idle_duration: DurationRange::new(IDLE_MIN, IDLE_MAX),
            move_duration: DurationRange::new(MOVE_MIN, MOVE_MAX),
        }
    }
}

impl WanderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.idle_duration.validate("idle duration")?;
        self.move_duration.validate("move duration")?;
        if self.move_speed < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "move speed",
                value: self.move_speed,
            });
        }
        Ok(())
    }
}

/// Top-level configuration handed to [`crate::game::Game::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub session: SessionConfig,
    pub streaming: StreamingConfig,
    pub wander: WanderConfig,
    pub player_speed: f32,
    /// Fixed RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            streaming: StreamingConfig::default(),
            wander: WanderConfig::default(),
            player_speed: constants::PLAYER_SPEED,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session.validate()?;
        self.streaming.validate()?;
        self.wander.validate()?;
        if self.player_speed < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "player speed",
                value: self.player_speed,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = GameConfig::default();
        config.wander.move_duration = DurationRange::new(5.0, 2.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                name: "move duration",
                min: 5.0,
                max: 2.0
            })
        );
    }

    #[test]
    fn test_small_catalog_rejected() {
        let mut config = GameConfig::default();
        config.session.catalog.truncate(1);
        assert_eq!(config.validate(), Err(ConfigError::CatalogTooSmall(1)));
    }

    #[test]
    fn test_zero_view_rejected() {
        let mut config = GameConfig::default();
        config.streaming.view_height = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyView { width: 10, height: 0 }));
    }
}
