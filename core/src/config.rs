use serde::{Deserialize, Serialize};

use crate::*;

/// Level number, the first level is 1.
pub type Level = u32;

/// Settings for a game session, usually derived from the play area of the front end.
///
/// Level `n` uses square tiles of `base_tile_size / n` pixels (never below one pixel), so the maze
/// dimensions grow as the player advances.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Width of the play area in pixels.
    pub maze_width: u32,
    /// Height of the play area in pixels.
    pub maze_height: u32,
    /// Tile edge on the first level.
    pub base_tile_size: u32,
    /// Fixed seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            maze_width: Self::DEFAULT_MAZE_WIDTH,
            maze_height: Self::DEFAULT_MAZE_HEIGHT,
            base_tile_size: Self::DEFAULT_BASE_TILE_SIZE,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// 1280x720 window minus a 100 px margin.
    pub const DEFAULT_MAZE_WIDTH: u32 = 1180;
    pub const DEFAULT_MAZE_HEIGHT: u32 = 620;
    pub const DEFAULT_BASE_TILE_SIZE: u32 = 100;

    /// Parses a JSON config, missing fields keep their defaults.
    ///
    /// ```
    /// use mazegame_core::SessionConfig;
    ///
    /// let config = SessionConfig::from_json_str(r#"{ "seed": 7 }"#).unwrap();
    /// assert_eq!(config.seed, Some(7));
    /// assert_eq!(config.dimensions_for_level(1), (6, 11));
    /// ```
    pub fn from_json_str(json: &str) -> core::result::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every level this config can produce is a valid maze size.
    ///
    /// The first level has the fewest cells, later levels bottom out at one pixel per tile.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.dimensions_for_level(1);
        checked_size(rows, cols)?;
        checked_size(self.maze_height as usize, self.maze_width as usize)?;
        Ok(())
    }

    pub fn tile_size_for_level(&self, level: Level) -> u32 {
        (self.base_tile_size / level.max(1)).max(1)
    }

    /// Maze `(rows, cols)` for `level`.
    pub fn dimensions_for_level(&self, level: Level) -> (usize, usize) {
        let tile = self.tile_size_for_level(level);
        (
            (self.maze_height / tile) as usize,
            (self.maze_width / tile) as usize,
        )
    }
}
