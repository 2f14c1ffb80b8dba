use std::path::PathBuf;

use crate::error::MazeError;

pub const DEFAULT_WIDTH: usize = 9;
pub const DEFAULT_HEIGHT: usize = 11;
/// 25 generation steps per second.
pub const DEFAULT_TICK_MS: u64 = 40;
pub const DEFAULT_RENDER_FPS: u64 = 60;
/// Largest side a host will draw; keeps terminal coordinates inside `u16`.
pub const MAX_DIMENSION: usize = 4096;

/// Runtime settings, read from `MAZE_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub tick_ms: u64,
    pub render_fps: u64,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            tick_ms: DEFAULT_TICK_MS,
            render_fps: DEFAULT_RENDER_FPS,
            log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Missing, unparseable or zero
    /// values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
        };
        let defaults = Self::default();
        Self {
            width: positive("MAZE_WIDTH").map_or(defaults.width, |v| v as usize),
            height: positive("MAZE_HEIGHT").map_or(defaults.height, |v| v as usize),
            seed: lookup("MAZE_SEED").and_then(|v| v.trim().parse::<u64>().ok()),
            tick_ms: positive("MAZE_TICK_MS").unwrap_or(defaults.tick_ms),
            render_fps: positive("MAZE_FPS").unwrap_or(defaults.render_fps),
            log_path: lookup("MAZE_LOG").filter(|v| !v.is_empty()).map(PathBuf::from),
        }
    }

    pub fn validate(&self) -> Result<(), MazeError> {
        let in_range = |side: usize| (3..=MAX_DIMENSION).contains(&side);
        if !in_range(self.width) || !in_range(self.height) {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
