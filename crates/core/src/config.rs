//! Game configuration
//!
//! Defaults are the standard rules (60 seconds, 20 moves). Every field can be
//! overridden from the environment:
//!
//! - `MATCH3_SEED`: fixed RNG seed (default: OS entropy)
//! - `MATCH3_TIME_LIMIT`: starting seconds in timed mode (default: 60)
//! - `MATCH3_MOVE_LIMIT`: starting moves in move-limited mode (default: 20)
//! - `MATCH3_MAX_CASCADE`: cascade pass limit (default: 100)
//! - `MATCH3_STAGE_CASCADES`: hold the busy lock until the presenter finishes
//!   staging a cascade ("1"/"true")

use crate::types::{GameMode, MAX_CASCADE_PASSES, MOVE_LIMIT, TIME_LIMIT_SECS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub time_limit_secs: u32,
    pub move_limit: u32,
    pub max_cascade_passes: u32,
    pub stage_cascades: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            time_limit_secs: TIME_LIMIT_SECS,
            move_limit: MOVE_LIMIT,
            max_cascade_passes: MAX_CASCADE_PASSES,
            stage_cascades: false,
        }
    }
}

impl GameConfig {
    /// Default configuration with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (environment, tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("MATCH3_SEED").and_then(|s| s.parse().ok());
        let time_limit_secs = get("MATCH3_TIME_LIMIT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.time_limit_secs)
            .max(1);
        let move_limit = get("MATCH3_MOVE_LIMIT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.move_limit)
            .max(1);
        let max_cascade_passes = get("MATCH3_MAX_CASCADE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_cascade_passes)
            .max(1);
        let stage_cascades = get("MATCH3_STAGE_CASCADES")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.stage_cascades);

        Self {
            seed,
            time_limit_secs,
            move_limit,
            max_cascade_passes,
            stage_cascades,
        }
    }

    /// Starting resource for `mode` (seconds or moves)
    pub fn starting_remaining(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Timed => self.time_limit_secs,
            GameMode::MoveLimited => self.move_limit,
        }
    }
}
