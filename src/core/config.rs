//! Game configuration.
//!
//! Defaults reproduce the standard game: a 9x9 board, a 52-step time
//! track, 5 starting buttons, a 3-patch purchase window, nine button
//! checkpoints and five bonus-patch checkpoints.
//!
//! Configuration can be built in code with the `with_*` builders or loaded
//! from JSON; missing fields fall back to the defaults.
//!
//! ```
//! use patchwork_engine::core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{"seed": 7, "catalog": {"kind": "fixed"}}"#).unwrap();
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.track_length, 52);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::BOARD_SIZE;
use crate::offer::WINDOW_SIZE;
use crate::patches::{CatalogError, CatalogSource, REWARD_ID_BASE};
use crate::rules::ScoringRule;

/// Last step of the standard time track.
pub const TRACK_LENGTH: u32 = 52;

/// Buttons each player starts with.
pub const INITIAL_BUTTONS: i32 = 5;

/// Track positions that pay out the banked income.
pub const BUTTON_CHECKPOINTS: [u32; 9] = [5, 11, 17, 23, 29, 34, 40, 46, 52];

/// Track positions that grant a 1x1 bonus patch to the first arrival.
pub const BONUS_PATCH_CHECKPOINTS: [u32; 5] = [26, 32, 37, 43, 49];

/// Largest board side; shapes are limited to the same bound.
pub const MAX_BOARD_SIZE: usize = u8::MAX as usize;

/// Upper bound on starting buttons.
pub const MAX_INITIAL_BUTTONS: i32 = 1_000_000;

/// Upper bound on the per-cell penalty of `ScoringRule::EmptyCellPenalty`.
pub const MAX_CELL_PENALTY: i32 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("board size must be at least 1")]
    EmptyBoard,
    #[error("board size {0} exceeds {max}", max = MAX_BOARD_SIZE)]
    BoardTooLarge(usize),
    #[error("initial buttons {0} outside 0..={max}", max = MAX_INITIAL_BUTTONS)]
    InitialButtonsOutOfRange(i32),
    #[error("empty-cell penalty {0} outside 0..={max}", max = MAX_CELL_PENALTY)]
    PenaltyOutOfRange(i32),
    #[error("track length must be at least 1")]
    EmptyTrack,
    #[error("offer window must show at least 1 patch")]
    EmptyWindow,
    #[error("{kind} checkpoints must be strictly increasing")]
    UnorderedCheckpoints { kind: &'static str },
    #[error("{kind} checkpoint {position} lies outside 1..={track_length}")]
    CheckpointOutOfRange {
        kind: &'static str,
        position: u32,
        track_length: u32,
    },
    #[error("checkpoint {0} is both a button and a bonus-patch checkpoint")]
    OverlappingCheckpoint(u32),
    #[error("bonus-patch checkpoint {0} must lie strictly between the first and last button checkpoint")]
    BonusOutsideButtonRange(u32),
    #[error("track length {0} would push bonus patch ids out of their reserved range")]
    TrackTooLong(u32),
    #[error("random catalog of {0} patches would reach the reserved id range")]
    CatalogTooLarge(usize),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of each player's board.
    pub board_size: usize,

    /// Final position of the time track.
    pub track_length: u32,

    /// Buttons each player starts with.
    pub initial_buttons: i32,

    /// Number of purchasable patches after the marker.
    pub window_size: usize,

    /// Positions that pay out banked income.
    pub button_checkpoints: Vec<u32>,

    /// Positions that grant a bonus patch to the first arrival.
    pub bonus_checkpoints: Vec<u32>,

    /// Where the offer track's patches come from.
    pub catalog: CatalogSource,

    /// End-of-game scoring rule.
    pub scoring: ScoringRule,

    /// Seed for random and shuffled catalogs.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            track_length: TRACK_LENGTH,
            initial_buttons: INITIAL_BUTTONS,
            window_size: WINDOW_SIZE,
            button_checkpoints: BUTTON_CHECKPOINTS.to_vec(),
            bonus_checkpoints: BONUS_PATCH_CHECKPOINTS.to_vec(),
            catalog: CatalogSource::default(),
            scoring: ScoringRule::default(),
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the catalog source.
    #[must_use]
    pub fn with_catalog(mut self, catalog: CatalogSource) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the scoring rule.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRule) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting buttons.
    #[must_use]
    pub fn with_initial_buttons(mut self, buttons: i32) -> Self {
        self.initial_buttons = buttons;
        self
    }

    /// Check structural constraints.
    ///
    /// Custom catalogs are checked when the rules engine is built, since
    /// that is where the shapes are parsed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.track_length == 0 {
            return Err(ConfigError::EmptyTrack);
        }
        if self.window_size == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge(self.board_size));
        }
        if self.track_length >= u32::MAX - REWARD_ID_BASE {
            return Err(ConfigError::TrackTooLong(self.track_length));
        }
        if !(0..=MAX_INITIAL_BUTTONS).contains(&self.initial_buttons) {
            return Err(ConfigError::InitialButtonsOutOfRange(self.initial_buttons));
        }
        if let ScoringRule::EmptyCellPenalty { per_cell } = self.scoring {
            if !(0..=MAX_CELL_PENALTY).contains(&per_cell) {
                return Err(ConfigError::PenaltyOutOfRange(per_cell));
            }
        }

        self.check_checkpoints("button", &self.button_checkpoints)?;
        self.check_checkpoints("bonus-patch", &self.bonus_checkpoints)?;

        let buttons: FxHashSet<u32> = self.button_checkpoints.iter().copied().collect();
        if let Some(&overlap) = self.bonus_checkpoints.iter().find(|p| buttons.contains(*p)) {
            return Err(ConfigError::OverlappingCheckpoint(overlap));
        }

        if let (Some(&first), Some(&last)) = (self.button_checkpoints.first(), self.button_checkpoints.last()) {
            if let Some(&outside) = self.bonus_checkpoints.iter().find(|&&p| p <= first || p >= last) {
                return Err(ConfigError::BonusOutsideButtonRange(outside));
            }
        }

        if let CatalogSource::Random { count } = self.catalog {
            if count >= REWARD_ID_BASE as usize {
                return Err(ConfigError::CatalogTooLarge(count));
            }
        }

        Ok(())
    }

    fn check_checkpoints(&self, kind: &'static str, positions: &[u32]) -> Result<(), ConfigError> {
        if positions.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::UnorderedCheckpoints { kind });
        }
        if let Some(&position) = positions.iter().find(|&&p| p == 0 || p > self.track_length) {
            return Err(ConfigError::CheckpointOutOfRange {
                kind,
                position,
                track_length: self.track_length,
            });
        }
        Ok(())
    }
}
