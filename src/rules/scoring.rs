//! End of game and final scoring.
//!
//! The game ends once both players have reached the end of the time track.
//! Scores are computed once, at that moment, by a `ScoringPolicy`.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap, PlayerState};

/// Buttons lost per empty board cell under the standard rule.
pub const EMPTY_CELL_PENALTY: i32 = 2;

/// Computes a player's final score.
///
/// Implement this to plug a house rule into `PatchworkRules::with_scoring`.
pub trait ScoringPolicy: std::fmt::Debug + Send + Sync {
    fn final_score(&self, player: &PlayerState) -> i32;
}

/// Built-in scoring rules, selectable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringRule {
    /// `buttons - empty_cells * per_cell`.
    EmptyCellPenalty { per_cell: i32 },
    /// `buttons + filled_cells`.
    FilledCells,
}

impl Default for ScoringRule {
    fn default() -> Self {
        ScoringRule::EmptyCellPenalty {
            per_cell: EMPTY_CELL_PENALTY,
        }
    }
}

impl ScoringPolicy for ScoringRule {
    fn final_score(&self, player: &PlayerState) -> i32 {
        let cells = |n: usize| i32::try_from(n).unwrap_or(i32::MAX);
        match *self {
            ScoringRule::EmptyCellPenalty { per_cell } => player
                .buttons()
                .saturating_sub(cells(player.empty_cells()).saturating_mul(per_cell)),
            ScoringRule::FilledCells => player.buttons().saturating_add(cells(player.filled_cells())),
        }
    }
}

/// Whether both players have reached the end of the track.
#[must_use]
pub fn is_game_over(one_time: u32, two_time: u32, track_length: u32) -> bool {
    one_time >= track_length && two_time >= track_length
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Equal scores.
    Draw,
}

impl GameResult {
    /// Compare final scores.
    #[must_use]
    pub fn from_scores(scores: &PlayerMap<i32>) -> Self {
        match scores[PlayerId::One].cmp(&scores[PlayerId::Two]) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::One),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::Two),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}
