//! Game rules.
//!
//! - `turn`: who acts next
//! - `rewards`: checkpoint payouts and bonus patches
//! - `scoring`: end of game and final scores
//! - `engine`: `PatchworkRules`, which applies intents to snapshots

pub mod engine;
pub mod rewards;
pub mod scoring;
pub mod turn;

pub use engine::{IntentError, PatchworkRules, Transition};
pub use rewards::{RewardSchedule, Rewards};
pub use scoring::{is_game_over, GameResult, ScoringPolicy, ScoringRule, EMPTY_CELL_PENALTY};
