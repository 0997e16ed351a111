//! Track checkpoint rewards.
//!
//! Two kinds of checkpoint sit on the time track:
//! - Button checkpoints pay out the player's banked income.
//! - Bonus-patch checkpoints grant a free 1x1 patch to the first player to
//!   land on them.
//!
//! Both pay only when a move ends exactly on the checkpoint. Moving over a
//! checkpoint pays nothing, and so does an intent that leaves the player
//! where they already stood.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, PlayerState};
use crate::patches::Patch;

/// Side effects of a move along the track.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rewards {
    /// Buttons paid out from the bank (0 if no payout).
    pub buttons: i32,
    /// Bonus patch granted, if any.
    pub bonus: Option<Patch>,
}

impl Rewards {
    /// Whether a button payout happened.
    #[must_use]
    pub fn paid_out(&self) -> bool {
        self.buttons > 0
    }
}

/// Checkpoint positions on the time track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSchedule {
    button_checkpoints: Vec<u32>,
    bonus_checkpoints: Vec<u32>,
}

impl RewardSchedule {
    #[must_use]
    pub fn new(button_checkpoints: Vec<u32>, bonus_checkpoints: Vec<u32>) -> Self {
        Self {
            button_checkpoints,
            bonus_checkpoints,
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.button_checkpoints.clone(), config.bonus_checkpoints.clone())
    }

    #[must_use]
    pub fn is_button_checkpoint(&self, position: u32) -> bool {
        self.button_checkpoints.contains(&position)
    }

    #[must_use]
    pub fn is_bonus_checkpoint(&self, position: u32) -> bool {
        self.bonus_checkpoints.contains(&position)
    }

    /// Banked income paid when `player` moves to `to`.
    #[must_use]
    pub fn button_payout(&self, player: &PlayerState, to: u32) -> i32 {
        if to != player.time_position() && self.is_button_checkpoint(to) {
            player.accumulated_buttons()
        } else {
            0
        }
    }

    /// Bonus patch granted for moving from `from` to `to` while the
    /// opponent stands at `opponent_time`.
    ///
    /// Only the first arrival is rewarded: if the opponent has already
    /// reached the checkpoint, nothing is granted.
    #[must_use]
    pub fn bonus_patch(&self, from: u32, to: u32, opponent_time: u32) -> Option<Patch> {
        (to != from && self.is_bonus_checkpoint(to) && opponent_time < to).then(|| Patch::independent_reward(to))
    }

    /// All rewards for `player` moving to `to`.
    #[must_use]
    pub fn evaluate(&self, player: &PlayerState, opponent: &PlayerState, to: u32) -> Rewards {
        Rewards {
            buttons: self.button_payout(player, to),
            bonus: self.bonus_patch(player.time_position(), to, opponent.time_position()),
        }
    }
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
