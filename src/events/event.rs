//! Game events.
//!
//! Every accepted intent yields the events it caused, in order. The rules
//! engine only builds them; observers (logging, UI animation, replay
//! tooling) decide what to do with them.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};
use crate::patches::PatchId;

/// Something that happened as a result of an intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A patch was picked from the window for placement.
    PatchSelected {
        player: PlayerId,
        patch: PatchId,
        track_index: usize,
    },
    /// A pending selection was dropped.
    SelectionCancelled { player: PlayerId, patch: PatchId },
    /// A patch was sewn onto a board.
    PatchPlaced {
        player: PlayerId,
        patch: PatchId,
        row: usize,
        col: usize,
        cost: i32,
        income: i32,
        time_position: u32,
    },
    /// A player declined to buy and moved ahead.
    TurnSkipped {
        player: PlayerId,
        buttons_gained: i32,
        time_position: u32,
    },
    /// Banked income paid out at a checkpoint.
    ButtonsPaidOut {
        player: PlayerId,
        amount: i32,
        checkpoint: u32,
    },
    /// A bonus patch was added to the offer track.
    BonusPatchGranted {
        player: PlayerId,
        patch: PatchId,
        checkpoint: u32,
    },
    /// Both players reached the end of the track.
    GameEnded { scores: PlayerMap<i32> },
}

impl GameEvent {
    /// The player the event concerns, if it concerns one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::PatchSelected { player, .. }
            | GameEvent::SelectionCancelled { player, .. }
            | GameEvent::PatchPlaced { player, .. }
            | GameEvent::TurnSkipped { player, .. }
            | GameEvent::ButtonsPaidOut { player, .. }
            | GameEvent::BonusPatchGranted { player, .. } => Some(*player),
            GameEvent::GameEnded { .. } => None,
        }
    }

    /// Short machine-friendly name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PatchSelected { .. } => "patch_selected",
            GameEvent::SelectionCancelled { .. } => "selection_cancelled",
            GameEvent::PatchPlaced { .. } => "patch_placed",
            GameEvent::TurnSkipped { .. } => "turn_skipped",
            GameEvent::ButtonsPaidOut { .. } => "buttons_paid_out",
            GameEvent::BonusPatchGranted { .. } => "bonus_patch_granted",
            GameEvent::GameEnded { .. } => "game_ended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_player() {
        let skipped = GameEvent::TurnSkipped {
            player: PlayerId::Two,
            buttons_gained: 3,
            time_position: 9,
        };
        assert_eq!(skipped.player(), Some(PlayerId::Two));
        assert_eq!(skipped.name(), "turn_skipped");

        let ended = GameEvent::GameEnded {
            scores: PlayerMap::with_value(0),
        };
        assert_eq!(ended.player(), None);
        assert_eq!(ended.name(), "game_ended");
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::BonusPatchGranted {
            player: PlayerId::One,
            patch: PatchId::reward(26),
            checkpoint: 26,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event":"bonus_patch_granted""#));

        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
