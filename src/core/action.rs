//! Intents: the only ways a game state can change.
//!
//! The presentation layer turns clicks into intents; the rules engine
//! validates and applies them. An intent that fails validation leaves the
//! state untouched.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A player's request to change the game state.
///
/// ```
/// use patchwork_engine::core::Intent;
///
/// let intents = [
///     Intent::SelectPatch { track_index: 2 },
///     Intent::PlacePatch { row: 0, col: 4 },
///     Intent::SkipTurn,
///     Intent::CancelPlacement,
/// ];
/// assert_eq!(intents.len(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Pick a patch from the purchase window for placement.
    SelectPatch { track_index: usize },
    /// Place the selected patch with its top-left cell at `(row, col)`.
    PlacePatch { row: usize, col: usize },
    /// Decline to buy; move past the opponent and collect buttons.
    SkipTurn,
    /// Drop the pending selection.
    CancelPlacement,
}

impl Intent {
    /// Whether applying this intent moves a player on the time track.
    #[must_use]
    pub fn advances_time(&self) -> bool {
        matches!(self, Intent::PlacePatch { .. } | Intent::SkipTurn)
    }
}

/// An applied intent with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// The player who was active when the intent was applied.
    pub player: PlayerId,

    /// The intent.
    pub intent: Intent,

    /// Position in the session's history (0-based).
    pub sequence: u32,
}

impl IntentRecord {
    /// Create a new intent record.
    #[must_use]
    pub fn new(player: PlayerId, intent: Intent, sequence: u32) -> Self {
        Self {
            player,
            intent,
            sequence,
        }
    }
}
