//! Game state snapshots.
//!
//! ## PlayerState
//!
//! One player's board and economy:
//! - Board and the patches placed on it
//! - Buttons, banked income, bonus-patch count
//! - Time-track position
//! - Final score (only once the game has ended)
//!
//! ## GameState
//!
//! Both players plus the shared offer track, the pending selection and the
//! phase. Snapshots are immutable from the outside: the rules engine builds
//! a new one per intent. `im` structures make the copy O(1) and let
//! successive snapshots share storage.
//!
//! Snapshots serialize for display or logging but cannot be deserialized:
//! only the rules engine creates them, so their invariants always hold.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use crate::board::Board;
use crate::offer::{OfferSlot, OfferTrack};
use crate::patches::Patch;
use crate::rules::{turn, GameResult};

/// Game phase. `Ended` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    Ended,
}

/// A patch sewn onto a board, anchored at its top-left cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacedPatch {
    pub patch: Patch,
    pub row: usize,
    pub col: usize,
}

/// A patch chosen for placement but not yet placed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// The player who selected it.
    pub player: PlayerId,
    /// Index on the offer track at selection time.
    pub track_index: usize,
    pub patch: Patch,
}

/// Per-player figures shown next to a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBadge {
    pub buttons: i32,
    pub time_position: u32,
    pub score: Option<i32>,
    pub accumulated_buttons: i32,
    pub independent_patches: u32,
    pub empty_cells: usize,
}

/// One player's board and economy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    pub(crate) board: Board,
    /// May go negative; only affordability checks gate spending.
    pub(crate) buttons: i32,
    pub(crate) time_position: u32,
    pub(crate) score: Option<i32>,
    /// Income banked since the last button payout.
    pub(crate) accumulated_buttons: i32,
    pub(crate) independent_patches: u32,
    /// Cached `board.empty_cells()`.
    pub(crate) empty_cells: usize,
    pub(crate) placed: Vector<PlacedPatch>,
}

impl PlayerState {
    /// A fresh player with an empty board.
    #[must_use]
    pub fn new(board_size: usize, buttons: i32) -> Self {
        let board = Board::new(board_size);
        Self {
            empty_cells: board.empty_cells(),
            board,
            buttons,
            time_position: 0,
            score: None,
            accumulated_buttons: 0,
            independent_patches: 0,
            placed: Vector::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn buttons(&self) -> i32 {
        self.buttons
    }

    #[must_use]
    pub fn time_position(&self) -> u32 {
        self.time_position
    }

    /// Final score; `None` while the game is running.
    #[must_use]
    pub fn score(&self) -> Option<i32> {
        self.score
    }

    #[must_use]
    pub fn accumulated_buttons(&self) -> i32 {
        self.accumulated_buttons
    }

    #[must_use]
    pub fn independent_patches(&self) -> u32 {
        self.independent_patches
    }

    #[must_use]
    pub fn empty_cells(&self) -> usize {
        self.empty_cells
    }

    /// Covered cells on the board.
    #[must_use]
    pub fn filled_cells(&self) -> usize {
        self.board.size() * self.board.size() - self.empty_cells
    }

    /// Patches on the board, in placement order.
    pub fn placed(&self) -> impl Iterator<Item = &PlacedPatch> {
        self.placed.iter()
    }

    /// Display figures.
    #[must_use]
    pub fn badge(&self) -> PlayerBadge {
        PlayerBadge {
            buttons: self.buttons,
            time_position: self.time_position,
            score: self.score,
            accumulated_buttons: self.accumulated_buttons,
            independent_patches: self.independent_patches,
            empty_cells: self.empty_cells,
        }
    }
}

/// Complete game snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Tie-break memory: who acts when both players share a track position.
    pub(crate) current_player: PlayerId,
    pub(crate) players: PlayerMap<PlayerState>,
    pub(crate) offer: OfferTrack,
    pub(crate) selection: Option<Selection>,
    pub(crate) phase: GamePhase,
    /// Purchase window size this game was configured with.
    pub(crate) window_size: usize,
}

impl GameState {
    /// A new game: empty boards, `buttons` each, both players at 0.
    #[must_use]
    pub fn new(board_size: usize, buttons: i32, patches: Vector<Patch>, window_size: usize) -> Self {
        Self {
            current_player: PlayerId::One,
            players: PlayerMap::new(|_| PlayerState::new(board_size, buttons)),
            offer: OfferTrack::new(patches),
            selection: None,
            phase: GamePhase::Playing,
            window_size,
        }
    }

    /// The player whose turn it is: whoever is behind on the time track,
    /// or the tie-break player when level.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        turn::active_player(
            self.players[PlayerId::One].time_position,
            self.players[PlayerId::Two].time_position,
            self.current_player,
        )
    }

    /// Recorded tie-break player.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn board(&self, player: PlayerId) -> &Board {
        &self.players[player].board
    }

    #[must_use]
    pub fn badge(&self, player: PlayerId) -> PlayerBadge {
        self.players[player].badge()
    }

    /// The full offer track.
    #[must_use]
    pub fn offer(&self) -> &OfferTrack {
        &self.offer
    }

    /// Patches currently available for purchase.
    #[must_use]
    pub fn offer_window(&self) -> Vec<OfferSlot<'_>> {
        self.offer.window(self.window_size).into_vec()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Whether a selected patch is waiting to be placed.
    #[must_use]
    pub fn placement_mode(&self) -> bool {
        self.selection.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// The patch covering a cell of a player's board.
    #[must_use]
    pub fn patch_at(&self, player: PlayerId, row: usize, col: usize) -> Option<&Patch> {
        let id = self.board(player).get(row, col)?;
        self.players[player]
            .placed
            .iter()
            .find(|placed| placed.patch.id == id)
            .map(|placed| &placed.patch)
    }

    /// Final scores once the game has ended.
    #[must_use]
    pub fn scores(&self) -> Option<PlayerMap<i32>> {
        let one = self.players[PlayerId::One].score?;
        let two = self.players[PlayerId::Two].score?;
        Some(PlayerMap::new(|p| if p == PlayerId::One { one } else { two }))
    }

    /// Outcome once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.scores().map(|scores| GameResult::from_scores(&scores))
    }
}
