//! # patchwork-engine
//!
//! Rules engine for a two-player Patchwork-style tile-placement game.
//!
//! Players buy polyomino patches from a circular offer track, pay for them
//! in buttons and time, and sew them onto a 9x9 quilt board. Whoever is
//! furthest behind on the shared time track moves next. The game ends when
//! both players reach the end of the track, and empty board cells cost
//! points.
//!
//! ## Design Principles
//!
//! 1. **Snapshots**: A `GameState` is never mutated in place. Each accepted
//!    intent produces a new snapshot; persistent structures from `im` keep
//!    that cheap.
//!
//! 2. **Pure Rules**: `PatchworkRules` maps `(snapshot, intent)` to either a
//!    new snapshot plus events or a rejection reason. No I/O, no clocks.
//!
//! 3. **Configuration Over Convention**: Track length, checkpoints, window
//!    size, catalog and scoring come from `GameConfig`.
//!
//! ## Modules
//!
//! - `core`: players, intents, snapshots, RNG, configuration
//! - `patches`: patch definitions and catalogs
//! - `board`: quilt boards and placement checks
//! - `offer`: the circular offer track and purchase window
//! - `rules`: turn order, rewards, scoring and the intent engine
//! - `events`: what accepted intents report
//! - `session`: a running game with history and logging

pub mod board;
pub mod core;
pub mod events;
pub mod offer;
pub mod patches;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameConfig, GamePhase, GameRng, GameState, Intent, IntentRecord, PlacedPatch, PlayerBadge, PlayerId,
    PlayerMap, PlayerState, Selection,
};

pub use crate::board::{can_place, Board, BOARD_SIZE};

pub use crate::patches::{CatalogError, CatalogSource, Patch, PatchCatalog, PatchColor, PatchId, PatchSpec, Shape};

pub use crate::offer::{OfferSlot, OfferTrack, WINDOW_SIZE};

pub use crate::rules::{GameResult, IntentError, PatchworkRules, ScoringPolicy, ScoringRule, Transition};

pub use crate::events::GameEvent;

pub use crate::session::GameSession;
