//! Core engine types: players, state, intents, RNG, configuration.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Intent, IntentRecord};
pub use config::{
    ConfigError, GameConfig, BONUS_PATCH_CHECKPOINTS, BUTTON_CHECKPOINTS, INITIAL_BUTTONS, MAX_BOARD_SIZE,
    MAX_CELL_PENALTY, MAX_INITIAL_BUTTONS, TRACK_LENGTH,
};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GamePhase, GameState, PlacedPatch, PlayerBadge, PlayerState, Selection};
