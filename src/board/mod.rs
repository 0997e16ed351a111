//! Player boards and placement legality.

pub mod grid;

pub use grid::{can_place, Board, BOARD_SIZE};
