//! A player's square quilt board.
//!
//! Cells are either empty or hold the id of the patch covering them.
//! Boards are persistent: placing a patch returns a new board and leaves
//! the original untouched, sharing structure between the two.

use im::Vector;
use serde::Serialize;

use crate::patches::{PatchId, Shape};

/// Side length of the standard board.
pub const BOARD_SIZE: usize = 9;

/// Square grid of cells, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    cells: Vector<Option<PatchId>>,
}

impl Board {
    /// Create an empty `size`x`size` board.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: std::iter::repeat(None).take(size * size).collect(),
        }
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Contents of a cell. Out-of-range coordinates read as empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<PatchId> {
        if row < self.size && col < self.size {
            self.cells.get(row * self.size + col).copied().flatten()
        } else {
            None
        }
    }

    /// Iterate over `((row, col), contents)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Option<PatchId>)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i / size, i % size), cell))
    }

    /// Number of empty cells (live count).
    #[must_use]
    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Number of covered cells.
    #[must_use]
    pub fn filled_cells(&self) -> usize {
        self.cells.len() - self.empty_cells()
    }

    /// Whether `shape` anchored at `(row, col)` lies on the board and covers
    /// only empty cells.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, row: usize, col: usize) -> bool {
        shape.occupied().all(|(i, j)| match (row.checked_add(i), col.checked_add(j)) {
            (Some(r), Some(c)) => r < self.size && c < self.size && self.get(r, c).is_none(),
            _ => false,
        })
    }

    /// A new board with `shape` written at `(row, col)` as `id`.
    ///
    /// Returns `None` if the placement is illegal. `self` is unchanged
    /// either way.
    #[must_use]
    pub fn with_patch(&self, id: PatchId, shape: &Shape, row: usize, col: usize) -> Option<Board> {
        if !self.can_place(shape, row, col) {
            return None;
        }
        let mut next = self.clone();
        for (i, j) in shape.occupied() {
            next.cells.set((row + i) * self.size + col + j, Some(id));
        }
        Some(next)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_SIZE)
    }
}

/// Placement legality check on `board`.
///
/// True iff every occupied cell of `shape`, offset by `(row, col)`, lies in
/// `[0, size) x [0, size)` and addresses an empty cell.
#[must_use]
pub fn can_place(board: &Board, shape: &Shape, row: usize, col: usize) -> bool {
    board.can_place(shape, row, col)
}
