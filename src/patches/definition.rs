//! Patch definitions: identity, shape, economy and color.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// First id of the reserved range used by bonus patches.
///
/// Bonus patches are numbered `REWARD_ID_BASE + checkpoint`, so catalog
/// patches must stay below this value.
pub const REWARD_ID_BASE: u32 = 1000;

/// Unique patch identifier. Written into board cells when placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatchId(pub u32);

impl PatchId {
    /// Create a new patch ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Id of the bonus patch granted at a track checkpoint.
    #[must_use]
    pub const fn reward(checkpoint: u32) -> Self {
        Self(REWARD_ID_BASE + checkpoint)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this id lies in the reserved bonus range.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        self.0 >= REWARD_ID_BASE
    }
}

impl std::fmt::Display for PatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Patch({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has no rows")]
    Empty,
    #[error("shape row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("shape has no occupied cells")]
    NoCells,
    #[error("shape cell value {value} at ({row}, {col}) is not 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u8 },
    #[error("shape is {height}x{width}, larger than supported")]
    TooLarge { height: usize, width: usize },
}

/// Rectangular occupancy matrix of a patch.
///
/// Rows may have leading or trailing empty cells; at least one cell is
/// occupied. Only `from_rows` and `single` build one, so the dimensions
/// always match the cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    height: u8,
    width: u8,
    /// Row-major occupancy.
    cells: SmallVec<[bool; 16]>,
}

impl Shape {
    /// Build a shape from rows of `0`/`1` values.
    ///
    /// ```
    /// use patchwork_engine::patches::Shape;
    ///
    /// let l = Shape::from_rows(&[[1, 1], [1, 0]]).unwrap();
    /// assert_eq!(l.area(), 3);
    /// assert_eq!((l.height(), l.width()), (2, 2));
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if height == 0 || width == 0 {
            return Err(ShapeError::Empty);
        }
        if height > usize::from(u8::MAX) || width > usize::from(u8::MAX) {
            return Err(ShapeError::TooLarge { height, width });
        }

        let mut cells = SmallVec::with_capacity(height * width);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(ShapeError::Ragged {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => return Err(ShapeError::InvalidCell { row, col, value }),
                }
            }
        }

        if !cells.iter().any(|&c| c) {
            return Err(ShapeError::NoCells);
        }

        // Bounds checked above.
        Ok(Self {
            height: height as u8,
            width: width as u8,
            cells,
        })
    }

    /// The 1x1 shape of bonus patches.
    #[must_use]
    pub fn single() -> Self {
        Self {
            height: 1,
            width: 1,
            cells: SmallVec::from_slice(&[true]),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    /// Offsets `(row, col)` of occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(i, _)| (i / width, i % width))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Display hue of a patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hue {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Orange,
    Cyan,
    Lime,
    Indigo,
    Teal,
}

/// Display color: a hue plus a shade step (400, 500 or 600).
///
/// Not load-bearing for any rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatchColor {
    pub hue: Hue,
    pub shade: u16,
}

impl PatchColor {
    /// Shade steps a hue may be rendered with.
    pub const SHADES: [u16; 3] = [400, 500, 600];

    #[must_use]
    pub const fn new(hue: Hue, shade: u16) -> Self {
        Self { hue, shade }
    }
}

/// A purchasable (or bonus) patch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Patch {
    pub id: PatchId,
    pub shape: Shape,
    /// Buttons required to acquire.
    pub cost: i32,
    /// Track steps advanced on placement.
    pub time: u32,
    /// Buttons paid on placement and banked toward the next payout.
    pub income: i32,
    pub color: PatchColor,
    /// Granted by a track checkpoint rather than drawn from the catalog.
    pub is_independent_reward: bool,
}

impl Patch {
    /// Create a regular offer patch.
    #[must_use]
    pub fn new(id: PatchId, shape: Shape, cost: i32, time: u32, income: i32, color: PatchColor) -> Self {
        Self {
            id,
            shape,
            cost,
            time,
            income,
            color,
            is_independent_reward: false,
        }
    }

    /// The free 1x1 patch granted for reaching `checkpoint` first.
    #[must_use]
    pub fn independent_reward(checkpoint: u32) -> Self {
        Self {
            id: PatchId::reward(checkpoint),
            shape: Shape::single(),
            cost: 0,
            time: 0,
            income: 0,
            color: PatchColor::new(Hue::Teal, 500),
            is_independent_reward: true,
        }
    }
}
