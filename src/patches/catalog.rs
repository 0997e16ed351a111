//! Patch catalogs: the sequence a new game's offer track is built from.
//!
//! Three sources exist:
//! - `Fixed`: a hand-tuned list, optionally shuffled
//! - `Random`: patches drawn from the base templates with economy derived
//!   from their area
//! - `Custom`: patches supplied through configuration
//!
//! Every source is validated the same way: ids unique, non-zero and below
//! the reserved bonus range, economy non-negative, shapes within the board.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::definition::{Hue, Patch, PatchColor, PatchId, Shape, ShapeError};
use crate::core::GameRng;

/// Default number of patches in a random catalog.
pub const DEFAULT_RANDOM_COUNT: usize = 32;

/// A base shape with its display hue.
#[derive(Clone, Copy, Debug)]
pub struct PatchTemplate {
    pub rows: &'static [&'static [u8]],
    pub hue: Hue,
}

impl PatchTemplate {
    /// Build the template's shape.
    pub fn shape(&self) -> Result<Shape, ShapeError> {
        Shape::from_rows(self.rows)
    }
}

/// Shapes offer patches are drawn from. The 1x1 shape is reserved for
/// bonus patches and is not listed.
pub const BASE_TEMPLATES: [PatchTemplate; 10] = [
    PatchTemplate { rows: &[&[1, 1], &[1, 0]], hue: Hue::Red },
    PatchTemplate { rows: &[&[1, 1, 1]], hue: Hue::Blue },
    PatchTemplate { rows: &[&[1, 1], &[1, 1]], hue: Hue::Green },
    PatchTemplate { rows: &[&[1], &[1], &[1]], hue: Hue::Yellow },
    PatchTemplate { rows: &[&[1, 1, 0], &[0, 1, 1]], hue: Hue::Purple },
    PatchTemplate { rows: &[&[1, 0], &[1, 1], &[0, 1]], hue: Hue::Pink },
    PatchTemplate { rows: &[&[1, 1, 1, 1]], hue: Hue::Orange },
    PatchTemplate { rows: &[&[1, 1, 1], &[1, 0, 0]], hue: Hue::Cyan },
    PatchTemplate { rows: &[&[0, 1, 0], &[1, 1, 1]], hue: Hue::Lime },
    PatchTemplate { rows: &[&[1, 0, 0], &[1, 1, 1]], hue: Hue::Indigo },
];

/// (id, template index, cost, time, income)
const FIXED_PATCHES: [(u32, usize, i32, u32, i32); 16] = [
    (1, 0, 2, 1, 0),
    (2, 1, 3, 2, 1),
    (3, 2, 4, 2, 0),
    (4, 3, 1, 1, 0),
    (5, 4, 5, 3, 2),
    (6, 5, 3, 2, 1),
    (7, 6, 3, 3, 1),
    (8, 7, 4, 2, 1),
    (9, 8, 2, 2, 0),
    (10, 9, 3, 3, 1),
    (11, 2, 6, 5, 2),
    (12, 6, 2, 2, 0),
    (13, 0, 1, 3, 0),
    (14, 8, 5, 4, 2),
    (15, 4, 2, 1, 0),
    (16, 1, 2, 2, 0),
];

/// Palette used for custom patches that do not name a color.
const FALLBACK_HUES: [Hue; 6] = [Hue::Red, Hue::Blue, Hue::Green, Hue::Yellow, Hue::Purple, Hue::Pink];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("invalid shape for {id}: {source}")]
    Shape {
        id: PatchId,
        #[source]
        source: ShapeError,
    },
    #[error("patch id 0 is reserved for empty cells")]
    ZeroId,
    #[error("duplicate patch id {0}")]
    DuplicateId(PatchId),
    #[error("{0} lies in the reserved bonus id range")]
    ReservedId(PatchId),
    #[error("{id} has negative {field}")]
    NegativeValue { id: PatchId, field: &'static str },
    #[error("{id} is {height}x{width}, larger than the {board_size}x{board_size} board")]
    DoesNotFit {
        id: PatchId,
        height: usize,
        width: usize,
        board_size: usize,
    },
    #[error("independent reward {0} cannot be part of a catalog")]
    RewardInCatalog(PatchId),
}

/// A patch as written in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSpec {
    pub id: u32,
    pub shape: Vec<Vec<u8>>,
    #[serde(default)]
    pub cost: i32,
    #[serde(default)]
    pub time: u32,
    #[serde(default)]
    pub income: i32,
    #[serde(default)]
    pub color: Option<PatchColor>,
}

impl PatchSpec {
    /// Convert to a `Patch`, checking the shape.
    pub fn to_patch(&self) -> Result<Patch, CatalogError> {
        let id = PatchId::new(self.id);
        let shape = Shape::from_rows(&self.shape).map_err(|source| CatalogError::Shape { id, source })?;
        let color = self.color.unwrap_or_else(|| {
            let hue = FALLBACK_HUES[self.id as usize % FALLBACK_HUES.len()];
            PatchColor::new(hue, 400)
        });
        Ok(Patch::new(id, shape, self.cost, self.time, self.income, color))
    }
}

/// Where a game's patches come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogSource {
    /// The built-in list, in order unless `shuffle` is set.
    Fixed {
        #[serde(default)]
        shuffle: bool,
    },
    /// `count` patches generated from the base templates.
    Random { count: usize },
    /// Patches listed in configuration, in track order.
    Custom { patches: Vec<PatchSpec> },
}

impl Default for CatalogSource {
    fn default() -> Self {
        CatalogSource::Random {
            count: DEFAULT_RANDOM_COUNT,
        }
    }
}

/// Validated, ordered patch list with id lookup.
///
/// ## Example
///
/// ```
/// use patchwork_engine::core::GameRng;
/// use patchwork_engine::patches::{CatalogSource, PatchCatalog, PatchId};
///
/// let rng = GameRng::new(1);
/// let catalog = PatchCatalog::build(&CatalogSource::Fixed { shuffle: false }, 9, &rng).unwrap();
///
/// assert_eq!(catalog.patches()[0].id, PatchId::new(1));
/// assert_eq!(catalog.get(PatchId::new(3)).map(|p| p.cost), Some(4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PatchCatalog {
    patches: Vec<Patch>,
    index: FxHashMap<PatchId, usize>,
}

impl PatchCatalog {
    /// Validate a patch list for a board of `board_size`.
    pub fn from_patches(patches: Vec<Patch>, board_size: usize) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();
        for (position, patch) in patches.iter().enumerate() {
            let id = patch.id;
            if id.raw() == 0 {
                return Err(CatalogError::ZeroId);
            }
            if patch.is_independent_reward {
                return Err(CatalogError::RewardInCatalog(id));
            }
            if id.is_reserved() {
                return Err(CatalogError::ReservedId(id));
            }
            if patch.cost < 0 {
                return Err(CatalogError::NegativeValue { id, field: "cost" });
            }
            if patch.income < 0 {
                return Err(CatalogError::NegativeValue { id, field: "income" });
            }
            if patch.shape.height() > board_size || patch.shape.width() > board_size {
                return Err(CatalogError::DoesNotFit {
                    id,
                    height: patch.shape.height(),
                    width: patch.shape.width(),
                    board_size,
                });
            }
            if index.insert(id, position).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        Ok(Self { patches, index })
    }

    /// Build and validate the catalog described by `source`.
    ///
    /// `rng` is only consulted by random and shuffled sources.
    pub fn build(source: &CatalogSource, board_size: usize, rng: &GameRng) -> Result<Self, CatalogError> {
        let patches = match source {
            CatalogSource::Fixed { shuffle } => {
                let mut patches = fixed_patches()?;
                if *shuffle {
                    rng.for_context("catalog-order").shuffle(&mut patches);
                }
                patches
            }
            CatalogSource::Random { count } => random_patches(*count, &mut rng.for_context("catalog-draw"))?,
            CatalogSource::Custom { patches } => patches
                .iter()
                .map(PatchSpec::to_patch)
                .collect::<Result<Vec<_>, _>>()?,
        };
        Self::from_patches(patches, board_size)
    }

    /// Patches in track order.
    #[must_use]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Consume the catalog, returning patches in track order.
    #[must_use]
    pub fn into_patches(self) -> Vec<Patch> {
        self.patches
    }

    /// Look up a patch by id.
    #[must_use]
    pub fn get(&self, id: PatchId) -> Option<&Patch> {
        self.index.get(&id).map(|&i| &self.patches[i])
    }

    /// Number of patches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

/// The built-in patch list.
pub fn fixed_patches() -> Result<Vec<Patch>, CatalogError> {
    FIXED_PATCHES
        .iter()
        .map(|&(id, template, cost, time, income)| {
            let id = PatchId::new(id);
            let template = &BASE_TEMPLATES[template];
            let shape = template.shape().map_err(|source| CatalogError::Shape { id, source })?;
            Ok(Patch::new(id, shape, cost, time, income, PatchColor::new(template.hue, 500)))
        })
        .collect()
}

/// Generate `count` patches numbered from 1.
///
/// Economy scales with area: `cost = max(1, ⌊0.8·area⌋ + 0..=2)`,
/// `time = max(1, ⌊0.6·area⌋ + 0..=1)`, and 30% of patches carry an
/// income of 1 or 2.
pub fn random_patches(count: usize, rng: &mut GameRng) -> Result<Vec<Patch>, CatalogError> {
    (1..=count)
        .map(|n| {
            let id = PatchId::new(u32::try_from(n).unwrap_or(u32::MAX));
            let template = rng.choose(&BASE_TEMPLATES).copied().unwrap_or(BASE_TEMPLATES[0]);
            let shade = rng.choose(&PatchColor::SHADES).copied().unwrap_or(500);
            let shape = template.shape().map_err(|source| CatalogError::Shape { id, source })?;

            let area = i32::try_from(shape.area()).unwrap_or(i32::MAX);
            let cost = (area * 4 / 5 + rng.gen_range(0..3)).max(1);
            let time = (area * 3 / 5 + rng.gen_range(0..2)).max(1).unsigned_abs();
            let income = if rng.gen_bool(0.3) { rng.gen_range(1..=2) } else { 0 };

            Ok(Patch::new(id, shape, cost, time, income, PatchColor::new(template.hue, shade)))
        })
        .collect()
}
