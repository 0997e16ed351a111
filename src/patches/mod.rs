//! Patches: polyomino pieces players buy and sew onto their boards.
//!
//! - `definition`: ids, shapes, economy, color
//! - `catalog`: the sequences a game's offer track starts from

pub mod catalog;
pub mod definition;

pub use catalog::{CatalogError, CatalogSource, PatchCatalog, PatchSpec, PatchTemplate, BASE_TEMPLATES};
pub use definition::{Hue, Patch, PatchColor, PatchId, Shape, ShapeError, REWARD_ID_BASE};
