//! The shared offer track patches are bought from.

pub mod track;

pub use track::{OfferSlot, OfferTrack, WINDOW_SIZE};
