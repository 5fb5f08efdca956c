//! Splits volume layers into a grid of tiles for the viewer, alongside a
//! downsampled preview of each layer.

pub mod grid;
pub mod volume;
