//! Procedural shrubs.
//!
//! A shrub is a fan of short straight leaves stacked in layers, with the
//! canopy edge drooping toward the extremes. Shrubs are cheap to cache:
//! [`ShrubLoop`] plays them through the frame cache.

pub mod config;
pub mod leaf;
pub mod shrub_loop;

pub use config::{LeafAngleUnit, PaletteCycle, ShrubConfig};
pub use leaf::{Shrub, ShrubLeaf};
pub use shrub_loop::ShrubLoop;
