//! Mathematical utilities and data structures

pub mod bounds;
pub mod deviation;

pub use bounds::Bounds;
pub use deviation::{clamp, DeviationEngine};
