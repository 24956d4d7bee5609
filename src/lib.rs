//! Tussock - procedural 2D grass and shrub animation with cached frame playback

pub mod core;
pub mod math;
pub mod collision;
pub mod surface;
pub mod grass;
pub mod shrub;
pub mod anim;
pub mod scene;
