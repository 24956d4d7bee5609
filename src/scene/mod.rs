//! Field composition: configuration, scene objects, and the render loop.

pub mod config;
pub mod object;
pub mod render_loop;

pub use config::{FieldConfig, ShrubPlacement};
pub use object::SceneObject;
pub use render_loop::{FixedStepScheduler, FrameScheduler, RenderLoop, RenderLoopBuilder};
