//! Cached playback of expensive procedural animations.
//!
//! A [`Loopable`] draws one animation frame onto an offscreen surface. The
//! [`FrameCache`] records those frames per animation bucket until a target
//! count is reached, then replays the bitmaps instead of redrawing.

pub mod bucket;
pub mod frame_cache;

pub use bucket::{BucketKey, FrameBucket};
pub use frame_cache::{FrameCache, LoopOut};

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::surface::Surface;

/// Something that can draw successive animation frames.
pub trait Loopable {
    /// Logical state captured alongside each frame.
    type State;

    /// Prepare any lazily built geometry for a surface of the given size.
    /// Called by the cache before every capture.
    fn ensure_initialized(&mut self, _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }

    /// Draw the next frame onto a cleared surface.
    fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<()>;

    /// Snapshot of the state that produced the frame just drawn.
    fn snapshot(&self) -> Option<Self::State> {
        None
    }
}

/// Frame cache settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameCacheConfig {
    /// Frames captured per bucket before playback turns into pure replay.
    pub target_frame_count: usize,
    /// Reverse each full bucket once so playback runs back through the frames.
    pub reverse_loop: bool,
}

impl Default for FrameCacheConfig {
    fn default() -> Self {
        Self {
            target_frame_count: 10,
            reverse_loop: false,
        }
    }
}
