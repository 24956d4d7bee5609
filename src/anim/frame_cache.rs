//! Per-bucket bitmap cache with optional ping-pong playback.

use std::collections::HashMap;

use crate::anim::bucket::{BucketKey, FrameBucket};
use crate::anim::{FrameCacheConfig, Loopable};
use crate::core::Result;
use crate::surface::{Bitmap, RasterSurface, Surface};

/// Result of one [`FrameCache::render`] call.
pub struct LoopOut<'a, L: Loopable, S: Surface = RasterSurface> {
    pub cache: &'a FrameCache<L, S>,
    /// Frame to present this tick, or `None` if nothing is cached at the
    /// playback index.
    pub bitmap: Option<&'a Bitmap>,
}

/// Records frames drawn by a [`Loopable`] and replays them.
///
/// Each bucket fills one capture per tick until it holds `target_frame_count`
/// frames; after that the loopable is never drawn again for that bucket.
pub struct FrameCache<L: Loopable, S: Surface = RasterSurface> {
    source: L,
    surface: S,
    angle: BucketKey,
    /// Playback index, always below `target_frame_count`
    frame: usize,
    render_pass: u64,
    target_frame_count: usize,
    reverse_loop: bool,
    buckets: HashMap<BucketKey, FrameBucket<L::State>>,
}

impl<L: Loopable, S: Surface> FrameCache<L, S> {
    /// Wrap `source`, capturing from the offscreen `surface`.
    pub fn new(source: L, surface: S, config: &FrameCacheConfig) -> Self {
        Self {
            source,
            surface,
            angle: 0,
            frame: 0,
            render_pass: 0,
            target_frame_count: config.target_frame_count.max(1),
            reverse_loop: config.reverse_loop,
            buckets: HashMap::new(),
        }
    }

    /// Advance playback by one tick and return the frame to present.
    pub fn render(&mut self) -> Result<LoopOut<'_, L, S>> {
        let target = self.target_frame_count;
        let frame = self.frame;
        let bucket = self.buckets.entry(self.angle).or_default();

        if frame >= bucket.len() && bucket.len() < target {
            self.surface.clear();
            self.source.ensure_initialized(self.surface.width(), self.surface.height())?;
            self.source.draw(&mut self.surface)?;
            bucket.push(self.surface.capture(), self.source.snapshot());

            if bucket.len() == target {
                log::debug!("Bucket {} filled with {} frames after {} passes", self.angle, target, self.render_pass + 1);
            }
        }

        let mut selected = frame;
        if bucket.frame(frame).is_none() {
            log::error!("no rendered frame {} in bucket {} ({} captured)", frame, self.angle, bucket.len());
        } else if self.reverse_loop && frame + 1 == bucket.len() && bucket.len() >= target && bucket.reverse_once() {
            // The frame chosen above now sits at the mirrored index
            selected = bucket.len() - 1 - frame;
            log::debug!("Bucket {} reversed for ping-pong playback", self.angle);
        }

        self.frame = (frame + 1) % target;
        self.render_pass += 1;

        let bitmap = self.buckets.get(&self.angle).and_then(|b| b.frame(selected));
        Ok(LoopOut { cache: &*self, bitmap })
    }

    /// Switch to another bucket. Playback restarts at its first frame.
    pub fn set_angle(&mut self, angle: BucketKey) {
        if angle != self.angle {
            self.angle = angle;
            self.frame = 0;
        }
    }

    /// Change the per-bucket frame budget. Buckets already above it keep
    /// their frames but only the first `count` are played.
    pub fn set_target_frame_count(&mut self, count: usize) {
        self.target_frame_count = count.max(1);
        self.frame %= self.target_frame_count;
    }

    pub fn set_reverse_loop(&mut self, reverse_loop: bool) {
        self.reverse_loop = reverse_loop;
    }

    /// Drop the frames of one bucket so they are captured again.
    ///
    /// Playback keeps its position, so indices past the recaptured frames
    /// present nothing until playback wraps.
    pub fn invalidate(&mut self, angle: BucketKey) -> Option<FrameBucket<L::State>> {
        self.buckets.remove(&angle)
    }

    pub fn angle(&self) -> BucketKey {
        self.angle
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn render_pass(&self) -> u64 {
        self.render_pass
    }

    pub fn target_frame_count(&self) -> usize {
        self.target_frame_count
    }

    pub fn reverse_loop(&self) -> bool {
        self.reverse_loop
    }

    pub fn bucket(&self, angle: BucketKey) -> Option<&FrameBucket<L::State>> {
        self.buckets.get(&angle)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn source(&self) -> &L {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut L {
        &mut self.source
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
