//! Captured frames for one animation bucket.

use crate::surface::Bitmap;

/// Key of an animation bucket, e.g. a view angle in degrees.
pub type BucketKey = i32;

/// Ordered frames captured under one bucket key, with optional state snapshots.
#[derive(Debug)]
pub struct FrameBucket<T> {
    frames: Vec<Bitmap>,
    states: Vec<T>,
    reversed: bool,
}

impl<T> FrameBucket<T> {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            states: Vec::new(),
            reversed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Bitmap] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Bitmap> {
        self.frames.get(index)
    }

    /// Snapshots in playback order. Shorter than `frames` if the loopable
    /// did not snapshot every frame.
    pub fn states(&self) -> &[T] {
        &self.states
    }

    pub fn state(&self, index: usize) -> Option<&T> {
        self.states.get(index)
    }

    pub fn push(&mut self, frame: Bitmap, state: Option<T>) {
        self.frames.push(frame);
        if let Some(state) = state {
            self.states.push(state);
        }
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Reverse frames and snapshots in place. Only the first call has any
    /// effect; returns whether this call reversed.
    pub fn reverse_once(&mut self) -> bool {
        if self.reversed {
            return false;
        }
        self.frames.reverse();
        self.states.reverse();
        self.reversed = true;
        true
    }
}

impl<T> Default for FrameBucket<T> {
    fn default() -> Self {
        Self::new()
    }
}
