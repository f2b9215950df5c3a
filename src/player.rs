//! Frame-rate-normalized playback of an append-only frame buffer.
//!
//! The host calls [`AnimationPlayer::tick`] once per display refresh with a monotonic timestamp.
//! Elapsed real time is converted to virtual frames at the player's rate, so playback speed does
//! not depend on how often the host refreshes. Frames may be appended at any time; a running loop
//! sees them on its next tick.

use std::rc::Rc;

use crate::events::{SubscriptionId, Subscribers};
use crate::foundation::core::{Canvas, FrameRGBA, Fps};

/// Payload of the frame-updated notification.
#[derive(Clone, Debug)]
pub struct FrameUpdated {
    /// Buffer index of the frame now on screen.
    pub index: usize,
    /// The rendered frame.
    pub frame: Rc<FrameRGBA>,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No playback loop is running.
    Idle,
    /// A new frame was rendered.
    Rendered(usize),
    /// Still inside the previously rendered virtual frame; nothing drawn.
    Unchanged(usize),
    /// The playhead ran past the buffer; playback stopped at this index.
    Underrun(usize),
}

#[derive(Clone, Copy, Debug)]
struct PlaybackRun {
    offset: usize,
    started_at: Option<f64>,
}

/// Buffered frame player with offset-continuable playback.
pub struct AnimationPlayer {
    fps: Fps,
    frames: Vec<Rc<FrameRGBA>>,
    current_frame: usize,
    last_rendered: Option<usize>,
    run: Option<PlaybackRun>,
    target: FrameRGBA,
    frame_updated: Subscribers<FrameUpdated>,
}

impl std::fmt::Debug for AnimationPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationPlayer")
            .field("fps", &self.fps)
            .field("frames", &self.frames.len())
            .field("current_frame", &self.current_frame)
            .field("playing", &self.run.is_some())
            .finish()
    }
}

impl AnimationPlayer {
    /// Create a player drawing into a blank `canvas`-sized target at `fps` virtual frames per
    /// second.
    pub fn new(fps: Fps, canvas: Canvas) -> Self {
        Self {
            fps,
            frames: Vec::new(),
            current_frame: 0,
            last_rendered: None,
            run: None,
            target: FrameRGBA::white(canvas.width, canvas.height),
            frame_updated: Subscribers::new(),
        }
    }

    /// Append frames to the buffer.
    pub fn add_frames(&mut self, frames: impl IntoIterator<Item = FrameRGBA>) {
        let before = self.frames.len();
        self.frames.extend(frames.into_iter().map(Rc::new));
        tracing::trace!(added = self.frames.len() - before, total = self.frames.len());
    }

    /// Start (or restart) the playback loop from the current virtual frame.
    pub fn animate(&mut self) {
        self.run = Some(PlaybackRun {
            offset: self.current_frame,
            started_at: None,
        });
    }

    /// Stop the playback loop. The playhead keeps its position.
    pub fn cancel(&mut self) {
        self.run = None;
    }

    /// Advance playback to the display timestamp `now_secs`.
    ///
    /// The first tick of a run defines time zero.
    pub fn tick(&mut self, now_secs: f64) -> TickOutcome {
        let Some(run) = self.run.as_mut() else {
            return TickOutcome::Idle;
        };
        let started_at = *run.started_at.get_or_insert(now_secs);
        let elapsed = self.fps.secs_to_frames((now_secs - started_at).max(0.0));
        let index = run.offset + elapsed.floor() as usize;

        let Some(frame) = self.frames.get(index) else {
            self.current_frame = index;
            self.run = None;
            tracing::trace!(index, "playback underrun");
            return TickOutcome::Underrun(index);
        };

        if self.last_rendered == Some(index) {
            return TickOutcome::Unchanged(index);
        }

        let frame = Rc::clone(frame);
        if self.target.width == frame.width && self.target.height == frame.height {
            self.target.data.copy_from_slice(&frame.data);
        } else {
            self.target = (*frame).clone();
        }
        self.current_frame = index;
        self.last_rendered = Some(index);
        self.frame_updated.emit(&FrameUpdated { index, frame });
        TickOutcome::Rendered(index)
    }

    /// Register a frame-updated callback.
    pub fn on_frame_updated(
        &mut self,
        callback: impl FnMut(&FrameUpdated) + 'static,
    ) -> SubscriptionId {
        self.frame_updated.subscribe(callback)
    }

    /// Remove a frame-updated callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.frame_updated.unsubscribe(id)
    }

    /// Return `true` while a playback loop is running.
    pub fn is_playing(&self) -> bool {
        self.run.is_some()
    }

    /// Virtual frame counter.
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Number of buffered frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when no frame has been buffered.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The destination raster holding the last rendered frame.
    pub fn target(&self) -> &FrameRGBA {
        &self.target
    }

    /// Virtual frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }
}

#[cfg(test)]
#[path = "../tests/unit/player.rs"]
mod tests;
