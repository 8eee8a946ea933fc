//! Frame timing and animation-frame bookkeeping

use crate::consts::{NOMINAL_HZ, RESUME_GLITCH_MS};
use crate::sim::sanitize_dt;

/// What the frame driver should do with a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// Simulate this many (already sanitized) seconds
    Simulate(f32),
    /// Render only; the wall-clock gap was a resume glitch
    Skip,
}

/// Turns animation-frame timestamps into simulation steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp; the next frame counts as the first
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    pub fn tick(&mut self, now_ms: f64) -> FrameStep {
        let prev = self.last_ms.replace(now_ms);
        let Some(prev) = prev else {
            return FrameStep::Simulate(1.0 / NOMINAL_HZ);
        };

        let gap_ms = now_ms - prev;
        if gap_ms > RESUME_GLITCH_MS {
            log::debug!("skipping simulation after {gap_ms:.0} ms gap");
            return FrameStep::Skip;
        }
        FrameStep::Simulate(sanitize_dt((gap_ms / 1000.0) as f32))
    }
}

const FPS_WINDOW: usize = 60;

/// Rolling FPS over the last 60 frame timestamps
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn record(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Owns the id of the pending animation-frame request.
///
/// At most one callback is pending at a time, and once cancelled the loop never
/// schedules again.
#[derive(Debug, Default)]
pub struct LoopHandle {
    pending: Option<i32>,
    stopped: bool,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame through `request`, which returns the host id.
    /// Returns false when a frame is already pending, the loop was cancelled,
    /// or the host refused.
    pub fn schedule<F>(&mut self, request: F) -> bool
    where
        F: FnOnce() -> Option<i32>,
    {
        if self.stopped || self.pending.is_some() {
            return false;
        }
        match request() {
            Some(id) => {
                self.pending = Some(id);
                true
            }
            None => false,
        }
    }

    /// The pending callback ran
    pub fn fired(&mut self) {
        self.pending = None;
    }

    /// Stop the loop. Yields the pending id to cancel with the host, once.
    pub fn cancel(&mut self) -> Option<i32> {
        self.stopped = true;
        self.pending.take()
    }

    /// Re-arm a cancelled loop (page restored from the back/forward cache).
    /// Returns false if the loop was still running.
    pub fn resume(&mut self) -> bool {
        if !self.stopped {
            return false;
        }
        self.stopped = false;
        self.pending = None;
        true
    }

    pub fn is_active(&self) -> bool {
        !self.stopped
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
