//! Frame-rate gating for the scroll engine.
//!
//! The host notifies the engine on every repaint opportunity, but the
//! stop-motion look depends on acting at a much lower, fixed cadence.
//! `FrameGate` accepts at most one notification per target interval and
//! carries the timing remainder forward so the long-run cadence stays
//! accurate under jitter instead of drifting late.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut gate = FrameGate::from_fps(12.0);
//!
//! // In render loop:
//! if gate.accept(Instant::now()) {
//!     engine.step();
//! }
//! ```

#![allow(dead_code)]

use std::time::{Duration, Instant};

/// Fallback cadence when a configured rate is unusable.
const DEFAULT_FPS: f64 = 12.0;

/// Accepts frame notifications at a bounded cadence.
///
/// The gate is disarmed until the first notification, which arms it without
/// being accepted. On acceptance the stored timestamp advances by whole
/// intervals only (`now - elapsed % interval`), so a late frame does not
/// push every following frame later.
#[derive(Debug, Clone)]
pub struct FrameGate {
    /// Minimum time between accepted frames
    interval: Duration,
    /// Timestamp of the last accepted frame, `None` while disarmed
    last: Option<Instant>,
}

impl FrameGate {
    /// Create a gate with an explicit interval between accepted frames.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Create a gate from a target frame rate.
    ///
    /// Non-finite or non-positive rates fall back to 12 fps rather than
    /// producing a zero interval.
    pub fn from_fps(fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            DEFAULT_FPS
        };
        Self::new(Duration::from_secs_f64(1.0 / fps))
    }

    /// The interval between accepted frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Offer a frame notification; returns whether the frame is accepted.
    ///
    /// The first notification after arming is never accepted, it only
    /// establishes the reference timestamp.
    pub fn accept(&mut self, now: Instant) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return false;
        };

        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.interval {
            return false;
        }

        // Carry the remainder instead of resetting to `now`, so the
        // accepted cadence averages out to exactly the target interval.
        let remainder = if self.interval.is_zero() {
            Duration::ZERO
        } else {
            Duration::from_nanos((elapsed.as_nanos() % self.interval.as_nanos()) as u64)
        };
        self.last = Some(now - remainder);
        true
    }

    /// Disarm the gate; the next notification re-arms without acting.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
