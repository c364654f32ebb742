//! Discretized scroll controller.
//!
//! Converts continuous scroll intent (wheel deltas, navigation keys) into a
//! deliberately low-frame-rate, quantized scroll animation. Motion is
//! discretized twice: frames are gated to a fixed cadence by [`FrameGate`],
//! and each accepted frame moves by a whole multiple of a pixel quantum, so
//! the viewport visibly jumps instead of gliding.
//!
//! The engine holds only scalar state. Input handlers mutate the target
//! offset synchronously in arrival order; the tick applies the latest
//! snapshot at each accepted frame, so wheel events arriving between frames
//! coalesce into a single cumulative move.

use std::time::Instant;

use super::timing::FrameGate;
use super::viewport::Viewport;

/// Multiplier for arrow/page key steps.
const STEP_MULTIPLIER: f64 = 3.0;
/// Multiplier for space-bar leaps.
const LEAP_MULTIPLIER: f64 = 5.0;

/// Scalar knobs for the stop-motion feel.
///
/// Defaults are pixel-sized; row-based hosts override `base_step` with
/// something terminal-sized via configuration.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Accepted frame cadence
    pub target_fps: f64,
    /// Wheel delta multiplier
    pub speed_factor: f64,
    /// Residual distance below which motion snaps to the target exactly
    pub snap_threshold: f64,
    /// Fraction of the remaining distance covered per accepted frame
    pub damping: f64,
    /// Pixel granularity each step is quantized to
    pub quantum: f64,
    /// Base unit for keyboard steps
    pub base_step: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            target_fps: 12.0,
            speed_factor: 1.2,
            snap_threshold: 0.5,
            damping: 0.25,
            quantum: 2.0,
            base_step: 80.0,
        }
    }
}

/// Keyboard scroll intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Down by 3x the base step (arrows, PageDown)
    StepDown,
    /// Up by 3x the base step (arrows, PageUp)
    StepUp,
    /// Down by 5x the base step (Space)
    LeapDown,
    /// Up by 5x the base step (Shift+Space)
    LeapUp,
    /// Jump to the top
    Top,
    /// Jump to the bottom
    Bottom,
}

/// What a frame notification amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Engine is not running
    Idle,
    /// Rejected by the frame-rate gate; no state changed
    Skipped,
    /// State advanced and the viewport offset was written
    Rendered,
}

/// The stop-motion scroll engine.
///
/// Owns its viewport capability and the scalar animation state. All
/// mutation happens from the host's single event loop; there is no
/// locking anywhere in the engine.
#[derive(Debug)]
pub struct ScrollEngine<V: Viewport> {
    viewport: V,
    tuning: Tuning,
    gate: FrameGate,
    /// Desired offset, clamped to [0, max_scroll]
    target: f64,
    /// Rendered offset, lags the target
    current: f64,
    /// Whether input is intercepted
    enabled: bool,
    /// Whether start() has run and destroy() has not
    running: bool,
}

impl<V: Viewport> ScrollEngine<V> {
    pub fn new(viewport: V, tuning: Tuning) -> Self {
        let gate = FrameGate::from_fps(tuning.target_fps);
        Self {
            viewport,
            tuning,
            gate,
            target: 0.0,
            current: 0.0,
            enabled: true,
            running: false,
        }
    }

    /// Begin intercepting input and animating.
    ///
    /// Captures the live viewport offset as both the current and target
    /// state, so starting never moves the view.
    pub fn start(&mut self) {
        let offset = self.clamped_live_offset();
        self.current = offset;
        self.target = offset;
        self.gate.reset();
        self.running = true;
    }

    /// Stop the engine and disarm the frame gate.
    ///
    /// Idempotent: calling before `start` or repeatedly is a no-op.
    pub fn destroy(&mut self) {
        self.running = false;
        self.gate.reset();
    }

    /// Enable or disable input interception.
    ///
    /// Disabling snaps the target to the live offset so pending motion
    /// halts where the viewport actually is. Re-enabling resumes
    /// interception without altering position.
    pub fn toggle(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            let offset = self.clamped_live_offset();
            self.current = offset;
            self.target = offset;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Desired offset the animation is heading toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Offset as of the last accepted frame.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Host access for dimension updates and fallback scrolling.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    fn intercepting(&self) -> bool {
        self.running && self.enabled
    }

    fn clamped_live_offset(&self) -> f64 {
        self.viewport
            .scroll_offset()
            .clamp(0.0, self.viewport.max_scroll())
    }

    /// Accumulate a wheel delta into the target offset.
    ///
    /// Returns whether the event was consumed; the host falls back to its
    /// native scrolling when it was not.
    pub fn handle_wheel(&mut self, delta: f64) -> bool {
        if !self.intercepting() {
            return false;
        }
        let max = self.viewport.max_scroll();
        self.target = (self.target + delta * self.tuning.speed_factor).clamp(0.0, max);
        true
    }

    /// Apply a keyboard scroll intent to the target offset.
    pub fn handle_command(&mut self, command: ScrollCommand) -> bool {
        if !self.intercepting() {
            return false;
        }
        let max = self.viewport.max_scroll();
        let step = self.tuning.base_step;
        self.target = match command {
            ScrollCommand::StepDown => (self.target + step * STEP_MULTIPLIER).clamp(0.0, max),
            ScrollCommand::StepUp => (self.target - step * STEP_MULTIPLIER).clamp(0.0, max),
            ScrollCommand::LeapDown => (self.target + step * LEAP_MULTIPLIER).clamp(0.0, max),
            ScrollCommand::LeapUp => (self.target - step * LEAP_MULTIPLIER).clamp(0.0, max),
            ScrollCommand::Top => 0.0,
            ScrollCommand::Bottom => max,
        };
        true
    }

    /// Re-synchronize after a layout change.
    ///
    /// The live viewport offset is authoritative once dimensions change;
    /// any in-flight animation is discarded. Runs even while disabled,
    /// since layout changes happen regardless of interception.
    pub fn handle_resize(&mut self) {
        if !self.running {
            return;
        }
        let max = self.viewport.max_scroll();
        self.target = self.target.clamp(0.0, max);
        self.current = self.clamped_live_offset();
    }

    /// The render step, driven by every host frame notification.
    ///
    /// Acts at the gated cadence only. On an accepted frame: snap when the
    /// residual is below the threshold, otherwise advance by a damped step
    /// quantized to the pixel granularity, then write the rounded offset
    /// to the viewport. Keeps running while disabled so the last written
    /// offset stays in place.
    pub fn tick(&mut self, now: Instant) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Idle;
        }
        if !self.gate.accept(now) {
            return FrameOutcome::Skipped;
        }

        let diff = self.target - self.current;
        if diff.abs() < self.tuning.snap_threshold {
            self.current = self.target;
        } else {
            let step = quantize_step(diff * self.tuning.damping, self.tuning.quantum);
            if step.abs() >= diff.abs() {
                // One quantum would overshoot; finish the motion exactly
                // instead of oscillating around the target.
                self.current = self.target;
            } else {
                self.current += step;
            }
        }

        self.viewport.set_scroll_offset(self.current.round());
        FrameOutcome::Rendered
    }
}

/// Quantize a damped step into a whole multiple of `quantum`.
///
/// Rounds away from zero to a whole pixel first, then to the nearest
/// quantum multiple. A nonzero input never quantizes to zero: the step is
/// bumped to one quantum in the direction of motion, which is what keeps
/// small residuals from stalling just above the snap threshold.
fn quantize_step(raw: f64, quantum: f64) -> f64 {
    if raw == 0.0 {
        return 0.0;
    }
    let quantum = if quantum > 0.0 { quantum } else { 1.0 };
    let pixels = if raw > 0.0 { raw.ceil() } else { raw.floor() };
    let stepped = (pixels / quantum).round() * quantum;
    if stepped == 0.0 {
        quantum.copysign(raw)
    } else {
        stepped
    }
}
