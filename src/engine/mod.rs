//! Stop-motion scroll engine.
//!
//! Intercepts continuous scroll input and renders a low-frequency,
//! quantized scroll position, producing a stop-motion effect instead of
//! smooth scrolling:
//! - `controller` - the discretized scroll state machine
//! - `timing` - frame-rate gating with drift correction
//! - `viewport` - the injected scrollable-surface capability

mod controller;
mod timing;
mod viewport;

pub use controller::{FrameOutcome, ScrollCommand, ScrollEngine, Tuning};
pub use timing::FrameGate;
pub use viewport::{RowViewport, Viewport};
