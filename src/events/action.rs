//! Action enum for decoupling input handling from state changes.

use crate::engine::ScrollCommand;

/// Actions that can be dispatched from event handlers.
///
/// These represent user intents and are processed by the App to update state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    // === Application ===
    /// Quit the application
    Quit,
    /// Open help popup
    OpenHelp,
    /// Close help popup
    CloseHelp,

    // === Scrolling ===
    /// Wheel movement in rows, before speed scaling
    Wheel(f64),
    /// Keyboard scroll intent
    Scroll(ScrollCommand),
    /// Enable/disable the stop-motion engine
    ToggleEngine,

    // === Layout ===
    /// Terminal dimensions changed; re-wrap and re-sync scroll state
    Relayout,

    // === No-op ===
    /// No action to take
    None,
}
