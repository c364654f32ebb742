//! Application state and action dispatch.

use std::time::Instant;

use crate::config::Config;
use crate::document::Document;
use crate::engine::{FrameOutcome, RowViewport, ScrollCommand, ScrollEngine, Viewport};
use crate::events::Action;
use crate::log;
use crate::reveal::RevealTracker;

/// Rows taken by chrome around the document: title, status, hotkeys.
const CHROME_ROWS: u16 = 3;

/// Multipliers shared with the engine's keyboard handling, reused for the
/// native fallback jumps when the engine is disabled.
const STEP_MULTIPLIER: f64 = 3.0;
const LEAP_MULTIPLIER: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Reader,
    Help,
}

/// Top-level application state.
pub struct App {
    pub input_mode: InputMode,
    pub document: Document,
    pub engine: ScrollEngine<RowViewport>,
    pub reveal: RevealTracker,
    pub should_quit: bool,
    relayout_pending: bool,
    last_size: Option<(u16, u16)>,
}

impl App {
    pub fn new(document: Document, config: &Config) -> Self {
        let viewport = RowViewport::new(document.line_count(), 0);
        let mut engine = ScrollEngine::new(viewport, config.scroll.tuning());
        engine.start();

        let mut reveal = RevealTracker::default();
        for (id, range) in document.block_ranges() {
            reveal.observe(id, range);
        }

        Self {
            input_mode: InputMode::Reader,
            document,
            engine,
            reveal,
            should_quit: false,
            relayout_pending: false,
            last_size: None,
        }
    }

    /// Apply a user intent.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.engine.destroy();
                self.reveal.disconnect();
                self.should_quit = true;
            }
            Action::OpenHelp => self.input_mode = InputMode::Help,
            Action::CloseHelp => self.input_mode = InputMode::Reader,
            Action::ToggleEngine => {
                let enabled = !self.engine.is_enabled();
                self.engine.toggle(enabled);
                log::log_event(if enabled {
                    "stop-motion engine enabled"
                } else {
                    "stop-motion engine disabled"
                });
            }
            Action::Wheel(delta) => {
                if !self.engine.handle_wheel(delta) {
                    self.jump_rows(delta);
                }
            }
            Action::Scroll(command) => {
                if !self.engine.handle_command(command) {
                    self.jump_command(command);
                }
            }
            Action::Relayout => self.relayout_pending = true,
            Action::None => {}
        }
    }

    /// Sync layout-dependent state before drawing.
    ///
    /// Reflows the document and re-syncs the engine when the terminal size
    /// changed (or a resize event was queued), then reports the visible
    /// window to the reveal tracker.
    pub fn before_render(&mut self, width: u16, height: u16) {
        let size = (width, height);
        if self.relayout_pending || self.last_size != Some(size) {
            self.relayout_pending = false;
            self.last_size = Some(size);

            self.document.reflow(width);
            let view_rows = height.saturating_sub(CHROME_ROWS) as usize;
            self.engine
                .viewport_mut()
                .set_dimensions(self.document.line_count(), view_rows);
            self.engine.handle_resize();
            self.reveal.reobserve(self.document.block_ranges());
        }

        self.update_reveal();
    }

    /// Drive the animation from a scheduler frame notification.
    pub fn on_frame(&mut self, now: Instant) -> FrameOutcome {
        self.engine.tick(now)
    }

    /// Report the visible window to the reveal tracker.
    pub fn update_reveal(&mut self) {
        let top = self.engine.viewport().top_row();
        let height = self.engine.viewport().view_rows();
        for id in self.reveal.update(top, height) {
            log::log_event(&format!("revealed block {}", id));
        }
    }

    /// Top visible document line.
    pub fn top_row(&self) -> usize {
        self.engine.viewport().top_row()
    }

    /// Scroll position as a percentage for the status bar.
    pub fn scroll_percent(&self) -> u16 {
        let max = self.engine.viewport().max_scroll();
        if max <= 0.0 {
            return 100;
        }
        ((self.engine.viewport().scroll_offset() / max) * 100.0).round() as u16
    }

    /// Immediate jump used when the stop-motion engine is off.
    fn jump_rows(&mut self, rows: f64) {
        let viewport = self.engine.viewport_mut();
        let offset = viewport.scroll_offset() + rows;
        viewport.set_scroll_offset(offset);
    }

    fn jump_command(&mut self, command: ScrollCommand) {
        let step = self.engine.tuning().base_step;
        let viewport = self.engine.viewport_mut();
        let offset = match command {
            ScrollCommand::StepDown => viewport.scroll_offset() + step * STEP_MULTIPLIER,
            ScrollCommand::StepUp => viewport.scroll_offset() - step * STEP_MULTIPLIER,
            ScrollCommand::LeapDown => viewport.scroll_offset() + step * LEAP_MULTIPLIER,
            ScrollCommand::LeapUp => viewport.scroll_offset() - step * LEAP_MULTIPLIER,
            ScrollCommand::Top => 0.0,
            ScrollCommand::Bottom => viewport.max_scroll(),
        };
        viewport.set_scroll_offset(offset);
    }
}

/// Small app over a three-block document, shared by handler tests.
#[cfg(test)]
pub fn test_app() -> App {
    let document = Document::from_markdown("test", "alpha\n\nbeta\n\ngamma\n");
    App::new(document, &Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_mode_round_trip() {
        let mut app = test_app();
        assert_eq!(app.input_mode, InputMode::Reader);

        app.dispatch(Action::OpenHelp);
        assert_eq!(app.input_mode, InputMode::Help);

        app.dispatch(Action::CloseHelp);
        assert_eq!(app.input_mode, InputMode::Reader);
    }

    #[test]
    fn test_quit_destroys_engine() {
        let mut app = test_app();
        assert!(app.engine.is_running());

        app.dispatch(Action::Quit);
        assert!(app.should_quit);
        assert!(!app.engine.is_running());
    }

    #[test]
    fn test_wheel_falls_back_when_engine_disabled() {
        let mut app = test_app();
        // Single content row, so even a short document can scroll.
        app.before_render(40, 4);

        app.dispatch(Action::ToggleEngine);
        assert!(!app.engine.is_enabled());

        let before = app.engine.viewport().scroll_offset();
        app.dispatch(Action::Wheel(3.0));
        let after = app.engine.viewport().scroll_offset();

        // Disabled engine means an immediate native jump, no animation.
        assert!(after > before);
        assert_eq!(app.engine.current(), app.engine.target());
    }

    #[test]
    fn test_fallback_end_jump_hits_bottom() {
        let mut app = test_app();
        app.before_render(40, 4);
        app.dispatch(Action::ToggleEngine);

        app.dispatch(Action::Scroll(ScrollCommand::Bottom));
        let max = app.engine.viewport().max_scroll();
        assert_eq!(app.engine.viewport().scroll_offset(), max);

        app.dispatch(Action::Scroll(ScrollCommand::Top));
        assert_eq!(app.engine.viewport().scroll_offset(), 0.0);
    }

    #[test]
    fn test_before_render_sizes_viewport_and_reveals() {
        let mut app = test_app();
        app.before_render(40, 10);

        assert_eq!(app.engine.viewport().view_rows(), 7);
        assert!(app.engine.viewport().content_height() > 0.0);

        // The opening blocks are inside the initial window.
        assert!(app.reveal.is_revealed(0));
    }

    #[test]
    fn test_scroll_percent_bounds() {
        let mut app = test_app();
        app.before_render(40, 8);

        // Short documents have nowhere to scroll.
        if app.engine.viewport().max_scroll() == 0.0 {
            assert_eq!(app.scroll_percent(), 100);
        } else {
            assert!(app.scroll_percent() <= 100);
        }
    }
}
