//! Keyboard event handling by input mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode};
use crate::engine::ScrollCommand;

use super::Action;

/// Handle keyboard events and return the appropriate action.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    match app.input_mode {
        InputMode::Reader => handle_reader_mode(key),
        InputMode::Help => handle_help_mode(key),
    }
}

fn handle_reader_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') => Action::OpenHelp,

        // Stop-motion engine on/off
        KeyCode::Char('s') => Action::ToggleEngine,

        // Line-ish steps (3x base)
        KeyCode::Char('j') | KeyCode::Down | KeyCode::PageDown => {
            Action::Scroll(ScrollCommand::StepDown)
        }
        KeyCode::Char('k') | KeyCode::Up | KeyCode::PageUp => {
            Action::Scroll(ScrollCommand::StepUp)
        }

        // Big leaps (5x base); Shift+Space reverses
        KeyCode::Char(' ') => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                Action::Scroll(ScrollCommand::LeapUp)
            } else {
                Action::Scroll(ScrollCommand::LeapDown)
            }
        }

        // Document ends
        KeyCode::Char('g') | KeyCode::Home => Action::Scroll(ScrollCommand::Top),
        KeyCode::Char('G') | KeyCode::End => Action::Scroll(ScrollCommand::Bottom),

        _ => Action::None,
    }
}

fn handle_help_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => Action::CloseHelp,
        _ => Action::None,
    }
}
