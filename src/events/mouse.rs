//! Mouse event handling.
//!
//! Terminal wheel events arrive as discrete ticks; each tick maps to a
//! fixed number of rows which the engine then scales by its speed factor.

use crossterm::event::{MouseEvent, MouseEventKind};

use super::Action;

/// Rows of scroll intent per wheel tick.
const WHEEL_ROWS: f64 = 3.0;

/// Handle mouse events and return the appropriate action.
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollUp => Action::Wheel(-WHEEL_ROWS),
        MouseEventKind::ScrollDown => Action::Wheel(WHEEL_ROWS),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_wheel_ticks_map_to_rows() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollUp)),
            Action::Wheel(-3.0)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown)),
            Action::Wheel(3.0)
        );
    }

    #[test]
    fn test_clicks_are_ignored() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            Action::None
        );
    }
}
