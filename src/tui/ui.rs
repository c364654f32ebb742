use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme::*;
use crate::app::{App, InputMode};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main vertical layout: title, document, status, hotkeys
    let main_layout = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Min(0),    // Document
        Constraint::Length(1), // Status
        Constraint::Length(1), // Hotkeys
    ])
    .split(area);

    render_title(frame, main_layout[0], app);
    render_document(frame, main_layout[1], app);
    render_status(frame, main_layout[2], app);
    render_hotkeys(frame, main_layout[3]);

    if app.input_mode == InputMode::Help {
        render_help(frame, area);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("f", Style::new().fg(LOGO_CORAL).bold()),
        Span::styled("l", Style::new().fg(LOGO_GOLD).bold()),
        Span::styled("i", Style::new().fg(LOGO_MINT).bold()),
        Span::styled("c", Style::new().fg(LOGO_GOLD).bold()),
        Span::styled("k", Style::new().fg(LOGO_CORAL).bold()),
        Span::raw("  "),
        Span::styled(app.document.title().to_string(), Style::new().fg(TEXT_WHITE).bold()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_document(frame: &mut Frame, area: Rect, app: &App) {
    let top = app.top_row();
    let height = area.height as usize;

    let visible: Vec<Line> = app
        .document
        .lines()
        .iter()
        .enumerate()
        .skip(top)
        .take(height)
        .map(|(i, line)| {
            let unrevealed = app
                .document
                .block_at_line(i)
                .map(|block| !app.reveal.is_revealed(block.id))
                .unwrap_or(false);
            if unrevealed {
                dim_line(line)
            } else {
                line.clone()
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(visible), area);
}

/// Flatten a line to the unrevealed color, dropping its own styling.
fn dim_line(line: &Line<'static>) -> Line<'static> {
    let spans: Vec<Span> = line
        .spans
        .iter()
        .map(|span| Span::styled(span.content.clone(), Style::new().fg(UNREVEALED)))
        .collect();
    Line::from(spans)
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.document.line_count();
    let position = (app.top_row() + 1).min(total.max(1));

    let (engine_label, engine_color) = if app.engine.is_enabled() {
        (
            format!("stop-motion {:.0}fps", app.engine.tuning().target_fps),
            LOGO_MINT,
        )
    } else {
        ("native scroll".to_string(), LOGO_GOLD)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" line {}/{}", position, total),
            Style::new().fg(TEXT_DIM),
        ),
        Span::styled(
            format!("  {}%", app.scroll_percent()),
            Style::new().fg(TEXT_DIM),
        ),
        Span::raw("  "),
        Span::styled(engine_label, Style::new().fg(engine_color)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_hotkeys(frame: &mut Frame, area: Rect) {
    let hotkeys = " j/k scroll · space leap · g/G ends · s engine · ? help · q quit";
    let line = Line::styled(hotkeys, Style::new().fg(TEXT_DIM));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    // Calculate centered popup area
    let popup_width = 44u16;
    let popup_height = 16u16;
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(
        x,
        y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![];

    lines.push(Line::from(vec![Span::styled(
        "Keyboard Shortcuts",
        Style::new().fg(TEXT_WHITE).bold(),
    )]));
    lines.push(Line::raw(""));

    let keys = [
        ("j / Down / PgDn", "Scroll down"),
        ("k / Up / PgUp  ", "Scroll up"),
        ("Space          ", "Leap down"),
        ("Shift+Space    ", "Leap up"),
        ("g / Home       ", "Jump to top"),
        ("G / End        ", "Jump to bottom"),
        ("s              ", "Toggle stop-motion"),
        ("q              ", "Quit"),
    ];
    for (key, description) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", key), Style::new().fg(TEXT_WHITE)),
            Span::styled(description, Style::new().fg(TEXT_DIM)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Press ", Style::new().fg(TEXT_DIM)),
        Span::styled("?", Style::new().fg(TEXT_WHITE)),
        Span::styled(" or ", Style::new().fg(TEXT_DIM)),
        Span::styled("Esc", Style::new().fg(TEXT_WHITE)),
        Span::styled(" to close", Style::new().fg(TEXT_DIM)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(LOGO_CORAL))
        .style(Style::new().bg(Color::Black));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup_area);
}
