mod app;
mod config;
mod document;
mod engine;
mod error;
mod events;
mod log;
mod media;
mod reveal;
mod tui;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use app::App;
use config::Config;
use document::Document;
use events::EventHandler;

/// How often the render loop offers the engine a frame notification.
///
/// Much faster than any sensible animation rate; the engine's own gate
/// sets the visible pace and skips the rest.
const FRAME_NOTIFY_INTERVAL: Duration = Duration::from_millis(16);

fn print_usage() {
    eprintln!("Usage: flick [OPTIONS] <file.md>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --shelf        render the configured media shelf instead of a file");
    eprintln!("  --no-engine    start with stop-motion scrolling disabled");
    eprintln!("  --fps <rate>   override the animation frame rate");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
        log::install_panic_hook();
    }

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut file: Option<PathBuf> = None;
    let mut shelf = false;
    let mut no_engine = false;
    let mut fps_override: Option<f64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--shelf" => shelf = true,
            "--no-engine" => no_engine = true,
            "--fps" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<f64>() {
                        Ok(rate) => fps_override = Some(rate),
                        Err(_) => eprintln!("Warning: invalid --fps value '{}'", args[i + 1]),
                    }
                    i += 2;
                    continue;
                } else {
                    eprintln!("Warning: --fps requires a rate argument");
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            arg if !arg.starts_with('-') => file = Some(PathBuf::from(arg)),
            _ => {
                // Unknown flag, ignore
            }
        }
        i += 1;
    }

    let config = Config::load().with_overrides(fps_override);

    // Resolve the document before touching the terminal so errors print cleanly
    let document = if shelf {
        let client = media::http_client();
        log::log(&format!(
            "Fetching shelf: {} anime, {} games",
            config.shelf.anime.len(),
            config.shelf.games.len()
        ));
        let anime = media::fetch_all_anime(&client, &config.shelf.anime).await;
        let games = media::fetch_all_games(&client, &config.shelf.games).await;
        Document::from_markdown("shelf", media::shelf_markdown(&anime, &games))
    } else {
        let Some(path) = file else {
            print_usage();
            return Ok(());
        };
        Document::load(&path)?
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(document, &config);
    if no_engine {
        app.engine.toggle(false);
    }

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Event stream for keyboard and mouse
    let mut event_stream = EventStream::new();

    // Repaint-opportunity notifications for the scroll engine
    let mut frames = tokio::time::interval(FRAME_NOTIFY_INTERVAL);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        // Sync layout state, then render
        let size = terminal.size()?;
        app.before_render(size.width, size.height);
        terminal.draw(|frame| tui::ui::render(frame, app))?;

        tokio::select! {
            // Terminal events (keyboard, mouse, resize)
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        let action = EventHandler::handle_event(app, &event);
                        app.dispatch(action);
                    }
                    Some(Err(_)) => {}
                    None => break,
                }
            }
            // Frame notification; the engine decides whether to act on it
            _ = frames.tick() => {
                app.on_frame(Instant::now());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
