//! mealzone-tui: Terminal host for the meal-timing timeline chart
//!
//! This crate displays the chart in a terminal, including:
//! - Scene painting into terminal cells
//! - Mouse hover for zone tooltips and the title legend
//! - Keyboard zone selection and a help overlay

mod app;
mod event;
mod pointer;
mod screens;
#[cfg(test)]
pub mod test_utils;
pub mod theme;
mod ui;
pub mod widgets;

use screens::Screen as ScreenTrait;

pub use app::{App, TITLE};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use mealzone_engine;
pub use pointer::PointerTracker;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mealzone_engine::ChartConfig;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

/// Frame interval while idle or animating.
const TICK_RATE_MS: u64 = 50;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// on exit.
pub async fn run_tui(config: &ChartConfig) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.area = area;
            screens::chart::ChartScreen.render(app, area, frame.buffer_mut());
        })?;

        if let Some(event) = events.next().await {
            let now = app.elapsed();
            match event {
                Event::Key(key) => {
                    // Windows reports releases too
                    if key.kind == KeyEventKind::Press {
                        app.handle_action(key_to_action(key), now);
                    }
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse.column, mouse.row, now);
                }
                Event::Tick => {
                    app.tick(now);
                }
                Event::Resize(width, height) => {
                    tracing::debug!(width, height, "terminal resized");
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
