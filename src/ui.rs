// src/ui.rs

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::{mpsc, Mutex};

use crate::app::{App, AppScreen};
use crate::chat_view::draw_chat;
use crate::errors::ConfabResult;
use crate::key_handlers::{handle_chat_input, handle_quit_confirm_input};

enum Event {
    Input(CEvent),
    Tick,
}

/// Sets up the terminal, runs the app to completion, restores the
/// terminal even when the loop bails out with an error.
pub async fn run_ui(app: Arc<Mutex<App>>) -> ConfabResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Main loop: draw, then wait for the next input or tick. Ticks only
/// force a redraw, which is what keeps the typing dots moving while a
/// send task holds the conversation.
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: Arc<Mutex<App>>) -> ConfabResult<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            let timeout = Duration::from_millis(100);
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if tx.send(Event::Input(event)).await.is_err() {
                        return;
                    }
                }
            }

            if last_tick.elapsed() >= Duration::from_millis(250) {
                if tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        {
            let mut guard = app.lock().await;
            terminal.draw(|f| ui(f, &mut guard))?;
            if guard.should_quit {
                break;
            }
        }

        tokio::select! {
            Some(event) = rx.recv() => {
                match event {
                    Event::Input(CEvent::Key(key)) => {
                        let screen = { app.lock().await.screen };
                        match screen {
                            AppScreen::Chat => handle_chat_input(key, &app).await,
                            AppScreen::QuitConfirm => {
                                let mut guard = app.lock().await;
                                handle_quit_confirm_input(key, &mut guard);
                            }
                        }
                    }
                    Event::Input(_) => {}
                    Event::Tick => {}
                }
            }
            else => {
                break;
            }
        }
    }

    Ok(())
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)].as_ref())
        .split(f.area());

    draw_chat(f, app, chunks[0]);

    if app.screen == AppScreen::QuitConfirm {
        draw_quit_confirm(f, f.area());
    }

    draw_footer(f, chunks[1], app);
}

fn draw_quit_confirm(f: &mut Frame, area: Rect) {
    let modal = Rect {
        x: area.x + area.width.saturating_sub(50) / 2,
        y: area.y + area.height.saturating_sub(6) / 2,
        width: 50.min(area.width),
        height: 6.min(area.height),
    };

    f.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Confirm Quit")
        .style(Style::default().fg(Color::LightYellow));
    let inner = block.inner(modal);
    f.render_widget(block, modal);

    let quit_text = "Are you sure you want to quit?\n\nPress 'y' to confirm quit or 'n' to cancel.";
    let paragraph = Paragraph::new(quit_text)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, inner);
}

/// Draws the footer with dynamic instructions
fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let instructions = match app.screen {
        AppScreen::Chat => {
            "Enter to send, Shift+Enter for a new line. F1-F3 prompts, PgUp/PgDn scroll, Ctrl+S transcript, Esc to quit."
        }
        AppScreen::QuitConfirm => "Press 'y' to confirm quit or 'n' to cancel.",
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
