// src/main.rs

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

mod app;
mod core;
mod logging;
mod ui;

use app::{App, AppState};
use crate::core::analyzer::GeminiClient;
use crate::core::config::AnalyzerConfig;
use crate::core::error::AnalysisError;
use crate::core::history::HistoryStore;
use crate::core::models::AnalysisResult;

type AnalysisOutcome = Result<AnalysisResult, AnalysisError>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    // Fail before touching the terminal so the message stays readable.
    let config = AnalyzerConfig::from_env().wrap_err("cannot start without a Gemini API key")?;
    let client = Arc::new(GeminiClient::new(config)?);
    info!(model = client.model(), "Starting Veritas RS.");

    let history = HistoryStore::open(logging::history_path());

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableBracketedPaste)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = run(&mut terminal, App::new(history), client).await;

    // --- Restore Terminal ---
    disable_raw_mode()?;
    stdout().execute(DisableBracketedPaste)?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App, client: Arc<GeminiClient>) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AnalysisOutcome>(1);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &tx, &client)?;
        } else {
            app.on_tick();
        }

        if let Ok(outcome) = rx.try_recv() {
            app.finish_analysis(outcome);
        }
    }

    info!("Shutting down.");
    Ok(())
}

/// Single event dispatcher, routed by state.
fn handle_events(app: &mut App, tx: &mpsc::Sender<AnalysisOutcome>, client: &Arc<GeminiClient>) -> Result<()> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if is_quit(&key) {
                app.quit();
                return Ok(());
            }
            if app.show_disclaimer {
                if key.code == KeyCode::Enter {
                    app.dismiss_disclaimer();
                }
                return Ok(());
            }
            match app.state {
                AppState::Idle => handle_idle_input(app, key, tx, client),
                AppState::Finished => handle_finished_input(app, key.code),
                AppState::Analyzing => {}
            }
        }
        Event::Paste(text) if matches!(app.state, AppState::Idle) && !app.show_disclaimer => app.paste(&text),
        _ => {}
    }
    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
}

/// Handles input while the user is editing (Idle).
fn handle_idle_input(app: &mut App, key: KeyEvent, tx: &mpsc::Sender<AnalysisOutcome>, client: &Arc<GeminiClient>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('l') if ctrl => app.clear_history(),
        KeyCode::Char(c) if !ctrl => app.push_char(c),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Enter => start_analysis(app, tx, client),
        _ => {}
    }
}

/// Handles input while a report is displayed (Finished).
fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Char('e') => app.edit(),
        KeyCode::Char('c') => app.clear_history(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ => {}
    }
}

fn start_analysis(app: &mut App, tx: &mpsc::Sender<AnalysisOutcome>, client: &Arc<GeminiClient>) {
    let Some(text) = app.begin_analysis(Utc::now().timestamp_millis()) else {
        return;
    };

    let tx_clone = tx.clone();
    let client = Arc::clone(client);
    tokio::spawn(async move {
        let outcome = client.analyze(&text).await;
        if tx_clone.send(outcome).await.is_err() {
            warn!("UI closed before the analysis finished.");
        }
    });
}
