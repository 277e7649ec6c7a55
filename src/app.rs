// src/app.rs

use crate::core::error::AnalysisError;
use crate::core::history::HistoryStore;
use crate::core::models::{AnalysisResult, ScanHistoryEntry};
use ratatui::widgets::ScrollbarState;
use tracing::{error, info, warn};

pub const SPINNER_CHARS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Minimum number of characters (after trimming) accepted for analysis.
pub const MIN_INPUT_CHARS: usize = 50;

pub const INPUT_TOO_SHORT_MESSAGE: &str =
    "Please provide a longer text sample (at least 50 characters) for accurate analysis.";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze content. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Editing the input. May carry an error banner.
    Idle,
    /// One request is outstanding. Submission is disabled.
    Analyzing,
    /// A result is on screen.
    Finished,
}

/// The text being analyzed and when it was submitted (Unix ms).
#[derive(Debug, Clone)]
struct PendingSubmission {
    text: String,
    submitted_at: i64,
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub input: String,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    pub history: HistoryStore,
    pub show_disclaimer: bool,
    pub spinner_frame: usize,
    pub scroll_offset: usize,
    /// Last scroll offset that still shows report content, set on render.
    pub report_max_scroll: usize,
    pub report_scroll_state: ScrollbarState,
    pending: Option<PendingSubmission>,
}

impl App {
    pub fn new(history: HistoryStore) -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            input: String::new(),
            result: None,
            error: None,
            history,
            show_disclaimer: true,
            spinner_frame: 0,
            scroll_offset: 0,
            report_max_scroll: 0,
            report_scroll_state: ScrollbarState::default(),
            pending: None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, AppState::Analyzing)
    }

    /// Validates the input and, when acceptable, moves to `Analyzing`.
    ///
    /// Returns the text to send to the analyzer, or `None` when nothing must be
    /// sent: the input is too short (the validation banner is set and nothing
    /// else changes), or a request is already outstanding.
    pub fn begin_analysis(&mut self, now_ms: i64) -> Option<String> {
        if self.is_analyzing() {
            return None;
        }

        let trimmed_len = self.input.trim().chars().count();
        if trimmed_len < MIN_INPUT_CHARS {
            info!(chars = trimmed_len, "Rejected input shorter than the minimum.");
            self.error = Some(INPUT_TOO_SHORT_MESSAGE.to_string());
            return None;
        }

        self.error = None;
        self.result = None;
        self.reset_scroll();
        self.state = AppState::Analyzing;
        self.pending = Some(PendingSubmission {
            text: self.input.clone(),
            submitted_at: now_ms,
        });
        Some(self.input.clone())
    }

    /// Applies the outcome of the outstanding analysis.
    pub fn finish_analysis(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        let Some(pending) = self.pending.take() else {
            warn!("Received an analysis outcome with no pending submission.");
            return;
        };

        match outcome {
            Ok(result) => {
                let entry = ScanHistoryEntry::from_analysis(&pending.text, pending.submitted_at, &result);
                if let Err(e) = self.history.record(entry) {
                    error!(error = %e, "Failed to persist history.");
                }
                self.result = Some(result);
                self.reset_scroll();
                self.state = AppState::Finished;
            }
            Err(e) => {
                error!(error = %e, "Analysis failed.");
                self.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
                self.result = None;
                self.state = AppState::Idle;
            }
        }
    }

    pub fn clear_history(&mut self) {
        if let Err(e) = self.history.clear() {
            error!(error = %e, "Failed to remove persisted history.");
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Inserts pasted text, normalizing Windows line endings.
    pub fn paste(&mut self, text: &str) {
        self.input.push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
    }

    pub fn dismiss_disclaimer(&mut self) {
        self.show_disclaimer = false;
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1).min(self.report_max_scroll);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
        self.report_max_scroll = 0;
        self.report_scroll_state = ScrollbarState::default();
    }

    pub fn on_tick(&mut self) {
        if self.is_analyzing() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Back to editing the same text, keeping any result off screen.
    pub fn edit(&mut self) {
        self.state = AppState::Idle;
        self.result = None;
        self.reset_scroll();
    }

    /// Starts over with an empty input.
    pub fn reset(&mut self) {
        self.edit();
        self.input = String::new();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::HISTORY_FILE;
    use crate::core::models::fixtures::sample_result;
    use crate::core::models::HISTORY_CAPACITY;
    use tempfile::TempDir;

    const NOW: i64 = 1_760_000_000_000;

    fn app_in(dir: &TempDir) -> App {
        App::new(HistoryStore::open(dir.path().join(HISTORY_FILE)))
    }

    fn article(len: usize) -> String {
        "Local officials confirmed that the river bridge will reopen next week after repairs. "
            .chars()
            .cycle()
            .take(len)
            .collect()
    }

    #[test]
    fn short_input_sets_error_and_sends_nothing() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.input = article(49);

        assert_eq!(app.begin_analysis(NOW), None);
        assert_eq!(app.state, AppState::Idle);
        assert_eq!(app.error.as_deref(), Some(INPUT_TOO_SHORT_MESSAGE));
        assert_eq!(app.input, article(49));
        assert!(app.result.is_none());
        assert!(app.history.is_empty());
    }

    #[test]
    fn surrounding_whitespace_does_not_count_towards_minimum() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.input = format!("   {}\n\n\n", article(45));

        assert_eq!(app.begin_analysis(NOW), None);
        assert_eq!(app.error.as_deref(), Some(INPUT_TOO_SHORT_MESSAGE));
    }

    #[test]
    fn short_input_keeps_previous_result() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.result = Some(sample_result(90.0, "Reliable"));
        app.state = AppState::Finished;
        app.input = "too short".to_string();

        assert_eq!(app.begin_analysis(NOW), None);
        assert_eq!(app.state, AppState::Finished);
        assert!(app.result.is_some());
    }

    #[test]
    fn valid_submit_clears_error_and_enters_analyzing() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
        app.input = article(80);

        assert_eq!(app.begin_analysis(NOW), Some(article(80)));
        assert_eq!(app.state, AppState::Analyzing);
        assert!(app.error.is_none());
        assert!(app.result.is_none());
    }

    #[test]
    fn second_submit_while_analyzing_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.input = article(80);

        assert!(app.begin_analysis(NOW).is_some());
        assert_eq!(app.begin_analysis(NOW + 1), None);
        assert!(app.is_analyzing());
    }

    #[test]
    fn fifty_char_submission_records_single_history_entry() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.input = article(50);

        let text = app.begin_analysis(NOW).unwrap();
        assert_eq!(text.chars().count(), 50);
        app.finish_analysis(Ok(sample_result(72.0, "Partially Reliable")));

        assert_eq!(app.state, AppState::Finished);
        let result = app.result.as_ref().unwrap();
        assert_eq!(result.credibility_score, 72.0);
        assert_eq!(result.verdict, "Partially Reliable");

        let entries = app.history.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, format!("{}...", article(50)));
        assert_eq!(entries[0].score, 72.0);
        assert_eq!(entries[0].verdict, "Partially Reliable");
        assert_eq!(entries[0].timestamp, NOW);
        assert_eq!(entries[0].id, NOW.to_string());

        let reloaded = HistoryStore::open(dir.path().join(HISTORY_FILE));
        assert_eq!(reloaded.entries(), entries);
    }

    #[test]
    fn history_grows_newest_first_and_stays_capped() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.input = article(120);

        for i in 0..(HISTORY_CAPACITY as i64 + 3) {
            let before = app.history.entries().len();
            app.edit();
            assert!(app.begin_analysis(NOW + i).is_some());
            app.finish_analysis(Ok(sample_result(i as f64, "Reliable")));
            assert_eq!(app.history.entries().len(), (before + 1).min(HISTORY_CAPACITY));
            assert_eq!(app.history.entries()[0].timestamp, NOW + i);
        }

        let stamps: Vec<i64> = app.history.entries().iter().map(|e| e.timestamp).collect();
        let mut sorted = stamps.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(stamps, sorted);
    }

    #[test]
    fn failure_sets_generic_error_and_returns_to_idle() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.input = article(80);

        app.begin_analysis(NOW).unwrap();
        app.finish_analysis(Err(AnalysisError::EmptyResponse));

        assert_eq!(app.state, AppState::Idle);
        assert_eq!(app.error.as_deref(), Some(ANALYSIS_FAILED_MESSAGE));
        assert!(app.result.is_none());
        assert!(app.history.is_empty());
        assert_eq!(app.input, article(80));
        assert!(app.begin_analysis(NOW + 1).is_some());
    }

    #[test]
    fn outcome_without_pending_submission_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.finish_analysis(Ok(sample_result(50.0, "Unreliable")));
        assert_eq!(app.state, AppState::Idle);
        assert!(app.result.is_none());
    }

    #[test]
    fn clear_history_empties_memory_and_disk() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.input = article(60);
        app.begin_analysis(NOW).unwrap();
        app.finish_analysis(Ok(sample_result(10.0, "Likely Fake")));

        app.clear_history();
        assert!(app.history.is_empty());
        assert!(!dir.path().join(HISTORY_FILE).exists());
        assert!(HistoryStore::open(dir.path().join(HISTORY_FILE)).is_empty());
    }

    #[test]
    fn spinner_only_advances_while_analyzing() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.on_tick();
        assert_eq!(app.spinner_frame, 0);

        app.input = article(60);
        app.begin_analysis(NOW).unwrap();
        for _ in 0..SPINNER_CHARS.len() + 1 {
            app.on_tick();
        }
        assert_eq!(app.spinner_frame, 1);
    }

    #[test]
    fn paste_normalizes_line_endings() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.paste("line one\r\nline two\rline three");
        assert_eq!(app.input, "line one\nline two\nline three");
    }

    #[test]
    fn reset_clears_input_and_error() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.input = "draft".to_string();
        app.error = Some(INPUT_TOO_SHORT_MESSAGE.to_string());
        app.state = AppState::Finished;

        app.reset();
        assert_eq!(app.state, AppState::Idle);
        assert!(app.input.is_empty());
        assert!(app.error.is_none());
    }

    #[test]
    fn scroll_down_stops_at_last_report_row() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.report_max_scroll = 3;

        for _ in 0..10 {
            app.scroll_down();
        }
        assert_eq!(app.scroll_offset, 3);

        app.scroll_up();
        assert_eq!(app.scroll_offset, 2);
    }
}
