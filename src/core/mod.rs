// src/core/mod.rs

// Everything the UI shows comes through these modules: the data model, the
// analysis client and the persisted scan history.

/// Data structures shared across the application, such as `AnalysisResult`
/// and `ScanHistoryEntry`.
pub mod models;

/// Error types for the analysis client and the history store.
pub mod error;

/// Analyzer settings read from the environment.
pub mod config;

/// The Gemini client: request construction, response parsing and
/// grounding-source extraction.
pub mod analyzer;

/// The persisted scan history.
pub mod history;
