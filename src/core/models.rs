// src/core/models.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// --- Verdict & Bias Vocabulary ---

/// The four fixed verdict labels the model is asked to choose from.
///
/// The wire value stays a free-form `String` on [`AnalysisResult`], since the
/// model is only *asked* to match this vocabulary. Use [`AnalysisResult::verdict_kind`]
/// to get the typed label back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Verdict {
    #[strum(serialize = "Reliable")]
    Reliable,
    #[strum(serialize = "Partially Reliable")]
    PartiallyReliable,
    #[strum(serialize = "Unreliable")]
    Unreliable,
    #[strum(serialize = "Likely Fake")]
    LikelyFake,
}

/// Bias level reported in [`BiasAnalysis::level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum BiasLevel {
    Low,
    Medium,
    High,
}

// --- Analysis Result ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiasAnalysis {
    pub level: String,
    pub description: String,
}

impl BiasAnalysis {
    pub fn level_kind(&self) -> Option<BiasLevel> {
        self.level.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactualAccuracy {
    pub score: f64,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClickbaitPotential {
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyClaim {
    pub claim: String,
    pub is_verified: bool,
    pub explanation: String,
}

/// A web page the model consulted while grounding its answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub url: String,
}

/// The complete credibility assessment for one piece of content.
///
/// Everything except `sources_found` comes straight from the model's JSON
/// payload. `sources_found` is derived from the grounding metadata of the
/// response, so it defaults to empty when deserializing the payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub credibility_score: f64,
    pub verdict: String,
    pub summary: String,
    pub bias_analysis: BiasAnalysis,
    pub factual_accuracy: FactualAccuracy,
    pub clickbait_potential: ClickbaitPotential,
    pub key_claims: Vec<KeyClaim>,
    #[serde(default)]
    pub sources_found: Vec<Source>,
}

impl AnalysisResult {
    /// Returns the typed verdict, or `None` if the model strayed from the vocabulary.
    pub fn verdict_kind(&self) -> Option<Verdict> {
        self.verdict.trim().parse().ok()
    }
}

// --- Scan History ---

/// Maximum number of entries retained in the scan history.
pub const HISTORY_CAPACITY: usize = 10;

/// Number of input characters kept in a history entry title.
pub const HISTORY_TITLE_CHARS: usize = 60;

/// A compact record of a past analysis, persisted between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanHistoryEntry {
    pub id: String,
    pub title: String,
    /// Submission time, Unix milliseconds.
    pub timestamp: i64,
    pub score: f64,
    pub verdict: String,
}

impl ScanHistoryEntry {
    /// Builds the entry for a successful analysis of `input` submitted at `timestamp`.
    pub fn from_analysis(input: &str, timestamp: i64, result: &AnalysisResult) -> Self {
        let mut title: String = input.chars().take(HISTORY_TITLE_CHARS).collect();
        title.push_str("...");

        Self {
            id: timestamp.to_string(),
            title,
            timestamp,
            score: result.credibility_score,
            verdict: result.verdict.clone(),
        }
    }
}
