// src/core/analyzer.rs

use crate::core::config::AnalyzerConfig;
use crate::core::error::AnalysisError;
use crate::core::models::{AnalysisResult, Source};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use url::Url;

/// Title used for grounding citations that come without one.
pub const FALLBACK_SOURCE_TITLE: &str = "External Source";

// --- Wire Types: Request ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Value>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing)]
    thought: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

// --- Wire Types: Response ---

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize, Default)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebReference>,
}

#[derive(Debug, Deserialize, Default)]
struct WebReference {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

// --- Request Construction ---

fn build_prompt(content: &str) -> String {
    format!(
        "Analyze the following news content for credibility, bias, and factual accuracy.\n\
         Content to analyze: \"{}\"",
        content
    )
}

/// The structured-output schema the model must answer with.
///
/// Mirrors [`AnalysisResult`] minus `sourcesFound`, which is derived from
/// grounding metadata instead.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "credibilityScore": { "type": "NUMBER", "description": "A score from 0-100 where 100 is highly credible." },
            "verdict": { "type": "STRING", "description": "One of: Reliable, Partially Reliable, Unreliable, Likely Fake" },
            "summary": { "type": "STRING", "description": "A concise summary of the analysis." },
            "biasAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "level": { "type": "STRING", "description": "Low, Medium, or High" },
                    "description": { "type": "STRING" }
                },
                "required": ["level", "description"]
            },
            "factualAccuracy": {
                "type": "OBJECT",
                "properties": {
                    "score": { "type": "NUMBER", "description": "0-100 score for facts." },
                    "issues": { "type": "ARRAY", "items": { "type": "STRING" } }
                },
                "required": ["score", "issues"]
            },
            "clickbaitPotential": {
                "type": "OBJECT",
                "properties": {
                    "score": { "type": "NUMBER", "description": "0-100 score for clickbait nature." },
                    "description": { "type": "STRING" }
                },
                "required": ["score", "description"]
            },
            "keyClaims": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "claim": { "type": "STRING" },
                        "isVerified": { "type": "BOOLEAN" },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["claim", "isVerified", "explanation"]
                }
            }
        },
        "required": [
            "credibilityScore", "verdict", "summary", "biasAnalysis",
            "factualAccuracy", "clickbaitPotential", "keyClaims"
        ]
    })
}

fn build_request(content: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part { text: Some(build_prompt(content)), thought: None }],
        }],
        tools: vec![json!({ "googleSearch": {} })],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: response_schema(),
        },
    }
}

// --- Response Interpretation ---

/// Concatenates the answer text of the first candidate, skipping thought parts.
fn response_text(response: &GenerateContentResponse) -> Option<String> {
    let parts = &response.candidates.first()?.content.as_ref()?.parts;
    let text: String = parts
        .iter()
        .filter(|p| !p.thought.unwrap_or(false))
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.trim().is_empty() { None } else { Some(text) }
}

/// Turns the grounding citations of the first candidate into display sources.
///
/// Citations without a web reference (or without a URI to link to) are skipped.
fn extract_sources(response: &GenerateContentResponse) -> Vec<Source> {
    let Some(metadata) = response
        .candidates
        .first()
        .and_then(|c| c.grounding_metadata.as_ref())
    else {
        debug!("Response carries no grounding metadata.");
        return Vec::new();
    };

    metadata
        .grounding_chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let url = web.uri.clone()?;
            let title = web
                .title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_SOURCE_TITLE.to_string());
            Some(Source { title, url })
        })
        .collect()
}

/// Parses the model payload and merges in the grounding sources.
fn interpret_response(response: &GenerateContentResponse) -> Result<AnalysisResult, AnalysisError> {
    let text = response_text(response).ok_or(AnalysisError::EmptyResponse)?;
    let mut result: AnalysisResult = serde_json::from_str(&text)?;
    result.sources_found = extract_sources(response);
    Ok(result)
}

// --- Client ---

/// Client for the Gemini `generateContent` endpoint with search grounding.
pub struct GeminiClient {
    client: reqwest::Client,
    config: AnalyzerConfig,
}

impl GeminiClient {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("VeritasRS/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> Result<Url, AnalysisError> {
        let base = Url::parse(&self.config.base_url)
            .map_err(|e| AnalysisError::Config(format!("invalid base URL '{}': {}", self.config.base_url, e)))?;
        base.join(&format!("v1beta/models/{}:generateContent", self.config.model))
            .map_err(|e| AnalysisError::Config(format!("invalid model name '{}': {}", self.config.model, e)))
    }

    /// Runs one credibility analysis of `content`.
    ///
    /// Issues exactly one request. Nothing is retried and no timeout is applied
    /// beyond what the transport itself does.
    pub async fn analyze(&self, content: &str) -> Result<AnalysisResult, AnalysisError> {
        let url = self.endpoint()?;
        info!(model = %self.config.model, chars = content.chars().count(), "Sending analysis request.");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&build_request(content))
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "Analysis request failed."))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Analysis service returned an error status.");
            return Err(AnalysisError::Status { status: status.as_u16(), body });
        }

        let body = response.text().await?;
        let payload: GenerateContentResponse = serde_json::from_str(&body)
            .inspect_err(|e| warn!(error = %e, "Analysis service sent an unreadable envelope."))?;
        let result = interpret_response(&payload).inspect_err(|e| {
            warn!(error = %e, "Could not interpret analysis response.");
        })?;

        info!(
            score = result.credibility_score,
            verdict = %result.verdict,
            sources = result.sources_found.len(),
            "Analysis finished."
        );
        Ok(result)
    }
}
