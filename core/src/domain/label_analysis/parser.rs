//! Best-effort recovery of typed fields from free-form model output.
//!
//! Neither entry point fails. Missing fields fall back to fixed defaults, and
//! any error while extracting collapses the whole result to a single fallback.

use std::{num::ParseIntError, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::label_analysis::entities::{AnalysisOutcome, Recommendation};

pub const DEFAULT_HEALTH_SCORE: i32 = 5;
pub const NO_ANALYSIS_FALLBACK: &str = "No detailed analysis available";
pub const NO_SUMMARY_FALLBACK: &str = "No summary available";
pub const PARSE_FAILED_SUMMARY: &str = "Analysis completed but parsing failed";

// The body is anchored on `**ANALYSIS:**`, which the prompt's
// `**DETAILED ANALYSIS:**` header does not satisfy.
static RECOMMENDATION: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?i)\*\*RECOMMENDATION:\*\*\s*\[([^\]]+)\]"));
static HEALTH_SCORE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?i)\*\*HEALTH SCORE:\*\*\s*([0-9]+)"));
static ANALYSIS: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?is)\*\*ANALYSIS:\*\*(.*?)\*\*SUMMARY:\*\*"));
static SUMMARY: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?is)\*\*SUMMARY:\*\*\s*(.+)"));
static TITLE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"(?i)\A\s*\*\*TITLE:?\*\*[ \t]*[:\-]?[ \t]*([^\n]*?)[ \t]*(?:---|\r?\n|\z)")
});

#[derive(Debug, Error)]
enum ParseError {
    #[error("marker pattern failed to compile: {0}")]
    Pattern(regex::Error),

    #[error("health score is not a valid integer: {0}")]
    HealthScore(#[from] ParseIntError),
}

fn pattern(
    cell: &'static LazyLock<Result<Regex, regex::Error>>,
) -> Result<&'static Regex, ParseError> {
    LazyLock::force(cell)
        .as_ref()
        .map_err(|e| ParseError::Pattern(e.clone()))
}

fn first_capture<'a>(regex: &Regex, text: &'a str) -> Option<&'a str> {
    regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
}

/// Reads the analysis fields out of a raw model response.
pub fn parse_analysis(raw: &str) -> AnalysisOutcome {
    try_parse_analysis(raw).unwrap_or_else(|e| {
        warn!("Failed to parse analysis response: {}", e);
        AnalysisOutcome {
            recommendation: Recommendation::Moderate,
            health_score: DEFAULT_HEALTH_SCORE,
            analysis: raw.to_string(),
            summary: PARSE_FAILED_SUMMARY.to_string(),
            raw_response: raw.to_string(),
        }
    })
}

fn try_parse_analysis(raw: &str) -> Result<AnalysisOutcome, ParseError> {
    let recommendation = first_capture(pattern(&RECOMMENDATION)?, raw)
        .map(|label| Recommendation::from(label.to_uppercase().as_str()))
        .unwrap_or(Recommendation::Moderate);

    let health_score = match first_capture(pattern(&HEALTH_SCORE)?, raw) {
        Some(score) => score.parse::<i32>()?,
        None => DEFAULT_HEALTH_SCORE,
    };

    let analysis = first_capture(pattern(&ANALYSIS)?, raw)
        .map_or_else(|| NO_ANALYSIS_FALLBACK.to_string(), str::to_string);

    let summary = first_capture(pattern(&SUMMARY)?, raw)
        .map_or_else(|| NO_SUMMARY_FALLBACK.to_string(), str::to_string);

    Ok(AnalysisOutcome {
        recommendation,
        health_score,
        analysis,
        summary,
        raw_response: raw.to_string(),
    })
}

/// A chat answer split into its optional leading title and the visible body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub title: Option<String>,
    pub body: String,
}

/// Separates a leading `**TITLE**` line from a chat answer.
pub fn parse_chat_response(raw: &str) -> ChatResponse {
    try_parse_chat_response(raw).unwrap_or_else(|e| {
        warn!("Failed to parse chat response: {}", e);
        ChatResponse {
            title: None,
            body: raw.trim().to_string(),
        }
    })
}

fn try_parse_chat_response(raw: &str) -> Result<ChatResponse, ParseError> {
    let Some(captures) = pattern(&TITLE)?.captures(raw) else {
        return Ok(ChatResponse {
            title: None,
            body: raw.trim().to_string(),
        });
    };

    let title = captures
        .get(1)
        .map(|m| m.as_str().trim())
        .filter(|title| !title.is_empty())
        .map(str::to_string);

    let matched_end = captures.get(0).map_or(0, |m| m.end());
    let rest = raw[matched_end..].trim_start();
    let body = rest.strip_prefix("---").unwrap_or(rest).trim().to_string();

    Ok(ChatResponse { title, body })
}
