//! Parsing replies from the delegated insight service
//!
//! Services often wrap JSON in markdown fences or surrounding prose even
//! when asked for bare JSON. Extraction tries the clean case first, then
//! peels fences, then falls back to the outermost braces.

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while parsing a generated reply
#[derive(Debug, Clone, Error)]
pub enum ResponseError {
    /// No JSON object could be located in the reply
    #[error("No JSON object found in insight response")]
    NoJsonFound,

    /// The located JSON failed to parse
    #[error("Invalid JSON in insight response: {0}")]
    InvalidJson(String),

    /// A required field is absent or empty
    #[error("Missing or empty field in insight response: {0}")]
    MissingField(&'static str),
}

/// Validated reply contents, without the engine label
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInsights {
    pub executive_summary: String,
    pub key_insights: Vec<String>,
    pub strategic_recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsightDto {
    executive_summary: Option<String>,
    key_insights: Option<Vec<String>>,
    strategic_recommendations: Option<Vec<String>>,
}

/// Parses and validates a service reply into its insight fields.
pub fn parse_insight_response(response: &str) -> Result<ParsedInsights, ResponseError> {
    debug!("Parsing insight response ({} chars)", response.len());

    let json_str = extract_json_from_response(response)?;

    let dto: InsightDto = serde_json::from_str(&json_str).map_err(|e| {
        warn!("Failed to parse insight JSON: {}", e);
        ResponseError::InvalidJson(e.to_string())
    })?;

    let executive_summary = dto
        .executive_summary
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ResponseError::MissingField("executiveSummary"))?;

    let key_insights = non_empty_lines(dto.key_insights)
        .ok_or(ResponseError::MissingField("keyInsights"))?;

    let strategic_recommendations = non_empty_lines(dto.strategic_recommendations)
        .ok_or(ResponseError::MissingField("strategicRecommendations"))?;

    Ok(ParsedInsights {
        executive_summary,
        key_insights,
        strategic_recommendations,
    })
}

/// Drops blank entries and rejects lists left empty afterwards.
fn non_empty_lines(lines: Option<Vec<String>>) -> Option<Vec<String>> {
    let kept: Vec<String> = lines?
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept)
    }
}

/// Extracts a JSON object from a reply that may wrap it in markdown or prose.
fn extract_json_from_response(response: &str) -> Result<String, ResponseError> {
    let trimmed = response.trim();

    // Case 1: the reply is already a bare JSON object
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Ok(trimmed.to_string());
    }

    // Case 2: JSON inside a markdown code fence
    if trimmed.contains("```") {
        let fence = Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```").expect("valid regex");
        if let Some(captures) = fence.captures(trimmed) {
            if let Some(body) = captures.get(1) {
                let extracted = body.as_str().trim();
                if extracted.starts_with('{') {
                    return Ok(extracted.to_string());
                }
            }
        }
    }

    // Case 3: JSON embedded in surrounding prose
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return Ok(trimmed[start..=end].to_string());
        }
    }

    Err(ResponseError::NoJsonFound)
}
