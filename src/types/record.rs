//! One row of the AI influencer analyses table
//!
//! Decoding is total: numeric columns accept numbers or numeric strings,
//! JSON sub-documents go through [`normalize`], and anything unusable is
//! simply absent.

use crate::analysis::normalize::normalize;
use crate::source::Row;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// Columns of the analyses table used by the statistics pipeline
pub mod columns {
    pub const ID: &str = "id";
    pub const PLATFORM: &str = "platform";
    pub const FOLLOWERS: &str = "followers";
    pub const FOLLOWINGS: &str = "followings";
    pub const POSTS_COUNT: &str = "posts_count";
    pub const FOLLOW_NETWORK_ANALYSIS: &str = "follow_network_analysis";
    pub const COMMENT_AUTHENTICITY_ANALYSIS: &str = "comment_authenticity_analysis";
    pub const CONTENT_ANALYSIS: &str = "content_analysis";
    pub const EVALUATION: &str = "evaluation";
    pub const COMMERCE_ORIENTATION_ANALYSIS: &str = "commerce_orientation_analysis";
    pub const INSIGHTS: &str = "insights";
    pub const CATEGORY: &str = "category";
    pub const RECOMMENDATION: &str = "recommendation";
    pub const TAGS: &str = "tags";
    pub const ANALYZED_AT: &str = "analyzed_at";
    pub const CREATED_AT: &str = "created_at";
}

/// Read-only snapshot of one analysed influencer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisRecord {
    pub id: Option<String>,
    pub platform: Option<String>,
    pub followers: Option<f64>,
    pub followings: Option<f64>,
    pub posts_count: Option<f64>,
    pub follow_network_analysis: Map<String, Value>,
    pub comment_authenticity_analysis: Map<String, Value>,
    pub content_analysis: Map<String, Value>,
    pub evaluation: Map<String, Value>,
    pub commerce_orientation_analysis: Map<String, Value>,
    pub insights: Map<String, Value>,
    pub category: Option<String>,
    pub recommendation: Option<String>,
    pub tags: Vec<String>,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl AnalysisRecord {
    /// Decode a raw source row
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get(columns::ID).and_then(scalar_text),
            platform: row.get(columns::PLATFORM).and_then(non_empty_text),
            followers: row.get(columns::FOLLOWERS).and_then(coerce_f64),
            followings: row.get(columns::FOLLOWINGS).and_then(coerce_f64),
            posts_count: row.get(columns::POSTS_COUNT).and_then(coerce_f64),
            follow_network_analysis: normalize(row.get(columns::FOLLOW_NETWORK_ANALYSIS)),
            comment_authenticity_analysis: normalize(
                row.get(columns::COMMENT_AUTHENTICITY_ANALYSIS),
            ),
            content_analysis: normalize(row.get(columns::CONTENT_ANALYSIS)),
            evaluation: normalize(row.get(columns::EVALUATION)),
            commerce_orientation_analysis: normalize(
                row.get(columns::COMMERCE_ORIENTATION_ANALYSIS),
            ),
            insights: normalize(row.get(columns::INSIGHTS)),
            category: row.get(columns::CATEGORY).and_then(non_empty_text),
            recommendation: row.get(columns::RECOMMENDATION).and_then(non_empty_text),
            tags: row.get(columns::TAGS).map(parse_tags).unwrap_or_default(),
            analyzed_at: row.get(columns::ANALYZED_AT).and_then(parse_timestamp),
            created_at: row.get(columns::CREATED_AT).and_then(parse_timestamp),
        }
    }

    /// Followers with absent treated as zero
    pub fn followers_or_zero(&self) -> f64 {
        self.followers.unwrap_or(0.0)
    }

    pub fn followings_or_zero(&self) -> f64 {
        self.followings.unwrap_or(0.0)
    }

    pub fn posts_count_or_zero(&self) -> f64 {
        self.posts_count.unwrap_or(0.0)
    }
}

/// Finite float from a number, a numeric string, or a bool-free scalar
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Tags as a JSON array of strings, a JSON-encoded array, or a delimited string
pub fn parse_tags(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(clean_tag)
            .filter(|t| !t.is_empty())
            .collect(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.starts_with('[') {
                if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
                    return parse_tags(&Value::Array(items));
                }
            }
            trimmed
                .split(|c: char| c == ',' || c == '#' || c.is_whitespace())
                .map(clean_tag)
                .filter(|t| !t.is_empty())
                .collect()
        }
        _ => Vec::new(),
    }
}

fn clean_tag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').trim().to_string()
}

/// RFC 3339, or a naive ISO timestamp taken as UTC
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}
