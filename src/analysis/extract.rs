//! Metric extraction from normalised analysis documents
//!
//! Analysis documents are produced by an external, loosely-schematised
//! process, so every metric is looked up through an ordered alias list
//! ([`MetricResolver`]) and coerced to a finite number. When a primary
//! metric is missing, a deterministic estimate is synthesised from
//! correlated fields:
//!
//! | metric              | estimate                                        | range            |
//! |---------------------|-------------------------------------------------|------------------|
//! | engagement rate     | `(followers / followings) / 20`                 | `[0, 5]`         |
//! | recency span (days) | `max(1, 30 - posts_count / 100)`                | `[1, 30]`        |
//! | average likes       | `authenticity / 100 * followers * 0.01`         | `[0, followers]` |
//! | average comments    | `authentic_ratio / 100 * followers * 0.003`     | `[0, followers]` |
//! | posting pace        | from `network_type_inference` text              | fixed labels     |
//!
//! Extraction is total: malformed or absent fields yield `None`, never an
//! error, and no NaN/Inf value leaves this module.

use crate::analysis::normalize::normalize_field;
use crate::types::record::{coerce_f64, AnalysisRecord};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

lazy_static! {
    /// First decimal number embedded in free text ("약 40%" -> 40)
    static ref DECIMAL_PATTERN: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)").expect("decimal pattern is valid");
}

pub const ENGAGEMENT_DIVISOR: f64 = 20.0;
pub const MAX_ENGAGEMENT_ESTIMATE: f64 = 5.0;
pub const LIKES_FACTOR: f64 = 0.01;
pub const COMMENTS_FACTOR: f64 = 0.003;
pub const COMMERCE_SCORE_MAX: f64 = 10.0;

pub const PACE_DAILY: &str = "매일";
pub const PACE_FEW_TIMES_WEEKLY: &str = "주 2-3회";
pub const PACE_WEEKLY: &str = "주 1-2회";

/// Ordered alias list for one named metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricResolver {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl MetricResolver {
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }

    /// First alias holding a non-null, non-empty value
    pub fn resolve<'a>(&self, doc: &'a Map<String, Value>) -> Option<&'a Value> {
        self.aliases
            .iter()
            .filter_map(|key| doc.get(*key))
            .find(|value| is_present(value))
    }

    /// Resolved value coerced to a finite number
    ///
    /// Only the first present alias is considered; if it cannot be coerced
    /// the metric is absent.
    pub fn number(&self, doc: &Map<String, Value>) -> Option<f64> {
        self.resolve(doc).and_then(coerce_f64)
    }

    /// Resolved value as trimmed text
    pub fn text(&self, doc: &Map<String, Value>) -> Option<String> {
        self.resolve(doc).and_then(value_text)
    }
}

pub const ENGAGEMENT_RATE: MetricResolver = MetricResolver::new(
    "engagement_rate",
    &[
        "est_engagement_rate_last5",
        "engagement_rate",
        "avg_engagement_rate",
        "engagement_percentage",
    ],
);

pub const RECENCY_SPAN: MetricResolver = MetricResolver::new(
    "recency_span",
    &[
        "recency_span_last5_days",
        "recency_span",
        "activity_span",
        "days_since_last_post",
    ],
);

pub const AVG_LIKES: MetricResolver = MetricResolver::new(
    "avg_likes",
    &["avg_likes_last5", "avg_likes", "likes_avg", "average_likes"],
);

pub const AVG_COMMENTS: MetricResolver = MetricResolver::new(
    "avg_comments",
    &[
        "avg_comments_last5",
        "avg_comments",
        "comments_avg",
        "average_comments",
    ],
);

pub const POSTING_PACE: MetricResolver = MetricResolver::new(
    "posting_pace",
    &[
        "posting_pace_last5",
        "posting_pace",
        "posting_frequency",
        "content_frequency",
    ],
);

pub const FOLLOWER_RATIO: MetricResolver =
    MetricResolver::new("follower_ratio", &["ratio_followers_to_followings"]);

pub const AUTHENTICITY_SCORE: MetricResolver = MetricResolver::new(
    "influence_authenticity_score",
    &["influence_authenticity_score"],
);

pub const NETWORK_TYPE: MetricResolver = MetricResolver::new("network_type", &["network_type"]);

pub const NETWORK_TYPE_INFERENCE: MetricResolver =
    MetricResolver::new("network_type_inference", &["network_type_inference"]);

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Finite number stored directly under `key`
pub fn number_at(doc: &Map<String, Value>, key: &str) -> Option<f64> {
    doc.get(key).and_then(coerce_f64)
}

/// Non-empty text stored directly under `key`
pub fn text_at(doc: &Map<String, Value>, key: &str) -> Option<String> {
    doc.get(key).and_then(value_text)
}

/// First decimal number inside a value
///
/// Numbers pass through; strings are scanned for the first decimal
/// ("약 40%" -> 40.0, "12.5% 정도" -> 12.5).
pub fn extract_percentage(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => DECIMAL_PATTERN
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|v| v.is_finite()),
        _ => None,
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Engagement-rate estimate from the follower/following ratio
///
/// Uses an explicit positive ratio when given, otherwise requires both
/// counts to be positive.
pub fn estimate_engagement(
    followers: f64,
    followings: f64,
    explicit_ratio: Option<f64>,
) -> Option<f64> {
    let ratio = match positive(explicit_ratio) {
        Some(ratio) => ratio,
        None if followers > 0.0 && followings > 0.0 => followers / followings,
        None => return None,
    };
    Some((ratio / ENGAGEMENT_DIVISOR).clamp(0.0, MAX_ENGAGEMENT_ESTIMATE))
}

/// Recency-span estimate in days; more posts imply a shorter cadence
pub fn estimate_recency(posts_count: f64) -> Option<f64> {
    if posts_count > 0.0 {
        Some((30.0 - posts_count / 100.0).max(1.0).clamp(1.0, 30.0))
    } else {
        None
    }
}

pub fn estimate_likes(authenticity_score: f64, followers: f64) -> Option<f64> {
    if authenticity_score > 0.0 {
        let estimate = authenticity_score / 100.0 * followers * LIKES_FACTOR;
        Some(estimate.clamp(0.0, followers.max(0.0)))
    } else {
        None
    }
}

pub fn estimate_comments(authentic_ratio: f64, followers: f64) -> Option<f64> {
    let estimate = authentic_ratio / 100.0 * followers * COMMENTS_FACTOR;
    if estimate.is_finite() {
        Some(estimate.clamp(0.0, followers.max(0.0)))
    } else {
        None
    }
}

/// Posting-pace bucket from the network-type inference text
pub fn infer_posting_pace(network_type_inference: &str) -> &'static str {
    // "비대칭형" contains "대칭형", so the asymmetric check goes first
    if network_type_inference.contains("비대칭형") {
        PACE_DAILY
    } else if network_type_inference.contains("대칭형") {
        PACE_FEW_TIMES_WEEKLY
    } else {
        PACE_WEEKLY
    }
}

/// Composite 0–100 activity score
///
/// Weighted blend of post volume (0.4), engagement (0.3), follower ratio
/// (0.2) and authenticity (0.1); each component is clamped to `[0, 100]`.
pub fn activity_score(
    posts_count: f64,
    engagement_rate: f64,
    follower_ratio: f64,
    authenticity_score: f64,
) -> f64 {
    let posts_score = (posts_count / 1000.0 * 100.0).clamp(0.0, 100.0);
    let engagement_score = (engagement_rate * 20.0).clamp(0.0, 100.0);
    let network_score = (follower_ratio / 10.0 * 100.0).clamp(0.0, 100.0);
    let authenticity = authenticity_score.clamp(0.0, 100.0);

    posts_score * 0.4 + engagement_score * 0.3 + network_score * 0.2 + authenticity * 0.1
}

/// Signal list from an array of strings or a delimited string
pub fn parse_signal_list(value: Option<&Value>) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(value_text).collect(),
        Some(Value::String(text)) => text
            .split(|c: char| matches!(c, ',' | ';' | '\n' | '|'))
            .map(|s| s.trim().to_string())
            .collect(),
        _ => Vec::new(),
    };
    items
        .into_iter()
        .map(|s| s.trim().trim_start_matches(['-', '•']).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn commerce_score(doc: &Map<String, Value>, key: &str) -> Option<f64> {
    number_at(doc, key).map(|v| v.clamp(0.0, COMMERCE_SCORE_MAX))
}

/// Network-analysis observations for one record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkObservation {
    pub authenticity_score: Option<f64>,
    pub network_type: Option<String>,
    pub followers: Option<f64>,
    /// followers / followings, only when both are positive
    pub follower_ratio: Option<f64>,
}

pub fn network_observation(record: &AnalysisRecord) -> NetworkObservation {
    let doc = &record.follow_network_analysis;
    let followers = positive(record.followers);
    let follower_ratio = match (followers, positive(record.followings)) {
        (Some(f), Some(g)) => Some(f / g),
        _ => None,
    };
    NetworkObservation {
        authenticity_score: AUTHENTICITY_SCORE.number(doc),
        network_type: NETWORK_TYPE.text(doc),
        followers,
        follower_ratio,
    }
}

/// Activity observations for one record, explicit values before estimates
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityObservation {
    pub engagement_rate: Option<f64>,
    pub recency_span: Option<f64>,
    pub likes: Option<f64>,
    pub comments: Option<f64>,
    pub posting_pace: String,
    pub activity_score: f64,
}

pub fn activity_observation(record: &AnalysisRecord) -> ActivityObservation {
    let network = &record.follow_network_analysis;
    let comments_doc = &record.comment_authenticity_analysis;
    let followers = record.followers_or_zero().max(0.0);
    let followings = record.followings_or_zero().max(0.0);
    let posts_count = record.posts_count_or_zero().max(0.0);

    let explicit_ratio = FOLLOWER_RATIO.number(network);
    let authenticity = AUTHENTICITY_SCORE.number(network).unwrap_or(0.0);

    let engagement_rate = ENGAGEMENT_RATE
        .number(network)
        .or_else(|| estimate_engagement(followers, followings, explicit_ratio));

    let recency_span = RECENCY_SPAN
        .number(network)
        .or_else(|| estimate_recency(posts_count));

    let likes = AVG_LIKES
        .number(network)
        .or_else(|| estimate_likes(authenticity, followers));

    let comments = AVG_COMMENTS.number(comments_doc).or_else(|| {
        authentic_comment_ratio(comments_doc)
            .and_then(|ratio| estimate_comments(ratio, followers))
    });

    let posting_pace = POSTING_PACE.text(network).unwrap_or_else(|| {
        let inference = NETWORK_TYPE_INFERENCE.text(network).unwrap_or_default();
        infer_posting_pace(&inference).to_string()
    });

    ActivityObservation {
        // only the recorded ratio feeds the network component; the
        // followers/followings estimate is reserved for engagement
        activity_score: activity_score(
            posts_count,
            engagement_rate.unwrap_or(0.0),
            explicit_ratio.unwrap_or(0.0),
            authenticity,
        ),
        engagement_rate,
        recency_span,
        likes,
        comments,
        posting_pace,
    }
}

/// `ratio_estimation.authentic_comments_ratio` as a number
pub fn authentic_comment_ratio(comment_doc: &Map<String, Value>) -> Option<f64> {
    let ratios = normalize_field(comment_doc, "ratio_estimation");
    ratios
        .get("authentic_comments_ratio")
        .and_then(extract_percentage)
}

/// Comment-authenticity observations for one record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentObservation {
    pub authentic_ratio: Option<f64>,
    pub low_authentic_ratio: Option<f64>,
    pub authenticity_level: Option<String>,
}

pub fn comment_observation(record: &AnalysisRecord) -> CommentObservation {
    let doc = &record.comment_authenticity_analysis;
    let ratios = normalize_field(doc, "ratio_estimation");
    CommentObservation {
        authentic_ratio: ratios
            .get("authentic_comments_ratio")
            .and_then(extract_percentage),
        low_authentic_ratio: ratios
            .get("low_authentic_comments_ratio")
            .and_then(extract_percentage),
        authenticity_level: text_at(doc, "authenticity_level"),
    }
}

/// Commerce-orientation observations for one record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommerceObservation {
    pub monetization_intent: Option<f64>,
    pub bragging_orientation: Option<f64>,
    pub content_fit: Option<f64>,
    pub archetype: Option<String>,
    pub primary_motivation: Option<String>,
    pub selling_signals: Vec<String>,
    pub bragging_signals: Vec<String>,
    pub interpretation: Option<String>,
}

impl CommerceObservation {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn commerce_observation(record: &AnalysisRecord) -> CommerceObservation {
    let doc = &record.commerce_orientation_analysis;
    CommerceObservation {
        monetization_intent: commerce_score(doc, "monetization_intent_level"),
        bragging_orientation: commerce_score(doc, "bragging_orientation_level"),
        content_fit: commerce_score(doc, "content_fit_for_selling_score"),
        archetype: text_at(doc, "creator_archetype"),
        primary_motivation: text_at(doc, "primary_motivation"),
        selling_signals: parse_signal_list(doc.get("selling_effort_signals")),
        bragging_signals: parse_signal_list(doc.get("bragging_signals")),
        interpretation: text_at(doc, "interpretation"),
    }
}

/// Evaluation scores for one record
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvaluationObservation {
    pub engagement: Option<f64>,
    pub activity: Option<f64>,
    pub communication: Option<f64>,
    pub growth_potential: Option<f64>,
    pub overall: Option<f64>,
    pub inference_confidence: Option<f64>,
}

pub fn evaluation_observation(record: &AnalysisRecord) -> EvaluationObservation {
    let doc = &record.evaluation;
    EvaluationObservation {
        engagement: number_at(doc, "engagement"),
        activity: number_at(doc, "activity"),
        communication: number_at(doc, "communication"),
        growth_potential: number_at(doc, "growth_potential"),
        overall: number_at(doc, "overall_score"),
        inference_confidence: number_at(&record.content_analysis, "inference_confidence"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::normalize;
    use serde_json::json;

    fn record(value: Value) -> AnalysisRecord {
        match value {
            Value::Object(map) => AnalysisRecord::from_row(&map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_resolver_uses_first_present_alias() {
        let doc = normalize(Some(&json!({
            "est_engagement_rate_last5": null,
            "engagement_rate": "",
            "avg_engagement_rate": 2.5,
            "engagement_percentage": 9.0
        })));
        assert_eq!(ENGAGEMENT_RATE.number(&doc), Some(2.5));
    }

    #[test]
    fn test_resolver_unparseable_is_absent() {
        let doc = normalize(Some(&json!({"avg_likes": "many", "likes_avg": 10})));
        assert_eq!(AVG_LIKES.number(&doc), None);
    }

    #[test]
    fn test_string_encoded_metric_has_no_fallback() {
        let rec = record(json!({
            "followers": 10000,
            "followings": 500,
            "follow_network_analysis": "{\"engagement_rate\": 3.5}"
        }));
        assert_eq!(rec.follow_network_analysis["engagement_rate"], json!(3.5));
        assert_eq!(activity_observation(&rec).engagement_rate, Some(3.5));
    }

    #[test]
    fn test_engagement_fallback_from_follower_ratio() {
        let rec = record(json!({"followers": 10000, "followings": 500}));
        assert_eq!(activity_observation(&rec).engagement_rate, Some(1.0));
    }

    #[test]
    fn test_engagement_estimate_bounds() {
        assert_eq!(estimate_engagement(1_000_000.0, 10.0, None), Some(5.0));
        assert_eq!(estimate_engagement(100.0, 0.0, None), None);
        assert_eq!(estimate_engagement(0.0, 0.0, Some(40.0)), Some(2.0));
        assert_eq!(estimate_engagement(0.0, 100.0, None), None);
    }

    #[test]
    fn test_recency_estimate() {
        assert_eq!(estimate_recency(0.0), None);
        assert_eq!(estimate_recency(500.0), Some(25.0));
        assert_eq!(estimate_recency(2186.0), Some(30.0 - 21.86));
        assert_eq!(estimate_recency(10_000.0), Some(1.0));
    }

    #[test]
    fn test_likes_and_comments_estimates() {
        let likes = estimate_likes(85.0, 13_000.0).unwrap();
        assert!((likes - 110.5).abs() < 1e-9);
        assert_eq!(estimate_likes(0.0, 13_000.0), None);

        let comments = estimate_comments(40.0, 13_000.0).unwrap();
        assert!((comments - 15.6).abs() < 1e-9);
        assert_eq!(estimate_comments(40.0, 0.0), Some(0.0));
    }

    #[test]
    fn test_comment_estimate_uses_scanned_ratio() {
        let rec = record(json!({
            "followers": 13000,
            "comment_authenticity_analysis": {
                "ratio_estimation": {"authentic_comments_ratio": "약 40%"}
            }
        }));
        let obs = activity_observation(&rec);
        assert!((obs.comments.unwrap() - 15.6).abs() < 1e-9);
    }

    #[test]
    fn test_extract_percentage() {
        assert_eq!(extract_percentage(&json!("약 40%")), Some(40.0));
        assert_eq!(extract_percentage(&json!("12.5% 정도")), Some(12.5));
        assert_eq!(extract_percentage(&json!(33)), Some(33.0));
        assert_eq!(extract_percentage(&json!("없음")), None);
        assert_eq!(extract_percentage(&Value::Null), None);
    }

    #[test]
    fn test_posting_pace_inference() {
        assert_eq!(infer_posting_pace("비대칭형 네트워크"), PACE_DAILY);
        assert_eq!(infer_posting_pace("대칭형"), PACE_FEW_TIMES_WEEKLY);
        assert_eq!(infer_posting_pace(""), PACE_WEEKLY);

        let explicit = record(json!({
            "follow_network_analysis": {"posting_pace": "주 4회", "network_type_inference": "비대칭형"}
        }));
        assert_eq!(activity_observation(&explicit).posting_pace, "주 4회");
    }

    #[test]
    fn test_activity_score_weights() {
        // 1000 posts, 5% engagement, 10:1 ratio, 100 authenticity
        assert!((activity_score(1000.0, 5.0, 10.0, 100.0) - 100.0).abs() < 1e-9);
        assert_eq!(activity_score(0.0, 0.0, 0.0, 0.0), 0.0);
        assert!((activity_score(500.0, 0.0, 0.0, 0.0) - 20.0).abs() < 1e-9);
        assert!((activity_score(5000.0, 50.0, 1000.0, 500.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_activity_score_ignores_count_ratio_without_recorded_ratio() {
        let rec = record(json!({
            "followers": 10000,
            "followings": 1000,
            "posts_count": 0,
            "follow_network_analysis": {"engagement_rate": 0.0}
        }));
        assert_eq!(activity_observation(&rec).activity_score, 0.0);

        let recorded = record(json!({
            "followers": 10000,
            "followings": 1000,
            "posts_count": 0,
            "follow_network_analysis": {"engagement_rate": 0.0, "ratio_followers_to_followings": 5.0}
        }));
        assert!((activity_observation(&recorded).activity_score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_engagement_estimate_still_uses_counts() {
        let rec = record(json!({"followers": 10000, "followings": 1000}));
        let obs = activity_observation(&rec);
        assert_eq!(obs.engagement_rate, Some(0.5));
        assert!((obs.activity_score - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_commerce_scores_clamped() {
        let rec = record(json!({
            "commerce_orientation_analysis": {
                "monetization_intent_level": 14,
                "bragging_orientation_level": -2,
                "content_fit_for_selling_score": "7.5",
                "creator_archetype": "리뷰어",
                "selling_effort_signals": ["공구 링크", " 할인 코드 "],
                "bragging_signals": "명품, 여행"
            }
        }));
        let obs = commerce_observation(&rec);
        assert_eq!(obs.monetization_intent, Some(10.0));
        assert_eq!(obs.bragging_orientation, Some(0.0));
        assert_eq!(obs.content_fit, Some(7.5));
        assert_eq!(obs.archetype.as_deref(), Some("리뷰어"));
        assert_eq!(obs.selling_signals, vec!["공구 링크", "할인 코드"]);
        assert_eq!(obs.bragging_signals, vec!["명품", "여행"]);
        assert!(commerce_observation(&AnalysisRecord::default()).is_empty());
    }

    #[test]
    fn test_evaluation_observation() {
        let rec = record(json!({
            "evaluation": "{'engagement': 7, 'overall_score': '8.2', 'activity': None}",
            "content_analysis": {"inference_confidence": 0.8}
        }));
        let obs = evaluation_observation(&rec);
        assert_eq!(obs.engagement, Some(7.0));
        assert_eq!(obs.overall, Some(8.2));
        assert_eq!(obs.activity, None);
        assert_eq!(obs.inference_confidence, Some(0.8));
    }

    #[test]
    fn test_network_observation_ratio_requires_both_counts() {
        let rec = record(json!({
            "followers": 1000,
            "followings": 0,
            "follow_network_analysis": {"influence_authenticity_score": 72, "network_type": "비대칭형"}
        }));
        let obs = network_observation(&rec);
        assert_eq!(obs.authenticity_score, Some(72.0));
        assert_eq!(obs.network_type.as_deref(), Some("비대칭형"));
        assert_eq!(obs.follower_ratio, None);
    }

    #[test]
    fn test_malformed_documents_yield_absent_metrics() {
        let rec = record(json!({
            "followers": "n/a",
            "follow_network_analysis": "{broken",
            "comment_authenticity_analysis": [1, 2]
        }));
        let obs = activity_observation(&rec);
        assert_eq!(obs.engagement_rate, None);
        assert_eq!(obs.likes, None);
        assert_eq!(obs.comments, None);
        assert_eq!(obs.recency_span, None);
        assert_eq!(obs.posting_pace, PACE_WEEKLY);
        assert_eq!(obs.activity_score, 0.0);
    }
}
