//! Shared types for priority determination.

use serde::{Deserialize, Serialize};

use crate::error::PriorityError;
use crate::text;

// ── Levels ──────────────────────────────────────────────────────────

/// Priority level assigned to an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    High,
    Normal,
    Low,
}

impl Priority {
    /// Map a final score onto a level, thresholds evaluated high to low.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            Self::Urgent
        } else if score >= 0.65 {
            Self::High
        } else if score >= 0.35 {
            Self::Normal
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }

    /// Capitalized form for reasoning strings.
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Low => "Low",
        }
    }
}

/// Business-impact level, the three-step scale used by the impact signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    /// Equivalent priority label, used when tallying cross-signal agreement.
    pub(crate) fn as_priority(&self) -> Priority {
        match self {
            Self::High => Priority::Urgent,
            Self::Medium => Priority::High,
            Self::Low => Priority::Normal,
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// How a result was produced.
///
/// Unknown values deserialize as `Analysis` so results written by a newer
/// version degrade gracefully for older readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Fallback,
    ErrorFallback,
    Default,
    #[serde(other)]
    Analysis,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Fallback => "fallback",
            Self::ErrorFallback => "error_fallback",
            Self::Default => "default",
        }
    }
}

// ── Request ─────────────────────────────────────────────────────────

/// Immutable input to the engine: one email's text and sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub subject: String,
    pub body: String,
    pub sender: Option<String>,
}

impl ClassificationRequest {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            sender: None,
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Both subject and body empty — the defined edge case, not an error.
    pub(crate) fn is_empty(&self) -> bool {
        self.subject.is_empty() && self.body.is_empty()
    }

    /// Lowercased analysis text with the subject weighted 3x.
    pub(crate) fn analysis_text(&self) -> String {
        format!(
            "{s} {s} {s} {b}",
            s = self.subject,
            b = self.body
        )
        .to_lowercase()
    }
}

// ── Signal scores ───────────────────────────────────────────────────

/// Normalized per-level scores for the keyword and time signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelScores {
    pub urgent: f64,
    pub high: f64,
    pub normal: f64,
    pub low: f64,
}

impl LevelScores {
    pub fn get(&self, level: Priority) -> f64 {
        match level {
            Priority::Urgent => self.urgent,
            Priority::High => self.high,
            Priority::Normal => self.normal,
            Priority::Low => self.low,
        }
    }

    /// Level with the highest score. Ties keep the earlier level, so an
    /// all-zero family peaks at `urgent`.
    pub fn peak(&self) -> (Priority, f64) {
        let mut best = (Priority::Urgent, self.urgent);
        for (level, value) in [
            (Priority::High, self.high),
            (Priority::Normal, self.normal),
            (Priority::Low, self.low),
        ] {
            if value > best.1 {
                best = (level, value);
            }
        }
        best
    }
}

/// Normalized per-level scores for the business-impact signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactScores {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl ImpactScores {
    pub fn get(&self, level: Impact) -> f64 {
        match level {
            Impact::High => self.high,
            Impact::Medium => self.medium,
            Impact::Low => self.low,
        }
    }

    /// Level with the highest score; ties keep the earlier level.
    pub fn peak(&self) -> (Impact, f64) {
        let mut best = (Impact::High, self.high);
        for (level, value) in [(Impact::Medium, self.medium), (Impact::Low, self.low)] {
            if value > best.1 {
                best = (level, value);
            }
        }
        best
    }
}

/// Matched vocabulary labels per priority level, capped for reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelMatches {
    pub urgent: Vec<String>,
    pub high: Vec<String>,
    pub normal: Vec<String>,
    pub low: Vec<String>,
}

impl LevelMatches {
    pub fn get(&self, level: Priority) -> &[String] {
        match level {
            Priority::Urgent => &self.urgent,
            Priority::High => &self.high,
            Priority::Normal => &self.normal,
            Priority::Low => &self.low,
        }
    }
}

/// Matched indicator labels per impact level, capped for reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactMatches {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl ImpactMatches {
    pub fn get(&self, level: Impact) -> &[String] {
        match level {
            Impact::High => &self.high,
            Impact::Medium => &self.medium,
            Impact::Low => &self.low,
        }
    }
}

/// Keyword signal output: scores plus the labels that produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSignal {
    pub scores: LevelScores,
    pub matches: LevelMatches,
}

/// Business-impact signal output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactSignal {
    pub scores: ImpactScores,
    pub matches: ImpactMatches,
}

/// Time-sensitivity signal output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSignal {
    pub scores: LevelScores,
    pub matches: LevelMatches,
}

/// Sender-role signal output: a single scalar and the bucket that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenderSignal {
    pub score: f64,
    pub reason: Option<String>,
}

// ── Aggregation ─────────────────────────────────────────────────────

/// One scalar per signal family, before weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub keyword: f64,
    pub business: f64,
    pub time: f64,
    pub sender: f64,
}

/// Per-family weights used for the final weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub keyword: f64,
    pub business: f64,
    pub time: f64,
    pub sender: f64,
}

impl FactorWeights {
    /// Base weights before adaptive adjustment; they sum to 1.0.
    pub const BASE: Self = Self {
        keyword: 0.35,
        business: 0.25,
        time: 0.25,
        sender: 0.15,
    };

    /// Clamp every weight to [0, 1].
    pub(crate) fn clamped(self) -> Self {
        Self {
            keyword: self.keyword.clamp(0.0, 1.0),
            business: self.business.clamp(0.0, 1.0),
            time: self.time.clamp(0.0, 1.0),
            sender: self.sender.clamp(0.0, 1.0),
        }
    }
}

// ── Result ──────────────────────────────────────────────────────────

/// Full signal breakdown attached to an analysis result, for audit and
/// explanation. Everything here is derived within one classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityFactors {
    pub keyword: KeywordSignal,
    pub business: ImpactSignal,
    pub time: TimeSignal,
    pub sender: SenderSignal,
    pub factor_scores: FactorScores,
    pub weights: FactorWeights,
}

/// The engine's sole output contract. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityResult {
    pub priority: Priority,
    pub score: f64,
    pub confidence: f64,
    pub method: Method,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<PriorityFactors>,
}

impl PriorityResult {
    /// Defined result for the empty-input edge case.
    pub(crate) fn empty_input() -> Self {
        Self {
            priority: Priority::Normal,
            score: 0.5,
            confidence: 0.4,
            method: Method::Default,
            reasoning: "Empty email content".to_string(),
            factors: None,
        }
    }

    /// Last-resort result when both analysis and fallback are unusable.
    pub(crate) fn error_fallback(error: &PriorityError) -> Self {
        let message = error.to_string();
        Self {
            priority: Priority::Normal,
            score: 0.5,
            confidence: 0.3,
            method: Method::ErrorFallback,
            reasoning: format!("Error during processing: {}", text::prefix(&message, 100)),
            factors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_from_score_thresholds() {
        assert_eq!(Priority::from_score(0.85), Priority::Urgent);
        assert_eq!(Priority::from_score(0.84), Priority::High);
        assert_eq!(Priority::from_score(0.65), Priority::High);
        assert_eq!(Priority::from_score(0.64), Priority::Normal);
        assert_eq!(Priority::from_score(0.35), Priority::Normal);
        assert_eq!(Priority::from_score(0.34), Priority::Low);
        assert_eq!(Priority::from_score(0.0), Priority::Low);
        assert_eq!(Priority::from_score(1.0), Priority::Urgent);
    }

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Priority::Urgent).unwrap(),
            serde_json::json!("urgent")
        );
    }

    #[test]
    fn method_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(Method::ErrorFallback).unwrap(),
            serde_json::json!("error_fallback")
        );
    }

    #[test]
    fn unknown_method_deserializes_as_analysis() {
        let method: Method = serde_json::from_value(serde_json::json!("llm_triage")).unwrap();
        assert_eq!(method, Method::Analysis);
    }

    #[test]
    fn analysis_text_weights_subject_three_times() {
        let req = ClassificationRequest::new("Urgent", "please HELP");
        assert_eq!(req.analysis_text(), "urgent urgent urgent please help");
    }

    #[test]
    fn empty_request_detection() {
        assert!(ClassificationRequest::new("", "").is_empty());
        assert!(!ClassificationRequest::new("x", "").is_empty());
        assert!(!ClassificationRequest::new("", "x").is_empty());
    }

    #[test]
    fn level_scores_peak_prefers_earlier_level_on_tie() {
        let scores = LevelScores::default();
        assert_eq!(scores.peak(), (Priority::Urgent, 0.0));

        let scores = LevelScores {
            urgent: 0.2,
            high: 0.6,
            normal: 0.6,
            low: 0.1,
        };
        assert_eq!(scores.peak(), (Priority::High, 0.6));
    }

    #[test]
    fn impact_maps_to_priority_labels() {
        assert_eq!(Impact::High.as_priority(), Priority::Urgent);
        assert_eq!(Impact::Medium.as_priority(), Priority::High);
        assert_eq!(Impact::Low.as_priority(), Priority::Normal);
    }

    #[test]
    fn base_weights_sum_to_one() {
        let w = FactorWeights::BASE;
        assert!((w.keyword + w.business + w.time + w.sender - 1.0).abs() < 1e-9);
    }

    #[test]
    fn result_serialization_omits_missing_factors() {
        let result = PriorityResult::empty_input();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["priority"], "normal");
        assert_eq!(json["method"], "default");
        assert!(json.get("factors").is_none());
    }

    #[test]
    fn error_fallback_truncates_long_messages() {
        let err = PriorityError::EmptyVocabulary { signal: "keyword" };
        let result = PriorityResult::error_fallback(&err);
        assert_eq!(result.priority, Priority::Normal);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.confidence, 0.3);
        assert_eq!(result.method, Method::ErrorFallback);
        assert!(result.reasoning.starts_with("Error during processing:"));
    }
}
