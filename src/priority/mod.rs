//! Multi-signal priority determination.
//!
//! Four independent signal extractors (keywords, business impact, time
//! sensitivity, sender role) feed an adaptively-weighted aggregate score,
//! which maps onto a priority level. Confidence comes from peak strength
//! and cross-signal agreement, and every result carries a reasoning
//! string built from the matched terms.
//!
//! The pipeline is composed explicitly rather than via error propagation:
//! `analyze` is the primary path, `fallback` the degraded one, and
//! [`PriorityEngine::classify`] folds any residual error into an
//! `error_fallback` result so the entry point is total.

pub mod batch;
mod confidence;
mod explain;
mod fallback;
mod score;
mod signals;
mod types;
mod vocab;

pub use types::{
    ClassificationRequest, FactorScores, FactorWeights, Impact, ImpactMatches, ImpactScores,
    ImpactSignal, KeywordSignal, LevelMatches, LevelScores, Method, Priority, PriorityFactors,
    PriorityResult, SenderSignal, TimeSignal,
};

use tracing::{debug, warn};

use crate::error::PriorityError;

use vocab::{FallbackLists, ImpactVocab, LevelVocab, TimePatterns};

// ── Rules ───────────────────────────────────────────────────────────

/// The engine's rule tables: keyword and impact vocabularies, time
/// patterns, and the fallback word lists.
///
/// All tables are fixed at engine construction; the engine itself never
/// mutates them, so one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct PriorityRules {
    pub(crate) keywords: LevelVocab,
    pub(crate) impact: ImpactVocab,
    pub(crate) time: TimePatterns,
    pub(crate) fallback: FallbackLists,
}

impl PriorityRules {
    /// The built-in rule tables.
    pub fn default_rules() -> Self {
        Self {
            keywords: LevelVocab::defaults(),
            impact: ImpactVocab::defaults(),
            time: TimePatterns::defaults(),
            fallback: FallbackLists::defaults(),
        }
    }

    /// Rules with no analysis vocabularies (for testing the degraded
    /// paths). The fallback word lists keep their defaults so the engine
    /// stays total; clear them too with [`Self::clear_fallback_lists`].
    pub fn empty() -> Self {
        Self {
            keywords: LevelVocab::default(),
            impact: ImpactVocab::default(),
            time: TimePatterns::default(),
            fallback: FallbackLists::defaults(),
        }
    }

    /// Add a keyword to a priority level's vocabulary.
    ///
    /// Stored lowercased — matching runs against lowercased text.
    pub fn add_keyword(&mut self, level: Priority, word: &str) {
        self.keywords.get_mut(level).push(word.to_lowercase());
    }

    /// Add a business-impact indicator to an impact level's vocabulary.
    pub fn add_impact_indicator(&mut self, level: Impact, word: &str) {
        self.impact.get_mut(level).push(word.to_lowercase());
    }

    /// Add a time-sensitivity pattern for a priority level.
    ///
    /// The pattern runs against lowercased text; write it accordingly.
    pub fn add_time_pattern(&mut self, level: Priority, pattern: &str) -> Result<(), regex::Error> {
        let compiled = regex::Regex::new(pattern)?;
        self.time.get_mut(level).push(compiled);
        Ok(())
    }

    /// Remove the fallback word lists, leaving only the error-fallback
    /// tier beneath the analysis path.
    pub fn clear_fallback_lists(&mut self) {
        self.fallback = FallbackLists::default();
    }

    /// The analysis path needs every signal family to have at least one
    /// entry; report the first one missing.
    fn check_usable(&self) -> Result<(), PriorityError> {
        if self.keywords.is_empty() {
            return Err(PriorityError::EmptyVocabulary { signal: "keyword" });
        }
        if self.impact.is_empty() {
            return Err(PriorityError::EmptyVocabulary {
                signal: "business impact",
            });
        }
        if self.time.is_empty() {
            return Err(PriorityError::EmptyVocabulary {
                signal: "time sensitivity",
            });
        }
        Ok(())
    }
}

impl Default for PriorityRules {
    fn default() -> Self {
        Self::default_rules()
    }
}

// ── Engine ──────────────────────────────────────────────────────────

/// The priority determination engine.
///
/// Stateless between calls: every intermediate value threads through
/// return values, never through shared fields, so a single engine can be
/// shared across threads freely.
#[derive(Debug, Clone)]
pub struct PriorityEngine {
    rules: PriorityRules,
}

impl PriorityEngine {
    pub fn new(rules: PriorityRules) -> Self {
        Self { rules }
    }

    /// Classify one email. Total: never fails, never panics.
    ///
    /// Composition: empty input → defined default; otherwise the primary
    /// multi-signal analysis; on analysis error the fallback heuristic;
    /// and if even that is unusable, the `error_fallback` result.
    pub fn classify(&self, request: &ClassificationRequest) -> PriorityResult {
        match self.try_classify(request) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "Priority determination failed entirely");
                PriorityResult::error_fallback(&err)
            }
        }
    }

    /// Classify one email, surfacing the error when both the analysis and
    /// fallback tiers are unusable. Batch callers use this to record the
    /// failure before substituting the error-fallback result.
    pub fn try_classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<PriorityResult, PriorityError> {
        if request.is_empty() {
            return Ok(PriorityResult::empty_input());
        }
        match self.analyze(request) {
            Ok(result) => Ok(result),
            Err(err) => {
                warn!(error = %err, "Priority analysis unavailable, using fallback");
                fallback::determine(&request.subject, &request.body, &self.rules.fallback)
            }
        }
    }

    /// The primary multi-signal analysis path.
    fn analyze(&self, request: &ClassificationRequest) -> Result<PriorityResult, PriorityError> {
        self.rules.check_usable()?;

        let text = request.analysis_text();

        let keyword = signals::analyze_keywords(&text, &self.rules.keywords);
        let business =
            signals::analyze_business(&text, &self.rules.impact, &self.rules.keywords.urgent);
        let time = signals::analyze_time(&text, &self.rules.time);
        let sender = signals::analyze_sender(request.sender.as_deref());

        let aggregate =
            score::aggregate(&keyword.scores, &business.scores, &time.scores, sender.score);
        let priority = Priority::from_score(aggregate.score);
        let confidence = confidence::estimate(&keyword.scores, &business.scores, &time.scores);

        let factors = PriorityFactors {
            keyword,
            business,
            time,
            sender,
            factor_scores: aggregate.factor_scores,
            weights: aggregate.weights,
        };
        let reasoning = explain::render(priority, &factors, confidence);

        debug!(
            priority = priority.as_str(),
            score = aggregate.score,
            confidence,
            "Priority analysis complete"
        );

        Ok(PriorityResult {
            priority,
            score: aggregate.score,
            confidence,
            method: Method::Analysis,
            reasoning,
            factors: Some(factors),
        })
    }
}

impl Default for PriorityEngine {
    fn default() -> Self {
        Self::new(PriorityRules::default_rules())
    }
}
