//! Keyword-based sentiment classification.
//!
//! A deliberately small cousin of the priority engine: two word lists,
//! counted hits, and a confidence that grows with the margin. Good
//! enough to route tone-sensitive replies without any model dependency.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{LexiconOptions, score_lexicon};

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "happy",
    "pleased",
    "satisfied",
    "thank",
    "appreciate",
    "love",
    "awesome",
    "brilliant",
    "outstanding",
    "perfect",
    "superb",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "horrible",
    "disappointed",
    "angry",
    "frustrated",
    "upset",
    "annoyed",
    "hate",
    "dislike",
    "problem",
    "issue",
    "broken",
    "failed",
    "error",
    "crash",
    "slow",
];

/// Sentiment label for an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// Sentiment classification output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub positive_count: usize,
    pub negative_count: usize,
}

/// Word-list sentiment classifier.
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().map(|w| w.to_string()).collect(),
            negative: NEGATIVE_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl SentimentClassifier {
    /// Classify the sentiment of a piece of text.
    ///
    /// The majority list wins; confidence starts at 0.5 and climbs 0.1
    /// per winning hit, capped at 0.8. A tie (including zero hits) is
    /// neutral at 0.5.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let lowered = text.to_lowercase();
        let opts = LexiconOptions {
            partial_points: 0.0,
            ..Default::default()
        };
        let positive_count = score_lexicon(&lowered, &self.positive, &opts).matches.len();
        let negative_count = score_lexicon(&lowered, &self.negative, &opts).matches.len();

        let (sentiment, confidence) = if positive_count > negative_count {
            (
                Sentiment::Positive,
                (0.5 + positive_count as f64 * 0.1).min(0.8),
            )
        } else if negative_count > positive_count {
            (
                Sentiment::Negative,
                (0.5 + negative_count as f64 * 0.1).min(0.8),
            )
        } else {
            (Sentiment::Neutral, 0.5)
        };

        debug!(
            sentiment = sentiment.as_str(),
            positive_count, negative_count, "Sentiment analysis complete"
        );

        SentimentResult {
            sentiment,
            confidence,
            positive_count,
            negative_count,
        }
    }

    /// Classify a batch of texts, in order.
    pub fn analyze_batch<'a, I>(&self, texts: I) -> Vec<SentimentResult>
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts.into_iter().map(|t| self.analyze(t)).collect()
    }
}
