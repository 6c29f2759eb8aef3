//! Keyword-based email categorization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{LexiconOptions, score_lexicon};

/// Points per matched keyword.
const KEYWORD_POINTS: f64 = 2.0;

/// Support category for an email.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TechnicalSupport,
    Billing,
    GeneralInquiry,
    Complaint,
    FeatureRequest,
    AccountManagement,
    ProductSupport,
    Sales,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TechnicalSupport => "technical_support",
            Self::Billing => "billing",
            Self::GeneralInquiry => "general_inquiry",
            Self::Complaint => "complaint",
            Self::FeatureRequest => "feature_request",
            Self::AccountManagement => "account_management",
            Self::ProductSupport => "product_support",
            Self::Sales => "sales",
        }
    }
}

/// Categorization output: the winning category and every nonzero score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: Category,
    pub scores: BTreeMap<Category, f64>,
}

/// Keyword-vocabulary categorizer.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    vocabularies: Vec<(Category, Vec<String>)>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        let table: &[(Category, &[&str])] = &[
            (
                Category::TechnicalSupport,
                &[
                    "login", "password", "access", "error", "bug", "not working", "technical",
                    "crash", "app", "website", "platform",
                ],
            ),
            (
                Category::Billing,
                &[
                    "payment", "charge", "bill", "invoice", "refund", "subscription", "pricing",
                    "cost", "credit card",
                ],
            ),
            (
                Category::GeneralInquiry,
                &[
                    "information",
                    "question",
                    "inquiry",
                    "details",
                    "how to",
                    "what is",
                    "can you tell me",
                ],
            ),
            (
                Category::Complaint,
                &[
                    "complaint",
                    "dissatisfied",
                    "angry",
                    "frustrated",
                    "terrible",
                    "awful",
                    "bad experience",
                    "unhappy",
                    "disappointed",
                ],
            ),
            (
                Category::FeatureRequest,
                &[
                    "feature",
                    "suggestion",
                    "improvement",
                    "enhance",
                    "new functionality",
                    "capability",
                ],
            ),
            (
                Category::AccountManagement,
                &[
                    "account",
                    "profile",
                    "settings",
                    "update",
                    "change",
                    "personal information",
                    "preferences",
                ],
            ),
            (
                Category::ProductSupport,
                &[
                    "how to use",
                    "tutorial",
                    "guide",
                    "instructions",
                    "help with",
                    "documentation",
                ],
            ),
            (
                Category::Sales,
                &[
                    "purchase", "buy", "order", "sales", "quote", "demo", "trial", "upgrade",
                ],
            ),
        ];
        Self {
            vocabularies: table
                .iter()
                .map(|(category, words)| {
                    (*category, words.iter().map(|w| w.to_string()).collect())
                })
                .collect(),
        }
    }
}

impl CategoryClassifier {
    /// Categorize an email by keyword score over subject and body.
    ///
    /// Highest score wins; ties keep the earlier category in table
    /// order. With no hits at all the email is a general inquiry.
    pub fn categorize(&self, subject: &str, body: &str) -> CategoryResult {
        let text = format!("{subject} {body}").to_lowercase();
        let opts = LexiconOptions {
            exact_points: KEYWORD_POINTS,
            partial_points: 0.0,
            ..Default::default()
        };

        let mut scores = BTreeMap::new();
        let mut best: Option<(Category, f64)> = None;
        for (category, words) in &self.vocabularies {
            let raw = score_lexicon(&text, words, &opts).raw;
            if raw > 0.0 {
                scores.insert(*category, raw);
            }
            match best {
                Some((_, top)) if raw <= top => {}
                _ if raw > 0.0 => best = Some((*category, raw)),
                _ => {}
            }
        }

        CategoryResult {
            category: best.map(|(c, _)| c).unwrap_or(Category::GeneralInquiry),
            scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> CategoryClassifier {
        CategoryClassifier::default()
    }

    #[test]
    fn login_problem_is_technical_support() {
        let result = classifier().categorize(
            "Cannot login",
            "I reset my password but still get an error on the website",
        );
        assert_eq!(result.category, Category::TechnicalSupport);
    }

    #[test]
    fn refund_request_is_billing() {
        let result = classifier().categorize(
            "Refund for double charge",
            "My invoice shows two charges for one subscription payment",
        );
        assert_eq!(result.category, Category::Billing);
    }

    #[test]
    fn angry_email_is_complaint() {
        let result = classifier().categorize(
            "Very disappointed",
            "This has been a terrible, frustrating experience and I am unhappy",
        );
        assert_eq!(result.category, Category::Complaint);
    }

    #[test]
    fn feature_idea_is_feature_request() {
        let result = classifier().categorize(
            "Suggestion",
            "A dark mode feature would be a nice improvement",
        );
        assert_eq!(result.category, Category::FeatureRequest);
    }

    #[test]
    fn no_hits_default_to_general_inquiry() {
        let result = classifier().categorize("hello", "see you at the meetup");
        assert_eq!(result.category, Category::GeneralInquiry);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn tie_keeps_earlier_category() {
        // "error" (technical) and "refund" (billing) score once each;
        // technical support is declared first
        let result = classifier().categorize("", "the refund page shows an error");
        assert_eq!(result.category, Category::TechnicalSupport);
    }

    #[test]
    fn scores_report_every_matched_category() {
        let result = classifier().categorize(
            "Billing question",
            "How do I update the credit card on my account?",
        );
        assert!(result.scores.contains_key(&Category::Billing));
        assert!(result.scores.contains_key(&Category::GeneralInquiry));
        assert!(result.scores.contains_key(&Category::AccountManagement));
        assert_eq!(result.scores[&Category::Billing], 4.0);
    }

    #[test]
    fn category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(Category::TechnicalSupport).unwrap(),
            serde_json::json!("technical_support")
        );
    }
}
