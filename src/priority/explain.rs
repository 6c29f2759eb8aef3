//! Reasoning string generation.
//!
//! Pure formatting over the factors a classification already produced;
//! nothing here may alter a score.

use super::types::{Impact, Priority, PriorityFactors};

/// Signal score above which a level's matches are worth mentioning.
const MENTION_THRESHOLD: f64 = 0.3;

/// Weight above which a factor is named in the weight clause.
const WEIGHT_MENTION_THRESHOLD: f64 = 0.2;

/// Matched labels quoted per clause.
const MAX_EXAMPLES: usize = 3;

/// Render the semicolon-joined reasoning for an analysis result.
pub(crate) fn render(priority: Priority, factors: &PriorityFactors, confidence: f64) -> String {
    let mut clauses = vec![format!(
        "Email classified as {} priority",
        priority.as_str().to_uppercase()
    )];
    let mut detailed = Vec::new();

    for level in [Priority::Urgent, Priority::High, Priority::Normal, Priority::Low] {
        let matches = factors.keyword.matches.get(level);
        if !matches.is_empty() && factors.keyword.scores.get(level) > MENTION_THRESHOLD {
            detailed.push(format!(
                "{} priority keywords detected: \"{}\"",
                level.title(),
                quote_examples(matches)
            ));
        }
    }

    for level in [Impact::High, Impact::Medium, Impact::Low] {
        let matches = factors.business.matches.get(level);
        if !matches.is_empty() && factors.business.scores.get(level) > MENTION_THRESHOLD {
            detailed.push(format!(
                "{} business impact indicators: \"{}\"",
                level.title(),
                quote_examples(matches)
            ));
        }
    }

    for level in [Priority::Urgent, Priority::High, Priority::Normal, Priority::Low] {
        let matches = factors.time.matches.get(level);
        if !matches.is_empty() && factors.time.scores.get(level) > MENTION_THRESHOLD {
            detailed.push(format!(
                "{} time sensitivity indicators: \"{}\"",
                level.title(),
                quote_examples(matches)
            ));
        }
    }

    if let Some(reason) = factors.sender.reason.as_deref()
        && !reason.is_empty()
    {
        detailed.push(format!("Sender analysis: {reason}"));
    }

    let scores = [
        ("Keyword", factors.factor_scores.keyword),
        ("Business", factors.factor_scores.business),
        ("Time", factors.factor_scores.time),
        ("Sender", factors.factor_scores.sender),
    ];
    let significant: Vec<String> = scores
        .iter()
        .filter(|(_, v)| *v > MENTION_THRESHOLD)
        .map(|(name, v)| format!("{name}: {v:.2}"))
        .collect();
    if !significant.is_empty() {
        detailed.push(format!("Factor scores: {}", significant.join(", ")));
    }

    if matches!(priority, Priority::Urgent | Priority::High) {
        let weights = [
            ("Keyword", factors.weights.keyword),
            ("Business", factors.weights.business),
            ("Time", factors.weights.time),
            ("Sender", factors.weights.sender),
        ];
        let dominant: Vec<String> = weights
            .iter()
            .filter(|(_, w)| *w > WEIGHT_MENTION_THRESHOLD)
            .map(|(name, w)| format!("{name}: {w:.2}"))
            .collect();
        if !dominant.is_empty() {
            detailed.push(format!("Analysis weights: {}", dominant.join(", ")));
        }
    }

    detailed.push(format!("Confidence: {}%", (confidence * 100.0) as i32));

    if detailed.is_empty() {
        clauses.push("Standard priority based on content analysis".to_string());
    } else {
        clauses.extend(detailed);
    }

    clauses.join("; ")
}

fn quote_examples(matches: &[String]) -> String {
    matches
        .iter()
        .take(MAX_EXAMPLES)
        .cloned()
        .collect::<Vec<_>>()
        .join("\", \"")
}
