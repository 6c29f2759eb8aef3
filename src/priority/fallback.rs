//! Degraded fallback determination.
//!
//! A dependency-light heuristic over three small word lists, used when
//! the multi-signal analysis is unusable. It trades nuance for totality:
//! given non-empty word lists it always produces a result.

use crate::error::PriorityError;

use super::types::{Method, Priority, PriorityResult};
use super::vocab::FallbackLists;

/// Subject bonus when it contains an urgent word.
const SUBJECT_URGENT_BONUS: f64 = 2.0;

/// Subject bonus when it contains a high word.
const SUBJECT_HIGH_BONUS: f64 = 1.5;

/// Matched words quoted in the reasoning.
const MAX_REASONING_WORDS: usize = 5;

/// Classify with the fallback word lists.
///
/// Scoring per list: exact-substring hits count 1.0; entries containing
/// any whitespace token of the text count another 0.5 (an exact hit also
/// counts as a token hit, by construction).
pub(crate) fn determine(
    subject: &str,
    body: &str,
    lists: &FallbackLists,
) -> Result<PriorityResult, PriorityError> {
    if lists.is_empty() {
        return Err(PriorityError::EmptyFallbackLists);
    }

    // Subject doubled so its words weigh more than the body's
    let text = format!("{subject} {subject} {body}").to_lowercase();
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let mut urgent_score = list_score(&lists.urgent, &text, &tokens);
    let mut high_score = list_score(&lists.high, &text, &tokens);
    let normal_score = list_score(&lists.normal, &text, &tokens);

    let subject_lower = subject.to_lowercase();
    if lists.urgent.iter().any(|w| subject_lower.contains(w.as_str())) {
        urgent_score += SUBJECT_URGENT_BONUS;
    }
    if lists.high.iter().any(|w| subject_lower.contains(w.as_str())) {
        high_score += SUBJECT_HIGH_BONUS;
    }

    let mut matched: Vec<String> = Vec::new();
    for (score, list) in [
        (urgent_score, &lists.urgent),
        (high_score, &lists.high),
        (normal_score, &lists.normal),
    ] {
        if score > 0.0 {
            matched.extend(
                list.iter()
                    .filter(|w| text.contains(w.as_str()))
                    .take(3)
                    .cloned(),
            );
        }
    }

    let (priority, score, confidence) = if urgent_score >= 2.0 {
        (
            Priority::Urgent,
            (0.7 + urgent_score * 0.05).min(0.9),
            (0.6 + urgent_score * 0.03).min(0.8),
        )
    } else if urgent_score > 0.0 || high_score >= 2.0 {
        (
            Priority::High,
            (0.6 + high_score * 0.04).min(0.8),
            (0.5 + high_score * 0.03).min(0.7),
        )
    } else if high_score > 0.0 || normal_score >= 3.0 {
        (
            Priority::Normal,
            (0.4 + normal_score * 0.03).min(0.6),
            (0.4 + normal_score * 0.02).min(0.6),
        )
    } else {
        (Priority::Low, 0.3, 0.5)
    };

    let reasoning = if matched.is_empty() {
        "Fallback priority determination used".to_string()
    } else {
        matched.truncate(MAX_REASONING_WORDS);
        format!(
            "Fallback analysis detected keywords: \"{}\"",
            matched.join("\", \"")
        )
    };

    Ok(PriorityResult {
        priority,
        score,
        confidence,
        method: Method::Fallback,
        reasoning,
        factors: None,
    })
}

/// Exact hits plus half-weight token hits for one word list.
fn list_score(list: &[String], text: &str, tokens: &[&str]) -> f64 {
    let exact = list.iter().filter(|w| text.contains(w.as_str())).count();
    let partial = list
        .iter()
        .filter(|w| tokens.iter().any(|t| w.contains(t)))
        .count();
    exact as f64 + partial as f64 * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(subject: &str, body: &str) -> PriorityResult {
        determine(subject, body, &FallbackLists::defaults()).unwrap()
    }

    #[test]
    fn urgent_subject_maps_to_urgent() {
        let result = run("URGENT: production outage", "everything is down");
        assert_eq!(result.priority, Priority::Urgent);
        assert_eq!(result.method, Method::Fallback);
        assert!(result.score <= 0.9);
        assert!(result.confidence <= 0.8);
    }

    #[test]
    fn single_urgent_word_in_body_maps_to_high() {
        // One urgent hit without subject reinforcement stays below the
        // urgent threshold of 2.0
        let result = run("status report", "the server went down briefly");
        assert_eq!(result.priority, Priority::High);
    }

    #[test]
    fn plain_request_maps_to_normal() {
        let result = run("", "could you send an update on my request");
        assert_eq!(result.priority, Priority::Normal);
    }

    #[test]
    fn no_matches_map_to_low() {
        let result = run("hello", "just saying hi");
        assert_eq!(result.priority, Priority::Low);
        assert_eq!(result.score, 0.3);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.reasoning, "Fallback priority determination used");
    }

    #[test]
    fn reasoning_lists_matched_words() {
        let result = run("critical bug", "this is a critical problem");
        assert!(result.reasoning.starts_with("Fallback analysis detected keywords:"));
        assert!(result.reasoning.contains("critical"));
    }

    #[test]
    fn empty_lists_are_an_error() {
        let lists = FallbackLists::default();
        let err = determine("urgent", "urgent", &lists).unwrap_err();
        assert!(matches!(err, PriorityError::EmptyFallbackLists));
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let result = run(
            "urgent critical emergency outage",
            "urgent critical emergency asap immediately down broken breach crash",
        );
        assert!(result.score >= 0.0 && result.score <= 1.0);
        assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
    }
}
