//! Weighted-lexicon scoring shared by the classifier family.
//!
//! The priority keyword and business-impact signals, the sentiment
//! classifier, and the category classifier all score text against a fixed
//! vocabulary. The mechanics live here once, parameterized per call site,
//! instead of each classifier carrying its own matching loop.

use crate::text;

/// How a vocabulary is scored against a piece of text.
#[derive(Debug, Clone)]
pub struct LexiconOptions {
    /// Points for an exact substring match.
    pub exact_points: f64,
    /// Points for a multi-word phrase whose words mostly appear.
    /// Zero disables phrase-partial matching entirely.
    pub partial_points: f64,
    /// Fraction of a phrase's words that must appear for a partial hit.
    pub word_threshold: f64,
    /// Size in chars of the leading "subject region"; zero disables the bonus.
    pub subject_region: usize,
    /// Bonus per recorded match whose label appears inside the subject region.
    pub subject_bonus: f64,
}

impl Default for LexiconOptions {
    fn default() -> Self {
        Self {
            exact_points: 1.0,
            partial_points: 0.75,
            word_threshold: 0.75,
            subject_region: 0,
            subject_bonus: 0.0,
        }
    }
}

/// Raw score plus the matched labels, in vocabulary order.
///
/// Partial hits are recorded with a `" (partial)"` suffix so downstream
/// reporting can distinguish them. Callers cap the list themselves — the
/// bonus passes here need the full set.
#[derive(Debug, Clone, Default)]
pub struct LexiconHits {
    pub raw: f64,
    pub matches: Vec<String>,
}

/// Score `text` against one vocabulary list.
///
/// Exact substring hits score `exact_points`. A multi-word entry whose
/// words appear (as space-delimited tokens) at or above `word_threshold`
/// scores `partial_points`. Matches recorded inside the first
/// `subject_region` chars add `subject_bonus` each.
pub fn score_lexicon(text_input: &str, vocabulary: &[String], opts: &LexiconOptions) -> LexiconHits {
    let padded = format!(" {text_input} ");
    let mut raw = 0.0;
    let mut matches = Vec::new();

    for entry in vocabulary {
        if text_input.contains(entry.as_str()) {
            raw += opts.exact_points;
            matches.push(entry.clone());
        } else if opts.partial_points > 0.0 {
            let words: Vec<&str> = entry.split(' ').collect();
            if words.len() > 1 {
                let present = words
                    .iter()
                    .filter(|w| padded.contains(&format!(" {w} ")))
                    .count();
                if present as f64 >= words.len() as f64 * opts.word_threshold {
                    raw += opts.partial_points;
                    matches.push(format!("{entry} (partial)"));
                }
            }
        }
    }

    if opts.subject_region > 0 && opts.subject_bonus > 0.0 {
        let region = text::prefix(text_input, opts.subject_region);
        let in_region = matches
            .iter()
            .filter(|m| region.contains(m.as_str()))
            .count();
        raw += in_region as f64 * opts.subject_bonus;
    }

    LexiconHits { raw, matches }
}
