//! The four independent signal extractors.
//!
//! Each extractor is a pure function over the prepared analysis text (and
//! sender string): it returns its normalized scores together with the
//! matched labels that produced them, so later stages never reach back
//! into shared state.

use crate::classify::{LexiconOptions, score_lexicon};
use crate::text;

use super::types::{
    Impact, ImpactMatches, ImpactScores, ImpactSignal, KeywordSignal, LevelMatches, LevelScores,
    Priority, SenderSignal, TimeSignal,
};
use super::vocab::{
    AUTOMATED_SENDERS, EXECUTIVE_SENDERS, IMPORTANT_DOMAINS, ImpactVocab, LevelVocab,
    MANAGEMENT_SENDERS, SUPPORT_SENDERS, TimePatterns,
};

/// Chars treated as the subject region of the analysis text.
const SUBJECT_REGION_CHARS: usize = 100;

/// Bonus per matched label appearing inside the subject region.
const SUBJECT_MATCH_BONUS: f64 = 0.5;

/// Chars scanned either side of an urgent keyword for the proximity bonus.
const PROXIMITY_WINDOW_CHARS: usize = 50;

/// Bonus added when an impact indicator sits next to an urgent keyword.
const PROXIMITY_BONUS: f64 = 0.5;

/// Chars at each end of the text counted as deadline-prone positions.
const EDGE_REGION_CHARS: usize = 200;

/// Bonus per time match found in an edge region.
const EDGE_MATCH_BONUS: f64 = 0.3;

/// Time scores saturate at this many raw points.
const TIME_SATURATION: f64 = 5.0;

/// Matched labels kept per level for reporting.
const MAX_RECORDED: usize = 5;

/// Matched strings kept per time pattern.
const MAX_PER_PATTERN: usize = 3;

// ── Keyword matcher ─────────────────────────────────────────────────

/// Score the text against each priority level's keyword vocabulary.
///
/// Raw points divide by the vocabulary size, so a level's score only
/// approaches 1.0 when most of its vocabulary fires.
pub(crate) fn analyze_keywords(text_input: &str, vocab: &LevelVocab) -> KeywordSignal {
    let opts = LexiconOptions {
        subject_region: SUBJECT_REGION_CHARS,
        subject_bonus: SUBJECT_MATCH_BONUS,
        ..Default::default()
    };

    let mut scores = LevelScores::default();
    let mut matches = LevelMatches::default();
    for (level, words) in [
        (Priority::Urgent, &vocab.urgent),
        (Priority::High, &vocab.high),
        (Priority::Normal, &vocab.normal),
        (Priority::Low, &vocab.low),
    ] {
        let mut hits = score_lexicon(text_input, words, &opts);
        hits.matches.truncate(MAX_RECORDED);
        let score = normalize(hits.raw, words.len());
        match level {
            Priority::Urgent => {
                scores.urgent = score;
                matches.urgent = hits.matches;
            }
            Priority::High => {
                scores.high = score;
                matches.high = hits.matches;
            }
            Priority::Normal => {
                scores.normal = score;
                matches.normal = hits.matches;
            }
            Priority::Low => {
                scores.low = score;
                matches.low = hits.matches;
            }
        }
    }

    KeywordSignal { scores, matches }
}

// ── Business-impact matcher ─────────────────────────────────────────

/// Score the text against the impact vocabulary, with a proximity bonus
/// when an indicator appears near an urgent keyword ("blocking our
/// revenue" outranks a bare "revenue").
pub(crate) fn analyze_business(
    text_input: &str,
    vocab: &ImpactVocab,
    urgent_keywords: &[String],
) -> ImpactSignal {
    let opts = LexiconOptions::default();

    let mut scores = ImpactScores::default();
    let mut matches = ImpactMatches::default();
    for (level, words) in [
        (Impact::High, &vocab.high),
        (Impact::Medium, &vocab.medium),
        (Impact::Low, &vocab.low),
    ] {
        let mut hits = score_lexicon(text_input, words, &opts);
        let mut raw = hits.raw;
        raw += proximity_bonus(text_input, urgent_keywords, &hits.matches);
        hits.matches.truncate(MAX_RECORDED);
        let score = normalize(raw, words.len());
        match level {
            Impact::High => {
                scores.high = score;
                matches.high = hits.matches;
            }
            Impact::Medium => {
                scores.medium = score;
                matches.medium = hits.matches;
            }
            Impact::Low => {
                scores.low = score;
                matches.low = hits.matches;
            }
        }
    }

    ImpactSignal { scores, matches }
}

/// 0.5 per urgent keyword whose first occurrence has a matched indicator
/// within 50 chars on either side. The trailing window stops at the
/// keyword's next occurrence so a repeat never widens it.
fn proximity_bonus(text_input: &str, urgent_keywords: &[String], matched: &[String]) -> f64 {
    if matched.is_empty() {
        return 0.0;
    }
    let mut bonus = 0.0;
    for keyword in urgent_keywords {
        let Some(pos) = text_input.find(keyword.as_str()) else {
            continue;
        };
        let before = text::window_before(text_input, pos, PROXIMITY_WINDOW_CHARS);
        let tail = &text_input[pos + keyword.len()..];
        let segment = match tail.find(keyword.as_str()) {
            Some(next) => &tail[..next],
            None => tail,
        };
        let after = text::prefix(segment, PROXIMITY_WINDOW_CHARS);
        if matched
            .iter()
            .any(|m| before.contains(m.as_str()) || after.contains(m.as_str()))
        {
            bonus += PROXIMITY_BONUS;
        }
    }
    bonus
}

// ── Time-sensitivity matcher ────────────────────────────────────────

/// Count temporal-expression matches per level, with a positional bonus
/// for matches near the start or end of the message, where deadlines
/// tend to appear.
pub(crate) fn analyze_time(text_input: &str, patterns: &TimePatterns) -> TimeSignal {
    let beginning = text::prefix(text_input, EDGE_REGION_CHARS);
    let ending = text::suffix(text_input, EDGE_REGION_CHARS);

    let mut scores = LevelScores::default();
    let mut matches = LevelMatches::default();
    for (level, level_patterns) in [
        (Priority::Urgent, &patterns.urgent),
        (Priority::High, &patterns.high),
        (Priority::Normal, &patterns.normal),
        (Priority::Low, &patterns.low),
    ] {
        let mut raw = 0.0;
        let mut recorded: Vec<String> = Vec::new();
        for re in level_patterns {
            let mut per_pattern = 0;
            for caps in re.captures_iter(text_input) {
                raw += 1.0;
                if per_pattern < MAX_PER_PATTERN {
                    let m = capture_text(&caps);
                    recorded.push(m.to_string());
                    per_pattern += 1;
                }
            }
        }

        let at_beginning = recorded
            .iter()
            .filter(|m| beginning.contains(m.as_str()))
            .count();
        let at_ending = recorded
            .iter()
            .filter(|m| ending.contains(m.as_str()))
            .count();
        raw += (at_beginning + at_ending) as f64 * EDGE_MATCH_BONUS;

        recorded.truncate(MAX_RECORDED);
        let score = (raw / TIME_SATURATION).min(1.0);
        match level {
            Priority::Urgent => {
                scores.urgent = score;
                matches.urgent = recorded;
            }
            Priority::High => {
                scores.high = score;
                matches.high = recorded;
            }
            Priority::Normal => {
                scores.normal = score;
                matches.normal = recorded;
            }
            Priority::Low => {
                scores.low = score;
                matches.low = recorded;
            }
        }
    }

    TimeSignal { scores, matches }
}

/// The recorded text for a match: the first capture group when the
/// pattern has one, otherwise the whole match.
fn capture_text<'t>(caps: &regex::Captures<'t>) -> &'t str {
    caps.get(1)
        .unwrap_or_else(|| caps.get(0).expect("whole match"))
        .as_str()
}

// ── Sender-role classifier ──────────────────────────────────────────

/// Classify the sender into a priority scalar with a first-match-wins
/// rule table. Missing or empty senders score 0.0 with no reason.
pub(crate) fn analyze_sender(sender: Option<&str>) -> SenderSignal {
    let Some(sender) = sender else {
        return SenderSignal::default();
    };
    if sender.is_empty() {
        return SenderSignal::default();
    }

    let lower = sender.to_lowercase();

    if EXECUTIVE_SENDERS.iter().any(|role| lower.contains(role)) {
        return bucket(0.9, "Executive/VIP sender");
    }
    if MANAGEMENT_SENDERS.iter().any(|role| lower.contains(role)) {
        return bucket(0.8, "Management sender");
    }
    if SUPPORT_SENDERS.iter().any(|role| lower.contains(role)) {
        return bucket(0.7, "Support/Customer-related sender");
    }
    if let Some(domain) = lower.split('@').nth(1)
        && IMPORTANT_DOMAINS.iter().any(|d| domain.contains(d))
    {
        return bucket(0.65, "Important domain sender");
    }
    if AUTOMATED_SENDERS.iter().any(|term| lower.contains(term)) {
        return bucket(0.2, "Automated/System sender");
    }

    bucket(0.5, "Standard sender")
}

fn bucket(score: f64, reason: &str) -> SenderSignal {
    SenderSignal {
        score,
        reason: Some(reason.to_string()),
    }
}

fn normalize(raw: f64, vocab_len: usize) -> f64 {
    if vocab_len == 0 {
        return 0.0;
    }
    (raw / vocab_len as f64).min(1.0)
}
