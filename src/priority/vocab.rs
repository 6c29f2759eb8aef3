//! Default rule tables for the priority engine.
//!
//! Vocabularies are kept deliberately compact: every entry widens the
//! normalization denominator, and an overgrown list dilutes a strong
//! multi-cue email below the urgent band. Entries earn their place by
//! showing up in real support traffic.

use regex::Regex;

use super::types::{Impact, Priority};

// ── Keyword vocabularies ────────────────────────────────────────────

const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "critical",
    "emergency",
    "immediately",
    "asap",
    "cannot access",
    "system down",
];

const HIGH_KEYWORDS: &[&str] = &[
    "important",
    "priority",
    "deadline",
    "time sensitive",
    "payment",
    "invoice",
    "frustrated",
    "not working",
    "error",
    "unhappy",
];

const NORMAL_KEYWORDS: &[&str] = &[
    "question",
    "request",
    "help",
    "support",
    "information",
    "account",
    "how to",
    "guide",
];

const LOW_KEYWORDS: &[&str] = &[
    "no rush",
    "when convenient",
    "whenever",
    "take your time",
    "fyi",
    "newsletter",
    "feedback",
    "curious",
    "wondering",
    "no hurry",
];

// ── Business-impact vocabularies ────────────────────────────────────

const HIGH_IMPACT: &[&str] = &[
    "revenue",
    "customer",
    "account",
    "contract",
    "payment",
    "legal",
    "security",
    "business",
];

const MEDIUM_IMPACT: &[&str] = &[
    "system",
    "workflow",
    "team",
    "internal",
    "process",
    "service",
    "platform",
    "integration",
];

const LOW_IMPACT: &[&str] = &[
    "personal",
    "individual",
    "feedback",
    "suggestion",
    "newsletter",
    "curiosity",
    "question",
    "information",
];

// ── Time-sensitivity patterns ───────────────────────────────────────
// Applied to lowercased text; patterns with a capture group record the
// captured text, mirroring how the matches are reported.

const URGENT_TIME: &[&str] = &[
    r"\burgent(?:ly)?\b",
    r"\bimmediately\b",
    r"\bright now\b",
    r"\basap\b",
    r"\btoday\b",
    r"\btonight\b",
    r"within \d+ hours?",
    r"\bby noon\b",
    r"\bby \d+(?:am|pm)\b",
    r"\bby end of day\b",
    r"\bby eod\b",
    r"\bby close of business\b",
    r"\bdeadline today\b",
    r"\bdue today\b",
    r"\bemergency\b",
    r"\bcrisis\b",
];

const HIGH_TIME: &[&str] = &[
    r"\btomorrow\b",
    r"\bthis week\b",
    r"within \d+ days?\b",
    r"\bsoon\b",
    r"\bquickly\b",
    r"\bby (monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    r"\bdue (?:date|soon|by)\b",
    r"\btime.sensitive\b",
    r"\bpressing\b",
    r"\bupcoming deadline\b",
];

const NORMAL_TIME: &[&str] = &[
    r"\bnext week\b",
    r"\bwhen possible\b",
    r"\bat your convenience\b",
    r"\bwhen you have time\b",
    r"\bin the coming weeks?\b",
    r"\bnext month\b",
    r"\beventually\b",
    r"\bwhen you get a chance\b",
];

const LOW_TIME: &[&str] = &[
    r"\bno deadline\b",
    r"\bno hurry\b",
    r"\bno rush\b",
    r"\btake your time\b",
    r"\bwhenever\b",
    r"\bat your leisure\b",
    r"\bsomeday\b",
    r"\bnext quarter\b",
    r"\bnext year\b",
    r"\bin \d+ months?\b",
];

// ── Sender-role rule tables ─────────────────────────────────────────

pub(crate) const EXECUTIVE_SENDERS: &[&str] = &[
    "ceo", "cto", "cfo", "coo", "president", "vp", "vice president", "director", "head", "chief",
    "founder", "owner", "board",
];

pub(crate) const MANAGEMENT_SENDERS: &[&str] =
    &["manager", "supervisor", "lead", "principal", "senior", "team lead"];

pub(crate) const SUPPORT_SENDERS: &[&str] =
    &["support", "help", "customer", "client", "service", "account manager"];

pub(crate) const IMPORTANT_DOMAINS: &[&str] = &[".gov", ".edu", ".org", "enterprise", "corporate"];

pub(crate) const AUTOMATED_SENDERS: &[&str] = &[
    "noreply",
    "donotreply",
    "no-reply",
    "do-not-reply",
    "system",
    "automated",
    "notification",
    "alert",
    "info@",
    "newsletter",
];

// ── Fallback word lists ─────────────────────────────────────────────

const FALLBACK_URGENT: &[&str] = &[
    "urgent",
    "critical",
    "emergency",
    "asap",
    "immediately",
    "outage",
    "down",
    "broken",
    "breach",
    "crash",
];

const FALLBACK_HIGH: &[&str] = &[
    "important",
    "priority",
    "help",
    "support",
    "issue",
    "problem",
    "error",
    "bug",
    "fix",
    "attention",
];

const FALLBACK_NORMAL: &[&str] = &[
    "update",
    "status",
    "information",
    "question",
    "inquiry",
    "request",
    "feedback",
    "follow-up",
    "fyi",
    "notification",
];

// ── Table holders ───────────────────────────────────────────────────

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// One vocabulary list per priority level.
#[derive(Debug, Clone, Default)]
pub(crate) struct LevelVocab {
    pub urgent: Vec<String>,
    pub high: Vec<String>,
    pub normal: Vec<String>,
    pub low: Vec<String>,
}

impl LevelVocab {
    pub fn defaults() -> Self {
        Self {
            urgent: owned(URGENT_KEYWORDS),
            high: owned(HIGH_KEYWORDS),
            normal: owned(NORMAL_KEYWORDS),
            low: owned(LOW_KEYWORDS),
        }
    }

    pub fn get_mut(&mut self, level: Priority) -> &mut Vec<String> {
        match level {
            Priority::Urgent => &mut self.urgent,
            Priority::High => &mut self.high,
            Priority::Normal => &mut self.normal,
            Priority::Low => &mut self.low,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty() && self.high.is_empty() && self.normal.is_empty() && self.low.is_empty()
    }
}

/// One indicator list per impact level.
#[derive(Debug, Clone, Default)]
pub(crate) struct ImpactVocab {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl ImpactVocab {
    pub fn defaults() -> Self {
        Self {
            high: owned(HIGH_IMPACT),
            medium: owned(MEDIUM_IMPACT),
            low: owned(LOW_IMPACT),
        }
    }

    pub fn get_mut(&mut self, level: Impact) -> &mut Vec<String> {
        match level {
            Impact::High => &mut self.high,
            Impact::Medium => &mut self.medium,
            Impact::Low => &mut self.low,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.medium.is_empty() && self.low.is_empty()
    }
}

/// Compiled time-sensitivity patterns per priority level.
#[derive(Debug, Clone, Default)]
pub(crate) struct TimePatterns {
    pub urgent: Vec<Regex>,
    pub high: Vec<Regex>,
    pub normal: Vec<Regex>,
    pub low: Vec<Regex>,
}

impl TimePatterns {
    pub fn defaults() -> Self {
        let compile = |patterns: &[&str]| {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("default time pattern"))
                .collect()
        };
        Self {
            urgent: compile(URGENT_TIME),
            high: compile(HIGH_TIME),
            normal: compile(NORMAL_TIME),
            low: compile(LOW_TIME),
        }
    }

    pub fn get_mut(&mut self, level: Priority) -> &mut Vec<Regex> {
        match level {
            Priority::Urgent => &mut self.urgent,
            Priority::High => &mut self.high,
            Priority::Normal => &mut self.normal,
            Priority::Low => &mut self.low,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty() && self.high.is_empty() && self.normal.is_empty() && self.low.is_empty()
    }
}

/// Word lists for the degraded fallback path.
#[derive(Debug, Clone, Default)]
pub(crate) struct FallbackLists {
    pub urgent: Vec<String>,
    pub high: Vec<String>,
    pub normal: Vec<String>,
}

impl FallbackLists {
    pub fn defaults() -> Self {
        Self {
            urgent: owned(FALLBACK_URGENT),
            high: owned(FALLBACK_HIGH),
            normal: owned(FALLBACK_NORMAL),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty() && self.high.is_empty() && self.normal.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_time_patterns_compile() {
        let patterns = TimePatterns::defaults();
        assert!(!patterns.urgent.is_empty());
        assert!(!patterns.high.is_empty());
        assert!(!patterns.normal.is_empty());
        assert!(!patterns.low.is_empty());
    }

    #[test]
    fn default_vocabularies_are_populated() {
        assert!(!LevelVocab::defaults().is_empty());
        assert!(!ImpactVocab::defaults().is_empty());
        assert!(!FallbackLists::defaults().is_empty());
    }

    #[test]
    fn urgent_time_patterns_match_expected_phrases() {
        let patterns = TimePatterns::defaults();
        let text = "we need this by end of day, urgently";
        let hits: usize = patterns
            .urgent
            .iter()
            .map(|re| re.find_iter(text).count())
            .sum();
        assert_eq!(hits, 2); // "by end of day" + "urgently"
    }
}
