//! Structured field extraction for support emails.
//!
//! Contact details come from regex scans; the request type, urgency, and
//! sentiment labels are the shared classifiers' outputs, so extraction
//! never carries its own copies of their vocabularies.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::priority::Priority;
use crate::sentiment::Sentiment;

/// Contacts kept per kind.
const MAX_CONTACTS: usize = 5;

/// Contact details found in the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contacts {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

/// Structured data extracted from one email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    pub request_type: Category,
    pub urgency: Priority,
    pub sentiment: Sentiment,
    pub contacts: Contacts,
}

/// Regex-based contact extractor.
#[derive(Debug, Clone)]
pub struct ContactExtractor {
    email_re: Regex,
    phone_re: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self {
            email_re: Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+")
                .expect("email pattern"),
            phone_re: Regex::new(
                r"(?:\+\d{1,3}[\s-]?)?(?:\(\d{3}\)|\d{3})[\s-]?\d{3}[\s-]?\d{4}",
            )
            .expect("phone pattern"),
        }
    }
}

impl ContactExtractor {
    /// Find email addresses and phone numbers, deduplicated in order of
    /// first appearance, capped at five each.
    pub fn contacts(&self, text: &str) -> Contacts {
        Contacts {
            emails: self.collect(&self.email_re, text),
            phones: self.collect(&self.phone_re, text),
        }
    }

    fn collect(&self, re: &Regex, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for m in re.find_iter(text) {
            let value = m.as_str().to_string();
            if !found.contains(&value) {
                found.push(value);
                if found.len() == MAX_CONTACTS {
                    break;
                }
            }
        }
        found
    }
}
