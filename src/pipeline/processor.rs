//! Analysis processor — runs every classifier over incoming email.
//!
//! Flow per run: fetch from the source, analyze each message (total, no
//! per-item failure can abort the run), store each analysis in the sink.
//! Sink failures are logged and counted, not propagated, so one bad row
//! never loses the rest of the batch.

use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::category::CategoryClassifier;
use crate::error::PipelineError;
use crate::extract::{ContactExtractor, ExtractedData};
use crate::priority::{ClassificationRequest, PriorityEngine};
use crate::sentiment::SentimentClassifier;

use super::{AnalysisSink, EmailAnalysis, EmailMessage, EmailSource};

/// Counts for one processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub stored: usize,
    pub failed: usize,
}

/// Owns the classifier set and applies it to messages.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    engine: PriorityEngine,
    sentiment: SentimentClassifier,
    category: CategoryClassifier,
    contacts: ContactExtractor,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom-ruled priority engine; the companions keep defaults.
    pub fn with_engine(engine: PriorityEngine) -> Self {
        Self {
            engine,
            ..Default::default()
        }
    }

    /// Run every classifier over one message. Total: classification
    /// errors degrade inside the priority engine, they never surface.
    pub fn analyze_message(&self, message: &EmailMessage) -> EmailAnalysis {
        let email_id = message
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut request = ClassificationRequest::new(&message.subject, &message.body);
        request.sender = message.sender.clone();
        let priority = self.engine.classify(&request);

        let combined = format!("{} {}", message.subject, message.body);
        let sentiment = self.sentiment.analyze(&combined);
        let category = self.category.categorize(&message.subject, &message.body);
        let extracted = ExtractedData {
            request_type: category.category,
            urgency: priority.priority,
            sentiment: sentiment.sentiment,
            contacts: self.contacts.contacts(&combined),
        };

        debug!(
            email_id = %email_id,
            priority = priority.priority.as_str(),
            sentiment = sentiment.sentiment.as_str(),
            category = category.category.as_str(),
            "Message analyzed"
        );

        EmailAnalysis {
            email_id,
            priority,
            sentiment,
            category,
            extracted,
            analyzed_at: Utc::now(),
        }
    }

    /// Fetch, analyze, and store one round of messages.
    ///
    /// Returns the run counts; only a source failure aborts the run.
    pub async fn run_once(
        &self,
        source: &dyn EmailSource,
        sink: &dyn AnalysisSink,
    ) -> Result<RunSummary, PipelineError> {
        let messages = source.fetch_new().await?;
        let mut summary = RunSummary {
            fetched: messages.len(),
            ..Default::default()
        };
        info!(source = source.name(), count = summary.fetched, "Fetched messages");

        for message in &messages {
            let analysis = self.analyze_message(message);
            match sink.store(&analysis).await {
                Ok(()) => summary.stored += 1,
                Err(e) => {
                    error!(
                        email_id = %analysis.email_id,
                        error = %e,
                        "Failed to store analysis"
                    );
                    summary.failed += 1;
                }
            }
        }

        info!(
            stored = summary.stored,
            failed = summary.failed,
            "Processing run complete"
        );
        Ok(summary)
    }
}
