//! Ingestion and persistence seams around the classifiers.
//!
//! The engine itself does no I/O. Upstream email sources (dataset, IMAP,
//! API) and downstream stores implement the traits here; the
//! [`processor::Processor`] glues the classifiers between them.

pub mod processor;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::CategoryResult;
use crate::error::PipelineError;
use crate::extract::ExtractedData;
use crate::priority::PriorityResult;
use crate::sentiment::SentimentResult;

/// One email as delivered by a source.
///
/// Sources guarantee subject and body are text (possibly empty) and that
/// sender, when present, is an address string. Messages without an id
/// get a generated UUID at the pipeline boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub id: Option<String>,
    pub subject: String,
    pub body: String,
    pub sender: Option<String>,
    pub received_at: DateTime<Utc>,
}

/// Everything the pipeline derives from one email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAnalysis {
    pub email_id: String,
    pub priority: PriorityResult,
    pub sentiment: SentimentResult,
    pub category: CategoryResult,
    pub extracted: ExtractedData,
    pub analyzed_at: DateTime<Utc>,
}

/// Upstream email supplier — pure I/O, no classification logic.
#[async_trait]
pub trait EmailSource: Send + Sync {
    /// Source name for logging (e.g. "dataset", "imap").
    fn name(&self) -> &str;

    /// Fetch new, not-yet-analyzed messages.
    async fn fetch_new(&self) -> Result<Vec<EmailMessage>, PipelineError>;
}

/// Downstream consumer of analyses — storage, response drafting, etc.
///
/// Consumers reading persisted results should treat unknown future
/// `method` values as plain analysis; the serde layer already does.
#[async_trait]
pub trait AnalysisSink: Send + Sync {
    async fn store(&self, analysis: &EmailAnalysis) -> Result<(), PipelineError>;
}
