//! Batch classification with per-item failure isolation.
//!
//! The output sequence always has the same length and order as the
//! input: a failed item is recorded in the error list and replaced by an
//! error-fallback result, never dropped.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::types::{ClassificationRequest, PriorityResult};
use super::PriorityEngine;

/// One email in a batch, with an optional caller-supplied id.
///
/// Items without an id are identified by their batch index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub id: Option<String>,
    pub request: ClassificationRequest,
}

impl BatchItem {
    pub fn new(request: ClassificationRequest) -> Self {
        Self { id: None, request }
    }

    pub fn with_id(request: ClassificationRequest, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            request,
        }
    }
}

/// One classified email, keyed by the id it was submitted under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub email_id: String,
    pub result: PriorityResult,
}

/// A per-item failure, preserved alongside the substituted result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchError {
    pub email_id: String,
    pub index: usize,
    pub error: String,
}

/// Aggregate counts for a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMetadata {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<BatchError>,
}

/// Ordered results plus aggregate metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub results: Vec<BatchEntry>,
    pub metadata: BatchMetadata,
}

impl PriorityEngine {
    /// Classify a batch of emails in input order.
    ///
    /// Item failures are isolated: the failing item gets an
    /// error-fallback result and an entry in `metadata.errors`, and the
    /// batch continues.
    pub fn classify_batch(&self, items: &[BatchItem]) -> BatchOutcome {
        let mut results = Vec::with_capacity(items.len());
        let mut errors = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let email_id = item
                .id
                .clone()
                .unwrap_or_else(|| index.to_string());
            match self.try_classify(&item.request) {
                Ok(result) => results.push(BatchEntry { email_id, result }),
                Err(err) => {
                    warn!(
                        index,
                        email_id = %email_id,
                        error = %err,
                        "Batch item failed, substituting error fallback"
                    );
                    errors.push(BatchError {
                        email_id: email_id.clone(),
                        index,
                        error: err.to_string(),
                    });
                    results.push(BatchEntry {
                        email_id,
                        result: PriorityResult::error_fallback(&err),
                    });
                }
            }
        }

        let failed = errors.len();
        let metadata = BatchMetadata {
            total: items.len(),
            successful: items.len() - failed,
            failed,
            errors,
        };
        info!(
            total = metadata.total,
            successful = metadata.successful,
            failed = metadata.failed,
            "Batch classification complete"
        );

        BatchOutcome { results, metadata }
    }
}
