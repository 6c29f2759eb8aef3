//! End-to-end flow: source → classifiers → sink, plus the engine's
//! public contract exercised from outside the crate.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use support_triage::error::PipelineError;
use support_triage::pipeline::processor::Processor;
use support_triage::pipeline::{AnalysisSink, EmailAnalysis, EmailMessage, EmailSource};
use support_triage::priority::batch::BatchItem;
use support_triage::priority::{
    ClassificationRequest, Method, Priority, PriorityEngine, PriorityRules,
};
use support_triage::sentiment::Sentiment;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

fn message(id: &str, subject: &str, body: &str, sender: Option<&str>) -> EmailMessage {
    EmailMessage {
        id: Some(id.into()),
        subject: subject.into(),
        body: body.into(),
        sender: sender.map(String::from),
        received_at: Utc::now(),
    }
}

struct InboxFixture {
    messages: Vec<EmailMessage>,
}

#[async_trait]
impl EmailSource for InboxFixture {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn fetch_new(&self) -> Result<Vec<EmailMessage>, PipelineError> {
        Ok(self.messages.clone())
    }
}

#[derive(Default)]
struct CollectingSink {
    analyses: Mutex<Vec<EmailAnalysis>>,
}

#[async_trait]
impl AnalysisSink for CollectingSink {
    async fn store(&self, analysis: &EmailAnalysis) -> Result<(), PipelineError> {
        self.analyses.lock().unwrap().push(analysis.clone());
        Ok(())
    }
}

#[tokio::test]
async fn full_run_classifies_a_mixed_inbox() {
    init_tracing();
    let source = InboxFixture {
        messages: vec![
            message(
                "m-outage",
                "URGENT: system down, cannot access account",
                "This is critical, please help immediately",
                Some("user@example.com"),
            ),
            message(
                "m-idea",
                "Just curious about a feature",
                "No rush, whenever you have time, just wondering how this works",
                None,
            ),
            message(
                "m-thanks",
                "Thank you",
                "The support team was excellent, really appreciate the quick fix",
                Some("happy@customer.org"),
            ),
        ],
    };
    let sink = CollectingSink::default();

    let summary = Processor::new().run_once(&source, &sink).await.unwrap();
    assert_eq!(summary.fetched, 3);
    assert_eq!(summary.stored, 3);
    assert_eq!(summary.failed, 0);

    let analyses = sink.analyses.lock().unwrap();
    assert_eq!(analyses.len(), 3);

    let outage = &analyses[0];
    assert_eq!(outage.email_id, "m-outage");
    assert_eq!(outage.priority.priority, Priority::Urgent);
    assert!(outage.priority.score >= 0.85);
    assert_eq!(outage.priority.method, Method::Analysis);

    let idea = &analyses[1];
    assert!(matches!(
        idea.priority.priority,
        Priority::Low | Priority::Normal
    ));

    let thanks = &analyses[2];
    assert_eq!(thanks.sentiment.sentiment, Sentiment::Positive);
    assert_eq!(thanks.extracted.sentiment, Sentiment::Positive);
}

#[test]
fn engine_contract_holds_across_inputs() {
    let engine = PriorityEngine::default();
    let inputs = [
        ClassificationRequest::new("URGENT: outage", "production is down, fix immediately"),
        ClassificationRequest::new("Invoice query", "question about my last payment")
            .with_sender("billing@corp.com"),
        ClassificationRequest::new("", ""),
        ClassificationRequest::new("fyi", "newsletter attached, no rush"),
    ];

    for request in &inputs {
        let result = engine.classify(request);
        assert!((0.0..=1.0).contains(&result.score));
        assert!((0.0..=1.0).contains(&result.confidence));
        if result.method == Method::Analysis {
            assert_eq!(result.priority, Priority::from_score(result.score));
        }
        // Deterministic: same input, same output
        assert_eq!(engine.classify(request), result);
    }
}

#[test]
fn batch_survives_a_poisoned_engine() {
    let mut rules = PriorityRules::empty();
    rules.clear_fallback_lists();
    let engine = PriorityEngine::new(rules);

    let items: Vec<BatchItem> = (0..4)
        .map(|i| {
            BatchItem::with_id(
                ClassificationRequest::new(format!("mail {i}"), "hello"),
                format!("id-{i}"),
            )
        })
        .collect();

    let outcome = engine.classify_batch(&items);
    assert_eq!(outcome.results.len(), items.len());
    assert_eq!(outcome.metadata.failed, 4);
    for (i, entry) in outcome.results.iter().enumerate() {
        assert_eq!(entry.email_id, format!("id-{i}"));
        assert_eq!(entry.result.method, Method::ErrorFallback);
    }
}

#[test]
fn degraded_engine_still_ranks_urgency() {
    // No analysis vocabularies: everything goes through the fallback path,
    // which should still separate an outage from a courtesy note
    let engine = PriorityEngine::new(PriorityRules::empty());

    let outage = engine.classify(&ClassificationRequest::new(
        "URGENT: production outage",
        "everything is broken",
    ));
    let note = engine.classify(&ClassificationRequest::new("hello", "just saying hi"));

    assert_eq!(outage.method, Method::Fallback);
    assert_eq!(note.method, Method::Fallback);
    assert!(outage.score > note.score);
    assert_eq!(outage.priority, Priority::Urgent);
    assert_eq!(note.priority, Priority::Low);
}

#[test]
fn results_serialize_for_downstream_consumers() {
    let engine = PriorityEngine::default();
    let result = engine.classify(
        &ClassificationRequest::new("URGENT: system down", "cannot access account, help")
            .with_sender("ceo@company.com"),
    );

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["score"].is_f64());
    assert_eq!(json["method"], "analysis");
    assert!(json["factors"]["weights"]["keyword"].is_f64());
    assert!(json["reasoning"].as_str().unwrap().contains("priority"));

    // Round-trip preserves the result
    let back: support_triage::priority::PriorityResult =
        serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}
