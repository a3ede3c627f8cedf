//! Integration tests for the insight engines
//!
//! These tests run both engines against waterfalls produced by the real
//! pipeline: the deterministic template end to end, and the delegated engine
//! against a mock transport. A failing engine must surface its error; there
//! is no silent fallback from one engine to the other.

use std::sync::Arc;
use winback::insight::{
    DelegatedEngine, DeterministicEngine, GenerationError, InsightEngine, MockInsightClient,
    MockReply, DETERMINISTIC_ENGINE_LABEL,
};
use winback::pipeline::CustomerAnalyzer;
use winback::waterfall::{FinancialAssumptions, WaterfallResult};

const FIXTURE_CSV: &str = "\
Customer Email,MRR,Churn Reason,Status,Account ID
alice@example.com,120,too expensive for our team,active,ACME-001
bob@example.com,80,app keeps crashing on login,cancelled,ACME-002
carol@example.com,200,,active,ACME-003
dan@example.com,45,switched to a competitor,cancelled,ACME-004
erin@example.com,95,missing the reporting feature,active,ACME-005
frank@example.com,60,support is slow to respond,active,ACME-006
grace@example.com,150,,active,ACME-007
,55,,active,ACME-008
henry@example.com,abc,,active,ACME-009
";

/// Helper to produce a waterfall with flagged customers
async fn fixture_waterfall() -> WaterfallResult {
    let analyzer = CustomerAnalyzer::new();
    analyzer
        .analyze_content(
            FIXTURE_CSV,
            FinancialAssumptions {
                lifetime_months: 12,
                success_rate_pct: 50,
            },
        )
        .await
        .unwrap()
        .waterfall
}

/// Helper to produce a waterfall with nothing flagged
async fn healthy_waterfall() -> WaterfallResult {
    let analyzer = CustomerAnalyzer::new();
    analyzer
        .analyze_content(
            "Email,MRR\na@x.com,100\nb@x.com,200\n",
            FinancialAssumptions::default(),
        )
        .await
        .unwrap()
        .waterfall
}

const VALID_REPLY: &str = r#"{
  "executiveSummary": "Billing pressure is the dominant churn driver this quarter.",
  "keyInsights": ["Billing complaints lead the breakdown", "Half the churned base is winnable"],
  "strategicRecommendations": ["Launch the win-back discount sequence", "Escalate crash reports"]
}"#;

#[tokio::test]
async fn test_deterministic_summary_from_pipeline_output() {
    let waterfall = fixture_waterfall().await;
    let engine = DeterministicEngine::new();

    let report = engine.generate(&waterfall).await.unwrap();

    assert_eq!(report.engine, DETERMINISTIC_ENGINE_LABEL);
    assert_eq!(
        report.executive_summary,
        "Analysis of 9 customers reveals 3 at-risk accounts and 2 churned customers. \
         At a 50% success rate, projected recovery value is $2,415.00."
    );
    assert_eq!(
        report.key_insights[0],
        "Primary churn driver: BILLING_COMPLAINT (1 customers affected)"
    );
    assert_eq!(report.key_insights[1], "Recommended play: WINBACK_20PCT_OFFER");
    assert!(report.key_insights[2].contains("LTV: $1207.50 (12 months)"));
    assert_eq!(
        report.key_insights[3],
        "Total addressable recovery: $2,415.00"
    );
    assert_eq!(report.strategic_recommendations.len(), 4);
    assert!(report.strategic_recommendations[1]
        .contains("Focus initial resources on BILLING_COMPLAINT segment"));
}

#[tokio::test]
async fn test_deterministic_is_reproducible() {
    let waterfall = fixture_waterfall().await;
    let engine = DeterministicEngine::new();

    let first = engine.generate(&waterfall).await.unwrap();
    let second = engine.generate(&waterfall).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_delegated_success_via_mock_transport() {
    let client = Arc::new(MockInsightClient::new());
    client.add_reply(MockReply::text(VALID_REPLY));
    let engine = DelegatedEngine::new(client.clone());

    let waterfall = fixture_waterfall().await;
    let report = engine.generate(&waterfall).await.unwrap();

    // The report is labeled with the transport's model, not a fixed string
    assert_eq!(report.engine, "mock-model");
    assert_eq!(
        report.executive_summary,
        "Billing pressure is the dominant churn driver this quarter."
    );
    assert_eq!(report.key_insights.len(), 2);
    assert_eq!(report.strategic_recommendations.len(), 2);
    assert_eq!(client.remaining_replies(), 0);
}

#[tokio::test]
async fn test_delegated_prompt_carries_aggregates_only() {
    let client = Arc::new(MockInsightClient::new());
    client.add_reply(MockReply::text(VALID_REPLY));
    let engine = DelegatedEngine::new(client.clone());

    let waterfall = fixture_waterfall().await;
    engine.generate(&waterfall).await.unwrap();

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];

    // Aggregate statistics cross the transport
    assert!(prompt.contains("STATS (NO PII)"));
    assert!(prompt.contains("\"totalCustomers\": 9"));
    assert!(prompt.contains("\"atRiskCount\": 3"));
    assert!(prompt.contains("BILLING_COMPLAINT"));

    // Row-level data never does
    assert!(!prompt.contains('@'));
    assert!(!prompt.contains("alice"));
    assert!(!prompt.contains("ACME-001"));
    assert!(!prompt.contains("too expensive"));
}

#[tokio::test]
async fn test_delegated_timeout_surfaces() {
    let client = Arc::new(MockInsightClient::new());
    client.add_reply(MockReply::error(GenerationError::Timeout { seconds: 30 }));
    let engine = DelegatedEngine::new(client);

    let waterfall = fixture_waterfall().await;
    let err = engine.generate(&waterfall).await.unwrap_err();

    match err {
        GenerationError::Timeout { seconds } => assert_eq!(seconds, 30),
        other => panic!("Expected Timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delegated_malformed_reply_surfaces() {
    let client = Arc::new(MockInsightClient::new());
    client.add_reply(MockReply::text("I could not produce structured output."));
    let engine = DelegatedEngine::new(client);

    let waterfall = fixture_waterfall().await;
    let err = engine.generate(&waterfall).await.unwrap_err();

    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_failed_delegation_never_falls_back() {
    let client = Arc::new(MockInsightClient::new());
    client.add_reply(MockReply::error(GenerationError::Authentication {
        message: "invalid api key".to_string(),
    }));
    let engine = DelegatedEngine::new(client);

    let waterfall = fixture_waterfall().await;
    let result = engine.generate(&waterfall).await;

    // The transport error comes back as-is; no deterministic report is
    // substituted behind the caller's back
    match result {
        Err(GenerationError::Authentication { message }) => {
            assert_eq!(message, "invalid api key");
        }
        Ok(report) => panic!(
            "Expected the failure to surface, got a report from {}",
            report.engine
        ),
        Err(other) => panic!("Expected Authentication, got {:?}", other),
    }
}

#[tokio::test]
async fn test_both_engines_reject_empty_aggregates() {
    let waterfall = healthy_waterfall().await;

    let deterministic = DeterministicEngine::new();
    assert!(matches!(
        deterministic.generate(&waterfall).await,
        Err(GenerationError::EmptyAggregates)
    ));

    let client = Arc::new(MockInsightClient::new());
    client.add_reply(MockReply::text(VALID_REPLY));
    let delegated = DelegatedEngine::new(client.clone());
    assert!(matches!(
        delegated.generate(&waterfall).await,
        Err(GenerationError::EmptyAggregates)
    ));

    // The delegated engine bailed before touching the transport
    assert!(client.prompts().is_empty());
    assert_eq!(client.remaining_replies(), 1);
}

#[tokio::test]
async fn test_engine_names_differ() {
    let deterministic = DeterministicEngine::new();
    let delegated = DelegatedEngine::new(Arc::new(MockInsightClient::new()));

    assert_eq!(deterministic.name(), "Deterministic Template");
    assert_ne!(deterministic.name(), delegated.name());
}
