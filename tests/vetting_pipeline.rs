//! End-to-end tests for the vetting pipeline.
//!
//! Wires the real services over in-memory adapters and mock collaborators:
//! intake turns flow through the extraction service until the conversation
//! is complete, then a vetting run fans out to the validators and persists
//! an immutable snapshot.

use std::sync::Arc;
use std::time::Duration;

use lead_radar::adapters::{
    InMemoryConversationStore, InMemoryDomainCache, InMemoryProspectStore, InMemorySnapshotStore,
    MockCompletionClient, MockIdentityDirectory, MockSiteFetcher,
};
use lead_radar::application::extraction::{ExtractionService, FieldExtractor};
use lead_radar::application::vetting::{
    BudgetRealismAssessor, IdentityValidator, VettingOrchestrator, WebsiteIntelligenceAnalyzer,
};
use lead_radar::domain::extraction::{FieldConfidence, ProspectField};
use lead_radar::domain::foundation::{ProspectId, SessionId};
use lead_radar::domain::vetting::{ConfidenceLevel, LeadCategory, Prospect};
use lead_radar::ports::{CompanyListing, PersonListing, ProspectStore, SnapshotStore};

const RICH_SITE_REPLY: &str = r#"{"has_company_description": true, "has_contact_info": true,
    "has_team_page": true, "has_product_info": true, "has_customer_evidence": true,
    "appears_parked": false}"#;

struct Pipeline {
    extraction: ExtractionService,
    orchestrator: VettingOrchestrator,
    snapshots: Arc<InMemorySnapshotStore>,
    fetcher: MockSiteFetcher,
    session_id: SessionId,
    prospect_id: ProspectId,
}

async fn pipeline(fetcher: MockSiteFetcher, directory: MockIdentityDirectory) -> Pipeline {
    let conversations = Arc::new(InMemoryConversationStore::new());
    let prospects = Arc::new(InMemoryProspectStore::new());
    let snapshots = Arc::new(InMemorySnapshotStore::new());
    let cache = Arc::new(InMemoryDomainCache::new());

    // Each consumer gets its own scripted completion client.
    let extractor_client = Arc::new(MockCompletionClient::new());
    let website_client = Arc::new(
        MockCompletionClient::new()
            .with_response(RICH_SITE_REPLY)
            .with_response(RICH_SITE_REPLY),
    );
    let budget_client = Arc::new(MockCompletionClient::new());

    let session_id = SessionId::new();
    let prospect = Prospect::new(
        ProspectId::new(),
        session_id,
        "Acme Construction",
        "Dana Smith",
        Some("https://www.acme.example/".into()),
    )
    .unwrap();
    let prospect_id = prospect.id;
    prospects.upsert(prospect).await.unwrap();

    let extraction = ExtractionService::new(
        conversations.clone(),
        FieldExtractor::new(extractor_client.clone()),
    );

    let orchestrator = VettingOrchestrator::new(
        prospects,
        conversations,
        snapshots.clone(),
        FieldExtractor::new(extractor_client),
        WebsiteIntelligenceAnalyzer::new(Arc::new(fetcher.clone()), website_client, cache),
        IdentityValidator::new(Arc::new(directory)),
        BudgetRealismAssessor::new(budget_client),
    );

    Pipeline {
        extraction,
        orchestrator,
        snapshots,
        fetcher,
        session_id,
        prospect_id,
    }
}

fn acme_fetcher() -> MockSiteFetcher {
    MockSiteFetcher::new().with_site(
        "acme.example",
        "<html>Acme Construction: scheduling software for contractors</html>",
    )
}

fn acme_directory() -> MockIdentityDirectory {
    MockIdentityDirectory::new()
        .with_company(CompanyListing {
            name: "Acme Construction".into(),
            domain: Some("acme.example".into()),
            employee_count: Some(200),
            industry: Some("construction".into()),
        })
        .with_person(
            "Acme Construction",
            PersonListing {
                name: "Dana Smith".into(),
                title: "CEO".into(),
            },
        )
}

#[tokio::test]
async fn construction_conversation_extracts_clear_fields() {
    let p = pipeline(acme_fetcher(), acme_directory()).await;

    let assessment = p
        .extraction
        .process_turn(
            p.session_id,
            "We have 200 construction workers and spend weekends on admin. \
             Our $75K budget is approved.",
        )
        .await
        .unwrap();

    let extraction = &assessment.extraction;
    assert_eq!(extraction.value_of(ProspectField::Industry), Some("construction"));
    assert_eq!(
        extraction.confidence_of(ProspectField::Industry),
        FieldConfidence::Clear
    );
    assert_eq!(extraction.value_of(ProspectField::BudgetStatus), Some("approved"));
    assert_eq!(
        extraction.confidence_of(ProspectField::BudgetStatus),
        FieldConfidence::Clear
    );
    assert_eq!(extraction.value_of(ProspectField::TeamSize), Some("200"));
    assert_eq!(extraction.value_of(ProspectField::BudgetAmount), Some("75000"));
    assert!(!assessment.completeness.is_complete);
}

#[tokio::test]
async fn ceo_exploring_conversation_extracts_consistent_fields() {
    let p = pipeline(acme_fetcher(), acme_directory()).await;

    let assessment = p
        .extraction
        .process_turn(p.session_id, "I am the CEO and we are exploring new technologies")
        .await
        .unwrap();

    let extraction = &assessment.extraction;
    assert_eq!(extraction.value_of(ProspectField::JobFunction), Some("c_level"));
    assert_eq!(extraction.value_of(ProspectField::BudgetStatus), Some("exploring"));
    assert_eq!(
        extraction.value_of(ProspectField::DecisionRole),
        Some("final_decision_maker")
    );
}

#[tokio::test]
async fn conversation_loop_terminates_when_required_fields_are_clear() {
    let p = pipeline(acme_fetcher(), acme_directory()).await;

    let turn1 = p
        .extraction
        .process_turn(
            p.session_id,
            "We have 200 construction workers and our $75K budget is approved",
        )
        .await
        .unwrap();
    assert!(!turn1.completeness.is_complete);
    assert!(turn1
        .completeness
        .missing_fields
        .contains(&ProspectField::ProblemType));

    let turn2 = p
        .extraction
        .process_turn(
            p.session_id,
            "Chasing invoices eats our week; we want something off the shelf",
        )
        .await
        .unwrap();
    assert!(!turn2.completeness.is_complete);
    assert!(
        turn2.completeness.completeness_score > turn1.completeness.completeness_score
    );

    let turn3 = p
        .extraction
        .process_turn(p.session_id, "I am the CEO, I sign off, and we need this asap")
        .await
        .unwrap();

    assert!(turn3.completeness.is_complete);
    assert!(turn3.completeness.missing_fields.is_empty());
    assert!(turn3.completeness.unclear_fields.is_empty());
    assert_eq!(
        turn3.completeness.completeness_score.value(),
        100
    );
}

#[tokio::test]
async fn full_run_after_complete_conversation_scores_hot() {
    let p = pipeline(acme_fetcher(), acme_directory()).await;

    for text in [
        "We have 200 construction workers and our $75K budget is approved",
        "Chasing invoices eats our week; we want something off the shelf",
        "I am the CEO, I sign off, and we need this asap",
    ] {
        p.extraction.process_turn(p.session_id, text).await.unwrap();
    }

    let snapshot = p.orchestrator.run_vetting(p.prospect_id, false).await.unwrap();

    assert!(snapshot.failures.is_empty());
    assert!(snapshot.final_score >= 80.0, "got {}", snapshot.final_score);
    assert_eq!(snapshot.category, LeadCategory::Hot);
    assert_eq!(snapshot.confidence_level, ConfidenceLevel::High);
    assert_eq!(snapshot.signals.website.value(), 100);
    assert_eq!(snapshot.signals.identity.value(), 90);
    assert_eq!(p.snapshots.row_count().await, 1);
}

#[tokio::test]
async fn repeat_run_within_freshness_window_is_bit_identical() {
    let p = pipeline(acme_fetcher(), acme_directory()).await;
    p.extraction
        .process_turn(
            p.session_id,
            "We have 200 construction workers and our $75K budget is approved",
        )
        .await
        .unwrap();

    let first = p.orchestrator.run_vetting(p.prospect_id, false).await.unwrap();
    let second = p.orchestrator.run_vetting(p.prospect_id, false).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert_eq!(first, second);
    assert_eq!(p.snapshots.row_count().await, 1);
}

#[tokio::test]
async fn domain_requested_again_seconds_later_is_served_from_cache() {
    let p = pipeline(acme_fetcher(), acme_directory()).await;
    p.extraction
        .process_turn(
            p.session_id,
            "We have 200 construction workers and our $75K budget is approved",
        )
        .await
        .unwrap();

    p.orchestrator.run_vetting(p.prospect_id, false).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    p.orchestrator.run_vetting(p.prospect_id, true).await.unwrap();

    // The forced second run reused the domain analysis: exactly one fetch.
    assert_eq!(p.fetcher.fetch_count(), 1);
    assert_eq!(p.snapshots.row_count().await, 2);
}

#[tokio::test]
async fn run_with_every_validator_down_still_scores_the_conversation() {
    let fetcher = MockSiteFetcher::new().with_timeout("acme.example", 10);
    let directory = MockIdentityDirectory::new().with_forced_timeout(15);
    let p = pipeline(fetcher, directory).await;

    p.extraction
        .process_turn(p.session_id, "hello, can you help us out?")
        .await
        .unwrap();

    let snapshot = p.orchestrator.run_vetting(p.prospect_id, false).await.unwrap();

    // Budget survives: the conversation exists and carries no figure, and
    // its completion client answers (with nothing useful) rather than
    // timing out. Website and identity both fail.
    assert_eq!(snapshot.failures.len(), 2);
    assert_eq!(snapshot.confidence_level, ConfidenceLevel::Low);
    assert!(snapshot.final_score < 40.0);
    assert_eq!(p.snapshots.row_count().await, 1);
}

#[tokio::test]
async fn snapshot_history_is_append_only() {
    let p = pipeline(acme_fetcher(), acme_directory()).await;
    p.extraction
        .process_turn(
            p.session_id,
            "We have 200 construction workers and our $75K budget is approved",
        )
        .await
        .unwrap();

    let first = p.orchestrator.run_vetting(p.prospect_id, false).await.unwrap();
    let second = p.orchestrator.run_vetting(p.prospect_id, true).await.unwrap();

    let history = p.snapshots.history_for(p.prospect_id).await.unwrap();
    assert_eq!(history.len(), 2);
    // Newest first; the older row is untouched.
    assert_eq!(history[1], first);
    assert_eq!(history[0].id, second.id);

    let latest = p.orchestrator.latest_snapshot(p.prospect_id).await.unwrap().unwrap();
    assert_eq!(latest.id, second.id);
}
