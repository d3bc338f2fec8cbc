//! Vetting orchestrator: freshness-gated fan-out to the three validators,
//! neutral-default scoring, and append-only snapshot persistence.
//!
//! Each validator runs as its own spawned task under its own timeout, so a
//! slow or panicking validator cannot cancel or corrupt the others. The
//! fan-out, scoring, and persistence all happen inside one detached task:
//! a caller dropping the returned future cannot lose settled results.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::domain::conversation::{ConversationTurn, Transcript};
use crate::domain::extraction::{CompletenessAssessor, ProspectField};
use crate::domain::foundation::{ProspectId, Timestamp};
use crate::domain::vetting::{
    CompanyProfile, ComprehensiveScorer, FailureNote, FailureReason, Prospect,
    ValidationSnapshot, ValidatorKind, ValidatorOutcome, ValidatorOutcomes,
};
use crate::ports::{ConversationStore, ProspectStore, SnapshotStore, StoreError};

use super::{BudgetRealismAssessor, IdentityValidator, WebsiteIntelligenceAnalyzer};
use crate::application::extraction::FieldExtractor;

/// Errors that abort a vetting run without writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum VettingError {
    #[error("prospect not found: {0}")]
    ProspectNotFound(ProspectId),

    /// Vetting impossible: no conversation data exists for the prospect.
    #[error("vetting impossible: no conversation for prospect {0}")]
    NoConversation(ProspectId),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The detached run task failed to complete.
    #[error("vetting run failed: {0}")]
    Internal(String),
}

/// Entry point for vetting runs.
#[derive(Clone)]
pub struct VettingOrchestrator {
    prospects: Arc<dyn ProspectStore>,
    conversations: Arc<dyn ConversationStore>,
    snapshots: Arc<dyn SnapshotStore>,
    extractor: FieldExtractor,
    website: WebsiteIntelligenceAnalyzer,
    identity: IdentityValidator,
    budget: BudgetRealismAssessor,
    snapshot_freshness_hours: i64,
    validator_timeout: Duration,
}

impl VettingOrchestrator {
    /// Creates an orchestrator with the default 24h snapshot freshness
    /// window and 20s per-validator timeout.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        prospects: Arc<dyn ProspectStore>,
        conversations: Arc<dyn ConversationStore>,
        snapshots: Arc<dyn SnapshotStore>,
        extractor: FieldExtractor,
        website: WebsiteIntelligenceAnalyzer,
        identity: IdentityValidator,
        budget: BudgetRealismAssessor,
    ) -> Self {
        Self {
            prospects,
            conversations,
            snapshots,
            extractor,
            website,
            identity,
            budget,
            snapshot_freshness_hours: 24,
            validator_timeout: Duration::from_secs(20),
        }
    }

    /// Sets the snapshot freshness window.
    pub fn with_snapshot_freshness_hours(mut self, hours: i64) -> Self {
        self.snapshot_freshness_hours = hours;
        self
    }

    /// Sets the per-validator timeout.
    pub fn with_validator_timeout(mut self, validator_timeout: Duration) -> Self {
        self.validator_timeout = validator_timeout;
        self
    }

    /// Runs (or reuses) a vetting for the prospect.
    ///
    /// A snapshot younger than the freshness window is returned unchanged
    /// unless `force_refresh` is set; otherwise the three validators run
    /// concurrently, every branch settles to an outcome, and a new snapshot
    /// is appended and returned.
    pub async fn run_vetting(
        &self,
        prospect_id: ProspectId,
        force_refresh: bool,
    ) -> Result<ValidationSnapshot, VettingError> {
        if !force_refresh {
            if let Some(snapshot) = self.snapshots.latest_for(prospect_id).await? {
                if snapshot.is_fresh(self.snapshot_freshness_hours, &Timestamp::now()) {
                    tracing::debug!(%prospect_id, "Snapshot fresh; skipping validator calls");
                    return Ok(snapshot);
                }
            }
        }

        let prospect = self
            .prospects
            .get(prospect_id)
            .await?
            .ok_or(VettingError::ProspectNotFound(prospect_id))?;

        let turns = self.conversations.load(prospect.session_id).await?;
        if !turns.has_user_input() {
            tracing::warn!(%prospect_id, "Vetting impossible: no conversation");
            return Err(VettingError::NoConversation(prospect_id));
        }

        // Detach the actual run so caller teardown cannot lose settled
        // validator results.
        let orchestrator = self.clone();
        let handle: JoinHandle<Result<ValidationSnapshot, VettingError>> =
            tokio::spawn(async move { orchestrator.execute_run(prospect, turns).await });

        handle
            .await
            .map_err(|e| VettingError::Internal(e.to_string()))?
    }

    /// Returns the most recent snapshot without running anything.
    pub async fn latest_snapshot(
        &self,
        prospect_id: ProspectId,
    ) -> Result<Option<ValidationSnapshot>, VettingError> {
        Ok(self.snapshots.latest_for(prospect_id).await?)
    }

    /// The detached run body: fan-out, fan-in, score, persist.
    async fn execute_run(
        &self,
        prospect: Prospect,
        turns: Vec<ConversationTurn>,
    ) -> Result<ValidationSnapshot, VettingError> {
        let extraction = self.extractor.extract(&turns).await;
        let conversation_score = CompletenessAssessor::readiness_score(&extraction);

        let profile = CompanyProfile {
            employee_count: extraction
                .value_of(ProspectField::TeamSize)
                .and_then(|v| v.parse().ok()),
            industry: extraction
                .value_of(ProspectField::Industry)
                .map(String::from),
        };

        let deadline = self.validator_timeout;

        let website_task = {
            let analyzer = self.website.clone();
            let domain = prospect.claimed_domain.clone();
            tokio::spawn(async move {
                match domain {
                    Some(domain) => settle(deadline, analyzer.analyze(&domain)).await,
                    None => ValidatorOutcome::failed(FailureReason::MissingPrecondition(
                        "no_domain".to_string(),
                    )),
                }
            })
        };

        let identity_task = {
            let validator = self.identity.clone();
            let company = prospect.company_name.clone();
            let contact = prospect.contact_name.clone();
            let domain = prospect.claimed_domain.clone();
            tokio::spawn(async move {
                settle(
                    deadline,
                    validator.validate(&company, &contact, domain.as_deref()),
                )
                .await
            })
        };

        let budget_task = {
            let assessor = self.budget.clone();
            let turns = turns.clone();
            let profile = profile.clone();
            tokio::spawn(async move { settle(deadline, assessor.assess(&turns, &profile)).await })
        };

        // Fan-in: every branch resolves to an outcome, success or failure.
        let (website, identity, budget) = tokio::join!(website_task, identity_task, budget_task);
        let outcomes = ValidatorOutcomes {
            website: Some(join_outcome(website)),
            identity: Some(join_outcome(identity)),
            budget: Some(join_outcome(budget)),
        };

        let failures = collect_failures(&outcomes);
        for note in &failures {
            tracing::warn!(validator = %note.validator, reason = %note.reason, "Validator failed");
        }

        let breakdown = ComprehensiveScorer::score(conversation_score, &outcomes);
        let snapshot = ValidationSnapshot::from_breakdown(
            prospect.id,
            breakdown,
            failures,
            Timestamp::now(),
        );

        self.snapshots.append(snapshot.clone()).await?;
        tracing::info!(
            prospect_id = %prospect.id,
            score = snapshot.final_score,
            category = %snapshot.category,
            failed_validators = snapshot.failures.len(),
            "Persisted validation snapshot"
        );

        Ok(snapshot)
    }
}

/// Bounds a validator future with the per-task timeout.
async fn settle<F>(deadline: Duration, fut: F) -> ValidatorOutcome
where
    F: std::future::Future<Output = ValidatorOutcome>,
{
    match timeout(deadline, fut).await {
        Ok(outcome) => outcome,
        Err(_) => ValidatorOutcome::failed(FailureReason::Timeout),
    }
}

/// Maps a join result; a panicked validator task is an upstream failure of
/// that branch, never of the run.
fn join_outcome(result: Result<ValidatorOutcome, tokio::task::JoinError>) -> ValidatorOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(e) => ValidatorOutcome::failed(FailureReason::Upstream(format!(
            "validator task failed: {}",
            e
        ))),
    }
}

/// Collects failure notes in a fixed validator order.
fn collect_failures(outcomes: &ValidatorOutcomes) -> Vec<FailureNote> {
    let mut notes = Vec::new();
    let branches = [
        (ValidatorKind::Website, &outcomes.website),
        (ValidatorKind::Identity, &outcomes.identity),
        (ValidatorKind::Budget, &outcomes.budget),
    ];
    for (validator, outcome) in branches {
        if let Some(reason) = outcome.as_ref().and_then(|o| o.failure()) {
            notes.push(FailureNote {
                validator,
                reason: reason.clone(),
            });
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryConversationStore, InMemoryDomainCache, InMemoryProspectStore,
        InMemorySnapshotStore, MockCompletionClient, MockIdentityDirectory, MockSiteFetcher,
    };
    use crate::domain::foundation::SessionId;
    use crate::ports::{CompanyListing, PersonListing, ProspectStore, SnapshotStore};

    struct Fixture {
        orchestrator: VettingOrchestrator,
        snapshots: Arc<InMemorySnapshotStore>,
        prospect_id: ProspectId,
    }

    async fn fixture(
        fetcher: MockSiteFetcher,
        directory: MockIdentityDirectory,
        client: MockCompletionClient,
        turns: Vec<ConversationTurn>,
    ) -> Fixture {
        let prospects = Arc::new(InMemoryProspectStore::new());
        let conversations = Arc::new(InMemoryConversationStore::new());
        let snapshots = Arc::new(InMemorySnapshotStore::new());
        let cache = Arc::new(InMemoryDomainCache::new());
        let completion: Arc<dyn crate::ports::CompletionClient> = Arc::new(client);

        let session_id = SessionId::new();
        let prospect = Prospect::new(
            ProspectId::new(),
            session_id,
            "Acme Construction",
            "Dana Smith",
            Some("acme.example".into()),
        )
        .unwrap();
        let prospect_id = prospect.id;
        prospects.upsert(prospect).await.unwrap();
        conversations.seed(session_id, turns).await;

        let orchestrator = VettingOrchestrator::new(
            prospects,
            conversations.clone(),
            snapshots.clone(),
            FieldExtractor::new(completion.clone()),
            WebsiteIntelligenceAnalyzer::new(Arc::new(fetcher), completion.clone(), cache),
            IdentityValidator::new(Arc::new(directory)),
            BudgetRealismAssessor::new(completion),
        );

        Fixture {
            orchestrator,
            snapshots,
            prospect_id,
        }
    }

    fn rich_conversation() -> Vec<ConversationTurn> {
        vec![ConversationTurn::user(
            "We are a construction company with 200 construction workers. \
             Our $75k budget is approved and we need something off the shelf asap. \
             I am the CEO so I sign off on this.",
        )]
    }

    fn verified_directory() -> MockIdentityDirectory {
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

    const RICH_SITE_REPLY: &str = r#"{"has_company_description": true, "has_contact_info": true,
        "has_team_page": true, "has_product_info": true, "has_customer_evidence": true,
        "appears_parked": false}"#;

    #[tokio::test]
    async fn successful_run_persists_one_snapshot() {
        let f = fixture(
            MockSiteFetcher::new().with_site("acme.example", "<html>Acme</html>"),
            verified_directory(),
            MockCompletionClient::new()
                .with_response("{}")
                .with_response(RICH_SITE_REPLY),
            rich_conversation(),
        )
        .await;

        let snapshot = f.orchestrator.run_vetting(f.prospect_id, false).await.unwrap();

        assert!(snapshot.failures.is_empty());
        assert!(snapshot.final_score > 70.0);
        assert_eq!(f.snapshots.row_count().await, 1);
    }

    #[tokio::test]
    async fn fresh_snapshot_is_returned_bit_identical_without_validators() {
        let fetcher = MockSiteFetcher::new().with_site("acme.example", "<html>Acme</html>");
        let f = fixture(
            fetcher.clone(),
            verified_directory(),
            MockCompletionClient::new()
                .with_response("{}")
                .with_response(RICH_SITE_REPLY)
                .with_response("{}"),
            rich_conversation(),
        )
        .await;

        let first = f.orchestrator.run_vetting(f.prospect_id, false).await.unwrap();
        let fetches_after_first = fetcher.fetch_count();
        let second = f.orchestrator.run_vetting(f.prospect_id, false).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(first, second);
        assert_eq!(fetcher.fetch_count(), fetches_after_first);
        assert_eq!(f.snapshots.row_count().await, 1);
    }

    #[tokio::test]
    async fn force_refresh_appends_a_new_row() {
        let f = fixture(
            MockSiteFetcher::new().with_site("acme.example", "<html>Acme</html>"),
            verified_directory(),
            MockCompletionClient::new()
                .with_response("{}")
                .with_response(RICH_SITE_REPLY)
                .with_response("{}"),
            rich_conversation(),
        )
        .await;

        let first = f.orchestrator.run_vetting(f.prospect_id, false).await.unwrap();
        let second = f.orchestrator.run_vetting(f.prospect_id, true).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(f.snapshots.row_count().await, 2);
        // History preserved, newest first.
        let history = f.snapshots.history_for(f.prospect_id).await.unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn all_validators_failing_still_yields_a_snapshot() {
        // Website: fetch timeout. Identity: directory timeout. Budget: the
        // conversation has no parsable figure and the completion client
        // times out on the inference call.
        let f = fixture(
            MockSiteFetcher::new().with_timeout("acme.example", 10),
            verified_directory().with_forced_timeout(15),
            MockCompletionClient::new()
                .with_response("{}")
                .with_error(crate::adapters::MockCompletionError::Timeout { timeout_secs: 20 }),
            vec![ConversationTurn::user("hello, can you help us out?")],
        )
        .await;

        let snapshot = f.orchestrator.run_vetting(f.prospect_id, false).await.unwrap();

        assert_eq!(snapshot.failures.len(), 3);
        for note in &snapshot.failures {
            assert_eq!(note.reason, FailureReason::Timeout);
        }
        // Only the conversation signal at 40% plus neutral defaults remains.
        assert_eq!(
            snapshot.confidence_level,
            crate::domain::vetting::ConfidenceLevel::Low
        );
        assert_eq!(f.snapshots.row_count().await, 1);
    }

    #[tokio::test]
    async fn missing_conversation_aborts_without_a_snapshot() {
        let f = fixture(
            MockSiteFetcher::new(),
            MockIdentityDirectory::new(),
            MockCompletionClient::new(),
            Vec::new(),
        )
        .await;

        let err = f.orchestrator.run_vetting(f.prospect_id, false).await.unwrap_err();
        assert!(matches!(err, VettingError::NoConversation(_)));
        assert_eq!(f.snapshots.row_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_prospect_is_reported() {
        let f = fixture(
            MockSiteFetcher::new(),
            MockIdentityDirectory::new(),
            MockCompletionClient::new(),
            rich_conversation(),
        )
        .await;

        let err = f
            .orchestrator
            .run_vetting(ProspectId::new(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, VettingError::ProspectNotFound(_)));
    }

    #[tokio::test]
    async fn slow_validator_times_out_without_cancelling_the_others() {
        let f = fixture(
            MockSiteFetcher::new()
                .with_site("acme.example", "<html>Acme</html>")
                .with_delay(Duration::from_millis(200)),
            verified_directory(),
            MockCompletionClient::new().with_response("{}").with_response("{}"),
            rich_conversation(),
        )
        .await;
        let orchestrator = f
            .orchestrator
            .with_validator_timeout(Duration::from_millis(50));

        let snapshot = orchestrator.run_vetting(f.prospect_id, false).await.unwrap();

        assert_eq!(snapshot.failures.len(), 1);
        assert_eq!(snapshot.failures[0].validator, ValidatorKind::Website);
        assert_eq!(snapshot.failures[0].reason, FailureReason::Timeout);
        // Identity still succeeded at full authority.
        assert_eq!(snapshot.signals.identity.value(), 90);
    }

    #[tokio::test]
    async fn latest_snapshot_is_a_pure_query() {
        let f = fixture(
            MockSiteFetcher::new(),
            MockIdentityDirectory::new(),
            MockCompletionClient::new(),
            rich_conversation(),
        )
        .await;

        assert!(f
            .orchestrator
            .latest_snapshot(f.prospect_id)
            .await
            .unwrap()
            .is_none());
    }
}
