//! Budget realism assessor.
//!
//! Compares the claimed budget against the industry/size benchmark band.
//! Deliberately skeptical: a figure far outside the band in either
//! direction lowers the realism score. Falls back to the completion client
//! to pull a figure out of text the rule parser could not read; a fallback
//! failure fails the validator rather than quietly assuming a figure.

use std::sync::Arc;

use crate::domain::conversation::{ConversationTurn, Transcript, TurnRole};
use crate::domain::extraction::{apply_rules, parse_budget_amount, FieldExtraction, ProspectField};
use crate::domain::foundation::Percentage;
use crate::domain::vetting::{
    benchmark_for, BudgetCheck, BudgetStage, CompanyProfile, FailureReason, ValidatorDetails,
    ValidatorOutcome,
};
use crate::ports::{CompletionClient, CompletionError, CompletionRequest};

/// Assesses whether a claimed budget is plausible for a company profile.
#[derive(Clone)]
pub struct BudgetRealismAssessor {
    completion: Arc<dyn CompletionClient>,
}

impl BudgetRealismAssessor {
    /// Creates an assessor over the given completion client.
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    /// Assesses the conversation's budget claim against the benchmark.
    pub async fn assess(
        &self,
        conversation: &[ConversationTurn],
        profile: &CompanyProfile,
    ) -> ValidatorOutcome {
        if !conversation.has_user_input() {
            return ValidatorOutcome::failed(FailureReason::MissingPrecondition(
                "no_conversation".to_string(),
            ));
        }

        let text = conversation.user_text();
        let mut scratch = FieldExtraction::empty();
        apply_rules(&text, &mut scratch);

        let stage = BudgetStage::from_status(scratch.value_of(ProspectField::BudgetStatus));

        let claimed = match parse_budget_amount(&text) {
            Some(figure) => Some(figure),
            None => match self.infer_budget(&text).await {
                Ok(figure) => figure,
                Err(CompletionError::Timeout { .. }) => {
                    return ValidatorOutcome::failed(FailureReason::Timeout);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Budget inference failed");
                    return ValidatorOutcome::failed(FailureReason::Upstream(e.to_string()));
                }
            },
        };

        let benchmark = benchmark_for(profile.industry.as_deref(), profile.employee_count);
        let score = realism_score(stage, claimed, &benchmark);

        tracing::debug!(?stage, ?claimed, %score, "Assessed budget realism");
        ValidatorOutcome::ok(
            score,
            ValidatorDetails::Budget(BudgetCheck {
                claimed_budget: claimed,
                stage,
                benchmark,
            }),
        )
    }

    /// Asks the completion client for a budget figure the parser missed.
    async fn infer_budget(&self, text: &str) -> Result<Option<u64>, CompletionError> {
        let request = CompletionRequest::new()
            .with_system_prompt(
                "Extract the annual budget the prospect claims, in US dollars.\n\
                 Reply with a single JSON object: {\"budget\": <integer or null>}",
            )
            .with_turn(TurnRole::User, text.to_string())
            .with_temperature(0.0)
            .with_max_tokens(100);

        let response = self.completion.complete(request).await?;

        let start = response.content.find('{');
        let end = response.content.rfind('}');
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(None);
        };
        if end <= start {
            return Ok(None);
        }

        let parsed: serde_json::Value = match serde_json::from_str(&response.content[start..=end]) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(None),
        };
        Ok(parsed.get("budget").and_then(|b| b.as_u64()))
    }
}

/// The fixed realism rubric.
///
/// The funding stage sets the base; the claimed figure's deviation from the
/// benchmark band adjusts it. No figure at all costs a little: a stage claim
/// without a number is weaker evidence.
fn realism_score(stage: BudgetStage, claimed: Option<u64>, benchmark: &crate::domain::vetting::BenchmarkBand) -> Percentage {
    let base: i32 = match stage {
        BudgetStage::Approved => 70,
        BudgetStage::InPlanning => 55,
        BudgetStage::Exploring => 40,
        BudgetStage::Unfunded => 15,
    };

    let adjustment: i32 = match claimed {
        None => -10,
        Some(figure) => {
            let deviation = benchmark.deviation_factor(figure);
            if deviation <= 1.0 {
                25
            } else if deviation <= 3.0 {
                10
            } else if deviation <= 10.0 {
                -15
            } else {
                -30
            }
        }
    };

    Percentage::new((base + adjustment).clamp(0, 100) as u8)
}
