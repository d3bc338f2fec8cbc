//! The comprehensive scorer: a pure, total, weighted combination of the
//! conversation signal and the three validator outcomes.
//!
//! Weights are fixed. A failed or absent validator contributes its weight's
//! share at the neutral default, keeping the scale stable across runs with
//! differing validator availability.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;

use super::{CategoryThresholds, ConfidenceLevel, LeadCategory, ValidatorOutcome};

/// Neutral default substituted for any absent or failed signal.
pub const NEUTRAL_SIGNAL: Percentage = Percentage::NEUTRAL;

/// Fixed signal weights; they sum to 1.
const CONVERSATION_WEIGHT: f64 = 0.40;
const WEBSITE_WEIGHT: f64 = 0.20;
const IDENTITY_WEIGHT: f64 = 0.20;
const BUDGET_WEIGHT: f64 = 0.10;
/// Reserved for a behavioral-authenticity signal with no concrete source
/// yet; scored at the neutral default until one exists.
const BEHAVIORAL_WEIGHT: f64 = 0.10;

/// The validator outcomes available to one scoring run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorOutcomes {
    pub website: Option<ValidatorOutcome>,
    pub identity: Option<ValidatorOutcome>,
    pub budget: Option<ValidatorOutcome>,
}

impl ValidatorOutcomes {
    /// True when no validator outcome is present at all.
    pub fn is_empty(&self) -> bool {
        self.website.is_none() && self.identity.is_none() && self.budget.is_none()
    }
}

/// Effective per-signal scores that entered the weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalScores {
    pub conversation: Percentage,
    pub website: Percentage,
    pub identity: Percentage,
    pub budget: Percentage,
    pub behavioral: Percentage,
}

/// Output of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Weighted readiness score in [0,100]; categorized before rounding.
    pub final_score: f64,
    pub category: LeadCategory,
    pub confidence_level: ConfidenceLevel,
    pub signals: SignalScores,
}

/// Pure scoring function; holds no state.
pub struct ComprehensiveScorer;

impl ComprehensiveScorer {
    /// Combines the conversation signal with the validator outcomes.
    pub fn score(conversation_score: Percentage, outcomes: &ValidatorOutcomes) -> ScoreBreakdown {
        Self::score_with_thresholds(
            conversation_score,
            outcomes,
            CategoryThresholds::standard(),
        )
    }

    /// Scores a conversation with no validator signals, on the
    /// conversation-only threshold profile.
    pub fn score_conversation_only(conversation_score: Percentage) -> ScoreBreakdown {
        Self::score_with_thresholds(
            conversation_score,
            &ValidatorOutcomes::default(),
            CategoryThresholds::conversation_only(),
        )
    }

    fn score_with_thresholds(
        conversation_score: Percentage,
        outcomes: &ValidatorOutcomes,
        thresholds: CategoryThresholds,
    ) -> ScoreBreakdown {
        let signals = SignalScores {
            conversation: conversation_score,
            website: effective(&outcomes.website),
            identity: effective(&outcomes.identity),
            budget: effective(&outcomes.budget),
            behavioral: NEUTRAL_SIGNAL,
        };

        let final_score = signals.conversation.as_f64() * CONVERSATION_WEIGHT
            + signals.website.as_f64() * WEBSITE_WEIGHT
            + signals.identity.as_f64() * IDENTITY_WEIGHT
            + signals.budget.as_f64() * BUDGET_WEIGHT
            + signals.behavioral.as_f64() * BEHAVIORAL_WEIGHT;
        let final_score = final_score.clamp(0.0, 100.0);

        ScoreBreakdown {
            final_score,
            category: thresholds.categorize(final_score),
            confidence_level: ConfidenceLevel::from_score(final_score),
            signals,
        }
    }
}

/// Effective signal value: the validator's score on success, the neutral
/// default on failure or absence.
fn effective(outcome: &Option<ValidatorOutcome>) -> Percentage {
    outcome
        .as_ref()
        .and_then(|o| o.score())
        .unwrap_or(NEUTRAL_SIGNAL)
}
