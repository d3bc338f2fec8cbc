//! Completeness assessment over an extraction.
//!
//! Presence and clarity are checked separately: a field can be present with a
//! low-confidence value and must not count as satisfied.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::Percentage;

use super::{FieldConfidence, FieldExtraction, ProspectField};

/// Fields that must be present and clear before a conversation can close.
pub const REQUIRED_FIELDS: &[ProspectField] = &[
    ProspectField::ProblemType,
    ProspectField::Industry,
    ProspectField::SolutionPreference,
    ProspectField::BusinessUrgency,
    ProspectField::DecisionRole,
    ProspectField::BudgetStatus,
];

/// Result of assessing an extraction against the required-field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessResult {
    /// True only when no required field is missing or unclear.
    pub is_complete: bool,
    /// Presence-only score: share of required fields with any value.
    pub completeness_score: Percentage,
    /// Required fields with no extracted value.
    pub missing_fields: BTreeSet<ProspectField>,
    /// Required fields present but with Vague confidence.
    pub unclear_fields: BTreeSet<ProspectField>,
}

/// Deterministic assessor over extractions; stateless.
pub struct CompletenessAssessor;

impl CompletenessAssessor {
    /// Assesses whether the required-field set is satisfied.
    pub fn assess(extraction: &FieldExtraction) -> CompletenessResult {
        let mut missing = BTreeSet::new();
        let mut unclear = BTreeSet::new();

        for field in REQUIRED_FIELDS {
            match extraction.confidence_of(*field) {
                FieldConfidence::Unknown => {
                    missing.insert(*field);
                }
                FieldConfidence::Vague => {
                    unclear.insert(*field);
                }
                FieldConfidence::Clear => {}
            }
        }

        let present = REQUIRED_FIELDS.len() - missing.len();
        let completeness_score =
            Percentage::from_ratio(present as u32, REQUIRED_FIELDS.len() as u32);

        CompletenessResult {
            is_complete: missing.is_empty() && unclear.is_empty(),
            completeness_score,
            missing_fields: missing,
            unclear_fields: unclear,
        }
    }

    /// Conversation-derived readiness score for the comprehensive scorer.
    ///
    /// Over the required fields, a Clear field contributes fully, a Vague
    /// field half, a missing field nothing.
    pub fn readiness_score(extraction: &FieldExtraction) -> Percentage {
        let mut points = 0u32;
        for field in REQUIRED_FIELDS {
            points += match extraction.confidence_of(*field) {
                FieldConfidence::Clear => 2,
                FieldConfidence::Vague => 1,
                FieldConfidence::Unknown => 0,
            };
        }
        Percentage::from_ratio(points, REQUIRED_FIELDS.len() as u32 * 2)
    }
}
