//! Immutable validation snapshots.
//!
//! A vetting run appends a new snapshot row; rows are never mutated, so
//! history is preserved and "most recent" is a query.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProspectId, SnapshotId, Timestamp};

use super::{ConfidenceLevel, FailureReason, LeadCategory, ScoreBreakdown, SignalScores, ValidatorKind};

/// One validator's failure, reported informationally alongside the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureNote {
    pub validator: ValidatorKind,
    pub reason: FailureReason,
}

/// Immutable record of one complete vetting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSnapshot {
    pub id: SnapshotId,
    pub prospect_id: ProspectId,
    /// Weighted readiness score in [0,100].
    pub final_score: f64,
    pub category: LeadCategory,
    pub confidence_level: ConfidenceLevel,
    /// Effective per-signal scores that entered the weighted sum.
    pub signals: SignalScores,
    /// Validators that failed this run, and why.
    pub failures: Vec<FailureNote>,
    pub created_at: Timestamp,
}

impl ValidationSnapshot {
    /// Builds a snapshot from a scoring breakdown.
    pub fn from_breakdown(
        prospect_id: ProspectId,
        breakdown: ScoreBreakdown,
        failures: Vec<FailureNote>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: SnapshotId::new(),
            prospect_id,
            final_score: breakdown.final_score,
            category: breakdown.category,
            confidence_level: breakdown.confidence_level,
            signals: breakdown.signals,
            failures,
            created_at,
        }
    }

    /// True while the snapshot is younger than the freshness window.
    ///
    /// The boundary is strict: a snapshot exactly `window_hours` old is
    /// no longer fresh.
    pub fn is_fresh(&self, window_hours: i64, now: &Timestamp) -> bool {
        self.created_at.age_at(now) < chrono::Duration::hours(window_hours)
    }
}
