//! Vetting domain: validator outcomes, readiness categories, the weighted
//! comprehensive scorer, and immutable validation snapshots.

mod benchmarks;
mod category;
mod outcome;
mod prospect;
mod scorer;
mod snapshot;

pub use benchmarks::{benchmark_for, BenchmarkBand};
pub use category::{CategoryThresholds, ConfidenceLevel, LeadCategory};
pub use outcome::{
    BudgetCheck, BudgetStage, FailureReason, IdentityCheck, Seniority, ValidatorDetails,
    ValidatorKind, ValidatorOutcome, WebsiteIntel,
};
pub use prospect::{CompanyProfile, Prospect};
pub use scorer::{ComprehensiveScorer, ScoreBreakdown, SignalScores, ValidatorOutcomes, NEUTRAL_SIGNAL};
pub use snapshot::{FailureNote, ValidationSnapshot};
