//! Readiness categories and confidence levels.
//!
//! Thresholds are table-driven and partition the closed interval [0,100]
//! with no overlaps or gaps; each threshold is the closed lower bound of
//! the category it starts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse readiness bucket for a prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadCategory {
    Hot,
    Warm,
    Cool,
    Cold,
}

impl fmt::Display for LeadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeadCategory::Hot => "HOT",
            LeadCategory::Warm => "WARM",
            LeadCategory::Cool => "COOL",
            LeadCategory::Cold => "COLD",
        };
        write!(f, "{}", s)
    }
}

/// How much trust to put in a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Derives the confidence level from a final score.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            ConfidenceLevel::High
        } else if score < 40.0 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::Medium
        }
    }
}

/// Table of category lower bounds, highest first. The last entry must be
/// zero so every score in [0,100] lands somewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryThresholds {
    bands: [(f64, LeadCategory); 4],
}

impl CategoryThresholds {
    /// Standard profile used when validator signals participated.
    pub fn standard() -> Self {
        Self {
            bands: [
                (80.0, LeadCategory::Hot),
                (65.0, LeadCategory::Warm),
                (45.0, LeadCategory::Cool),
                (0.0, LeadCategory::Cold),
            ],
        }
    }

    /// Profile for scoring a conversation alone: WARM starts at 60.
    pub fn conversation_only() -> Self {
        Self {
            bands: [
                (80.0, LeadCategory::Hot),
                (60.0, LeadCategory::Warm),
                (45.0, LeadCategory::Cool),
                (0.0, LeadCategory::Cold),
            ],
        }
    }

    /// Maps a score onto its category; total over [0,100].
    pub fn categorize(&self, score: f64) -> LeadCategory {
        for (floor, category) in self.bands {
            if score >= floor {
                return category;
            }
        }
        // The zero floor above catches every non-negative score.
        LeadCategory::Cold
    }

    /// The table rows, highest floor first.
    pub fn bands(&self) -> &[(f64, LeadCategory)] {
        &self.bands
    }
}
