//! Validator outcomes as tagged variants.
//!
//! Every validator resolves to exactly one `ValidatorOutcome` before scoring;
//! a failure is data, never an exception crossing the orchestrator, and is
//! never silently coerced to a default inside the validator itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::Percentage;

use super::BenchmarkBand;

/// Which validator produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    Website,
    Identity,
    Budget,
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidatorKind::Website => "website",
            ValidatorKind::Identity => "identity",
            ValidatorKind::Budget => "budget",
        };
        write!(f, "{}", s)
    }
}

/// Why a validator failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// The validator's bounded timeout elapsed.
    #[error("timeout")]
    Timeout,
    /// An upstream collaborator returned an error.
    #[error("upstream: {0}")]
    Upstream(String),
    /// A required input was absent before the validator could run.
    #[error("missing precondition: {0}")]
    MissingPrecondition(String),
}

/// Outcome of one validator: a scored success or a reasoned failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidatorOutcome {
    Ok {
        score: Percentage,
        details: ValidatorDetails,
    },
    Failed {
        reason: FailureReason,
    },
}

impl ValidatorOutcome {
    /// Creates a successful outcome.
    pub fn ok(score: Percentage, details: ValidatorDetails) -> Self {
        ValidatorOutcome::Ok { score, details }
    }

    /// Creates a failed outcome.
    pub fn failed(reason: FailureReason) -> Self {
        ValidatorOutcome::Failed { reason }
    }

    /// Returns the score when the validator succeeded.
    pub fn score(&self) -> Option<Percentage> {
        match self {
            ValidatorOutcome::Ok { score, .. } => Some(*score),
            ValidatorOutcome::Failed { .. } => None,
        }
    }

    /// Returns the failure reason when the validator failed.
    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            ValidatorOutcome::Ok { .. } => None,
            ValidatorOutcome::Failed { reason } => Some(reason),
        }
    }

    /// True for a successful outcome.
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidatorOutcome::Ok { .. })
    }
}

/// Success payload per validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "validator", rename_all = "snake_case")]
pub enum ValidatorDetails {
    Website(WebsiteIntel),
    Identity(IdentityCheck),
    Budget(BudgetCheck),
}

/// Structured summary of a company's web presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteIntel {
    /// Site describes what the company does.
    pub has_company_description: bool,
    /// Reachable contact details (address, phone, email).
    pub has_contact_info: bool,
    /// Named team or leadership page.
    pub has_team_page: bool,
    /// Concrete product or service pages.
    pub has_product_info: bool,
    /// Customer logos, case studies, or testimonials.
    pub has_customer_evidence: bool,
    /// Parked, under-construction, or placeholder page.
    pub appears_parked: bool,
}

impl WebsiteIntel {
    /// Legitimacy score from a fixed weighting rubric.
    ///
    /// Verifiable business signals add up to 100; a parked page costs more
    /// than any single signal earns.
    pub fn legitimacy_score(&self) -> Percentage {
        let mut score: i32 = 0;
        if self.has_company_description {
            score += 25;
        }
        if self.has_contact_info {
            score += 20;
        }
        if self.has_team_page {
            score += 15;
        }
        if self.has_product_info {
            score += 20;
        }
        if self.has_customer_evidence {
            score += 20;
        }
        if self.appears_parked {
            score -= 60;
        }
        Percentage::new(score.clamp(0, 100) as u8)
    }
}

/// Result of the professional-identity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityCheck {
    /// The company resolved in the directory.
    pub company_found: bool,
    /// The named contact resolved at that company.
    pub person_found: bool,
    /// Decision-making seniority of the contact; zero when not found.
    pub authority_score: Percentage,
}

/// Seniority implied by a stated role, on a fixed ordinal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    IndividualContributor,
    Manager,
    Director,
    VicePresident,
    Executive,
}

impl Seniority {
    /// Classifies a stated role title.
    pub fn from_title(title: &str) -> Self {
        let title = title.to_lowercase();
        const EXECUTIVE: &[&str] = &[
            "ceo", "cto", "cfo", "coo", "chief", "founder", "owner", "president", "partner",
        ];
        const VICE_PRESIDENT: &[&str] = &["vp", "vice president"];
        const DIRECTOR: &[&str] = &["director", "head of"];
        const MANAGER: &[&str] = &["manager", "lead"];

        if EXECUTIVE.iter().any(|kw| title.contains(kw)) {
            Seniority::Executive
        } else if VICE_PRESIDENT.iter().any(|kw| title.contains(kw)) {
            Seniority::VicePresident
        } else if DIRECTOR.iter().any(|kw| title.contains(kw)) {
            Seniority::Director
        } else if MANAGER.iter().any(|kw| title.contains(kw)) {
            Seniority::Manager
        } else {
            Seniority::IndividualContributor
        }
    }

    /// Authority score on the fixed ordinal scale.
    pub fn authority_score(&self) -> Percentage {
        let value = match self {
            Seniority::Executive => 90,
            Seniority::VicePresident => 75,
            Seniority::Director => 60,
            Seniority::Manager => 45,
            Seniority::IndividualContributor => 25,
        };
        Percentage::new(value)
    }
}

/// Funding stage of a claimed budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStage {
    Approved,
    InPlanning,
    Exploring,
    Unfunded,
}

impl BudgetStage {
    /// Maps an extracted `budget_status` value onto a stage.
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("approved") => BudgetStage::Approved,
            Some("in_planning") => BudgetStage::InPlanning,
            Some("none") => BudgetStage::Unfunded,
            _ => BudgetStage::Exploring,
        }
    }
}

/// Result of the budget-realism check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCheck {
    /// Budget figure parsed from the conversation, in dollars.
    pub claimed_budget: Option<u64>,
    /// Funding stage inferred from the conversation.
    pub stage: BudgetStage,
    /// Benchmark band the claim was compared against.
    pub benchmark: BenchmarkBand,
}
