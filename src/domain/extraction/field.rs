//! The fixed qualification-field catalog.
//!
//! Each field has an enumerated value domain (or is numeric) so downstream
//! consumers never see free-form strings outside the agreed schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence category for an extracted field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldConfidence {
    /// Unambiguous signal in the conversation.
    Clear,
    /// Something matched, but weakly or indirectly.
    Vague,
    /// No signal at all.
    Unknown,
}

impl FieldConfidence {
    /// True for Clear or Vague (some value was extracted).
    pub fn is_known(&self) -> bool {
        !matches!(self, FieldConfidence::Unknown)
    }
}

/// The fixed set of qualification fields extracted from a conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProspectField {
    ProblemType,
    Industry,
    JobFunction,
    DecisionRole,
    SolutionPreference,
    ImplementationCapacity,
    BusinessUrgency,
    BudgetStatus,
    BudgetAmount,
    TeamSize,
    TechCapability,
}

/// Value domain for a field: a fixed vocabulary or a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDomain {
    /// Value must be one of the listed strings.
    Enumerated(&'static [&'static str]),
    /// Value must parse as a non-negative integer.
    Numeric,
}

impl ProspectField {
    /// Every field, in canonical order.
    pub const ALL: &'static [ProspectField] = &[
        ProspectField::ProblemType,
        ProspectField::Industry,
        ProspectField::JobFunction,
        ProspectField::DecisionRole,
        ProspectField::SolutionPreference,
        ProspectField::ImplementationCapacity,
        ProspectField::BusinessUrgency,
        ProspectField::BudgetStatus,
        ProspectField::BudgetAmount,
        ProspectField::TeamSize,
        ProspectField::TechCapability,
    ];

    /// Stable wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            ProspectField::ProblemType => "problem_type",
            ProspectField::Industry => "industry",
            ProspectField::JobFunction => "job_function",
            ProspectField::DecisionRole => "decision_role",
            ProspectField::SolutionPreference => "solution_preference",
            ProspectField::ImplementationCapacity => "implementation_capacity",
            ProspectField::BusinessUrgency => "business_urgency",
            ProspectField::BudgetStatus => "budget_status",
            ProspectField::BudgetAmount => "budget_amount",
            ProspectField::TeamSize => "team_size",
            ProspectField::TechCapability => "tech_capability",
        }
    }

    /// The field's value domain.
    pub fn domain(&self) -> FieldDomain {
        match self {
            ProspectField::ProblemType => FieldDomain::Enumerated(&[
                "lead_generation",
                "customer_support",
                "process_automation",
                "data_management",
                "marketing",
                "sales_enablement",
                "billing",
                "other",
            ]),
            ProspectField::Industry => FieldDomain::Enumerated(&[
                "construction",
                "healthcare",
                "finance",
                "retail",
                "manufacturing",
                "technology",
                "logistics",
                "hospitality",
                "professional_services",
                "other",
            ]),
            ProspectField::JobFunction => FieldDomain::Enumerated(&[
                "c_level",
                "vp_level",
                "director_level",
                "manager_level",
                "individual_contributor",
            ]),
            ProspectField::DecisionRole => FieldDomain::Enumerated(&[
                "final_decision_maker",
                "influencer",
                "researcher",
                "no_authority",
            ]),
            ProspectField::SolutionPreference => FieldDomain::Enumerated(&[
                "off_the_shelf",
                "custom_build",
                "managed_service",
                "undecided",
            ]),
            ProspectField::ImplementationCapacity => FieldDomain::Enumerated(&[
                "internal_team",
                "needs_partner",
                "no_capacity",
            ]),
            ProspectField::BusinessUrgency => FieldDomain::Enumerated(&[
                "immediate",
                "this_quarter",
                "this_year",
                "exploring",
            ]),
            ProspectField::BudgetStatus => FieldDomain::Enumerated(&[
                "approved",
                "in_planning",
                "exploring",
                "none",
            ]),
            ProspectField::BudgetAmount => FieldDomain::Numeric,
            ProspectField::TeamSize => FieldDomain::Numeric,
            ProspectField::TechCapability => FieldDomain::Enumerated(&[
                "advanced",
                "moderate",
                "basic",
                "minimal",
            ]),
        }
    }

    /// Checks a candidate value against the field's domain.
    pub fn accepts(&self, value: &str) -> bool {
        match self.domain() {
            FieldDomain::Enumerated(values) => values.contains(&value),
            FieldDomain::Numeric => value.parse::<u64>().is_ok(),
        }
    }

    /// Parses a wire name back into a field.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for ProspectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
