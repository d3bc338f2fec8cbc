//! Qualification-field extraction: field catalog, declarative rule table,
//! extraction results, and completeness assessment.

mod completeness;
mod extraction;
mod field;
mod rules;

pub use completeness::{CompletenessAssessor, CompletenessResult, REQUIRED_FIELDS};
pub use extraction::{ExtractedValue, FieldExtraction};
pub use field::{FieldConfidence, FieldDomain, ProspectField};
pub use rules::{apply_rules, parse_budget_amount, parse_head_count, ExtractionRule, RULES};
