//! Prospect registry record and derived company profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProspectId, SessionId, ValidationError};

/// A registered prospect and the identifiers validators need.
///
/// The surrounding intake product creates these rows; the vetting core only
/// reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: ProspectId,
    /// Session owning the prospect's intake conversation.
    pub session_id: SessionId,
    pub company_name: String,
    pub contact_name: String,
    /// Company website domain as claimed during intake.
    pub claimed_domain: Option<String>,
}

impl Prospect {
    /// Creates a prospect record, validating the required names.
    pub fn new(
        id: ProspectId,
        session_id: SessionId,
        company_name: impl Into<String>,
        contact_name: impl Into<String>,
        claimed_domain: Option<String>,
    ) -> Result<Self, ValidationError> {
        let company_name = company_name.into();
        let contact_name = contact_name.into();
        if company_name.trim().is_empty() {
            return Err(ValidationError::empty_field("company_name"));
        }
        if contact_name.trim().is_empty() {
            return Err(ValidationError::empty_field("contact_name"));
        }
        Ok(Self {
            id,
            session_id,
            company_name,
            contact_name,
            claimed_domain,
        })
    }
}

/// What we believe about the company, for budget benchmarking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Estimated or verified employee count.
    pub employee_count: Option<u32>,
    /// Extracted industry, drawn from the field's enumerated domain.
    pub industry: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prospect_new_validates_names() {
        let err = Prospect::new(
            ProspectId::new(),
            SessionId::new(),
            "  ",
            "Dana Smith",
            None,
        );
        assert!(err.is_err());

        let ok = Prospect::new(
            ProspectId::new(),
            SessionId::new(),
            "Acme Construction",
            "Dana Smith",
            Some("acme.example".into()),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn company_profile_defaults_to_unknown() {
        let profile = CompanyProfile::default();
        assert!(profile.employee_count.is_none());
        assert!(profile.industry.is_none());
    }
}
