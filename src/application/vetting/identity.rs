//! Professional-identity validator.
//!
//! Independent of the website analyzer: different data source, no shared
//! cache, never blocks on it.

use std::sync::Arc;

use crate::domain::foundation::Percentage;
use crate::domain::vetting::{
    FailureReason, IdentityCheck, Seniority, ValidatorDetails, ValidatorOutcome,
};
use crate::ports::{DirectoryError, IdentityDirectory};

/// Signal score when the company resolves but the contact does not.
const COMPANY_ONLY_SCORE: u8 = 25;

/// Verifies the company and contact against a professional directory.
#[derive(Clone)]
pub struct IdentityValidator {
    directory: Arc<dyn IdentityDirectory>,
}

impl IdentityValidator {
    /// Creates a validator over the given directory.
    pub fn new(directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { directory }
    }

    /// Validates a prospect's company and contact.
    pub async fn validate(
        &self,
        company_name: &str,
        contact_name: &str,
        domain: Option<&str>,
    ) -> ValidatorOutcome {
        if company_name.trim().is_empty() {
            return ValidatorOutcome::failed(FailureReason::MissingPrecondition(
                "no_company_name".to_string(),
            ));
        }

        let company = match self.directory.find_company(company_name, domain).await {
            Ok(company) => company,
            Err(e) => return directory_failure(e),
        };

        let Some(company) = company else {
            tracing::debug!(company_name, "Company not found in directory");
            return ValidatorOutcome::ok(
                Percentage::ZERO,
                ValidatorDetails::Identity(IdentityCheck {
                    company_found: false,
                    person_found: false,
                    authority_score: Percentage::ZERO,
                }),
            );
        };

        let person = match self.directory.find_person(contact_name, &company.name).await {
            Ok(person) => person,
            Err(e) => return directory_failure(e),
        };

        match person {
            Some(person) => {
                let authority = Seniority::from_title(&person.title).authority_score();
                tracing::debug!(
                    company_name,
                    contact_name,
                    %authority,
                    "Verified company and contact"
                );
                ValidatorOutcome::ok(
                    authority,
                    ValidatorDetails::Identity(IdentityCheck {
                        company_found: true,
                        person_found: true,
                        authority_score: authority,
                    }),
                )
            }
            None => ValidatorOutcome::ok(
                Percentage::new(COMPANY_ONLY_SCORE),
                ValidatorDetails::Identity(IdentityCheck {
                    company_found: true,
                    person_found: false,
                    authority_score: Percentage::ZERO,
                }),
            ),
        }
    }
}

fn directory_failure(error: DirectoryError) -> ValidatorOutcome {
    tracing::warn!(error = %error, "Identity directory lookup failed");
    match error {
        DirectoryError::Timeout { .. } => ValidatorOutcome::failed(FailureReason::Timeout),
        other => ValidatorOutcome::failed(FailureReason::Upstream(other.to_string())),
    }
}
