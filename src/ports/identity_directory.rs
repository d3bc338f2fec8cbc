//! Professional-identity lookup port, used only by the identity validator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for a professional-network data source.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Looks up a company by name, optionally disambiguated by domain.
    async fn find_company(
        &self,
        name: &str,
        domain: Option<&str>,
    ) -> Result<Option<CompanyListing>, DirectoryError>;

    /// Looks up a person by name within a company.
    async fn find_person(
        &self,
        name: &str,
        company: &str,
    ) -> Result<Option<PersonListing>, DirectoryError>;
}

/// A company as listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyListing {
    pub name: String,
    pub domain: Option<String>,
    pub employee_count: Option<u32>,
    pub industry: Option<String>,
}

/// A person as listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonListing {
    pub name: String,
    /// Stated role title, the input to seniority classification.
    pub title: String,
}

/// Directory lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Request timed out.
    #[error("lookup timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// The directory service returned an error.
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    /// Failed to parse the directory response.
    #[error("parse error: {0}")]
    Parse(String),
}
