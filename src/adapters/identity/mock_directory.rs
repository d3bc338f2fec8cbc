//! Seedable in-memory directory for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{CompanyListing, DirectoryError, IdentityDirectory, PersonListing};

/// Mock directory seeded with companies and people.
///
/// Lookups match case-insensitively on names. Can also be switched into a
/// failing mode for resilience tests.
#[derive(Debug, Clone, Default)]
pub struct MockIdentityDirectory {
    companies: Arc<Mutex<HashMap<String, CompanyListing>>>,
    /// Keyed by (person name, company name), both lower-cased.
    people: Arc<Mutex<HashMap<(String, String), PersonListing>>>,
    fail_with_timeout: Arc<Mutex<Option<u32>>>,
    delay: Duration,
}

impl MockIdentityDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a company listing.
    pub fn with_company(self, listing: CompanyListing) -> Self {
        self.companies
            .lock()
            .unwrap()
            .insert(listing.name.to_lowercase(), listing);
        self
    }

    /// Seeds a person at a company.
    pub fn with_person(self, company: impl Into<String>, listing: PersonListing) -> Self {
        let key = (listing.name.to_lowercase(), company.into().to_lowercase());
        self.people.lock().unwrap().insert(key, listing);
        self
    }

    /// Makes every lookup fail with a timeout.
    pub fn with_forced_timeout(self, timeout_secs: u32) -> Self {
        *self.fail_with_timeout.lock().unwrap() = Some(timeout_secs);
        self
    }

    /// Sets simulated latency per lookup.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn maybe_fail(&self) -> Result<(), DirectoryError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        if let Some(timeout_secs) = *self.fail_with_timeout.lock().unwrap() {
            return Err(DirectoryError::Timeout { timeout_secs });
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityDirectory for MockIdentityDirectory {
    async fn find_company(
        &self,
        name: &str,
        _domain: Option<&str>,
    ) -> Result<Option<CompanyListing>, DirectoryError> {
        self.maybe_fail().await?;
        Ok(self.companies.lock().unwrap().get(&name.to_lowercase()).cloned())
    }

    async fn find_person(
        &self,
        name: &str,
        company: &str,
    ) -> Result<Option<PersonListing>, DirectoryError> {
        self.maybe_fail().await?;
        let key = (name.to_lowercase(), company.to_lowercase());
        Ok(self.people.lock().unwrap().get(&key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> CompanyListing {
        CompanyListing {
            name: "Acme Construction".into(),
            domain: Some("acme.example".into()),
            employee_count: Some(200),
            industry: Some("construction".into()),
        }
    }

    #[tokio::test]
    async fn finds_seeded_company_case_insensitively() {
        let directory = MockIdentityDirectory::new().with_company(acme());

        let found = directory
            .find_company("acme construction", None)
            .await
            .unwrap();
        assert_eq!(found.unwrap().employee_count, Some(200));

        let missing = directory.find_company("Globex", None).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn finds_seeded_person_scoped_to_company() {
        let directory = MockIdentityDirectory::new().with_person(
            "Acme Construction",
            PersonListing {
                name: "Dana Smith".into(),
                title: "CEO".into(),
            },
        );

        let found = directory
            .find_person("dana smith", "acme construction")
            .await
            .unwrap();
        assert_eq!(found.unwrap().title, "CEO");

        let elsewhere = directory
            .find_person("dana smith", "globex")
            .await
            .unwrap();
        assert!(elsewhere.is_none());
    }

    #[tokio::test]
    async fn forced_timeout_fails_every_lookup() {
        let directory = MockIdentityDirectory::new()
            .with_company(acme())
            .with_forced_timeout(15);

        let err = directory.find_company("Acme Construction", None).await;
        assert!(matches!(err, Err(DirectoryError::Timeout { timeout_secs: 15 })));
    }
}
