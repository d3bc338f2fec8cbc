//! HTTP client for a professional-directory JSON API.
//!
//! Expects a service exposing `GET /companies?name=..&domain=..` and
//! `GET /people?name=..&company=..`, each returning a JSON array of matches.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{CompanyListing, DirectoryError, IdentityDirectory, PersonListing};

/// Configuration for the HTTP directory client.
#[derive(Debug, Clone)]
pub struct HttpIdentityDirectoryConfig {
    /// API key for the directory service.
    api_key: Secret<String>,
    /// Base URL of the directory service.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpIdentityDirectoryConfig {
    /// Creates a configuration with the given key and base URL.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: base_url.into(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Directory client over HTTP.
pub struct HttpIdentityDirectory {
    config: HttpIdentityDirectoryConfig,
    client: Client,
}

impl HttpIdentityDirectory {
    /// Creates a client with the given configuration.
    pub fn new(config: HttpIdentityDirectoryConfig) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;

        Ok(Self { config, client })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DirectoryError> {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(self.config.api_key())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DirectoryError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else {
                    DirectoryError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "Directory returned non-success");
            return Err(DirectoryError::Unavailable(format!("status {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CompanyRow {
    name: String,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    employee_count: Option<u32>,
    #[serde(default)]
    industry: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PersonRow {
    name: String,
    #[serde(default)]
    title: Option<String>,
}

#[async_trait]
impl IdentityDirectory for HttpIdentityDirectory {
    async fn find_company(
        &self,
        name: &str,
        domain: Option<&str>,
    ) -> Result<Option<CompanyListing>, DirectoryError> {
        let mut query = vec![("name", name)];
        if let Some(domain) = domain {
            query.push(("domain", domain));
        }

        let rows: Vec<CompanyRow> = self.get_json("/companies", &query).await?;
        Ok(rows.into_iter().next().map(|row| CompanyListing {
            name: row.name,
            domain: row.domain,
            employee_count: row.employee_count,
            industry: row.industry,
        }))
    }

    async fn find_person(
        &self,
        name: &str,
        company: &str,
    ) -> Result<Option<PersonListing>, DirectoryError> {
        let query = [("name", name), ("company", company)];

        let rows: Vec<PersonRow> = self.get_json("/people", &query).await?;
        Ok(rows.into_iter().next().map(|row| PersonListing {
            name: row.name,
            title: row.title.unwrap_or_default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_holds_timeout() {
        let config = HttpIdentityDirectoryConfig::new("key", "https://directory.example")
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.base_url, "https://directory.example");
    }

    #[test]
    fn company_row_parses_sparse_json() {
        let row: CompanyRow =
            serde_json::from_str(r#"{"name": "Acme Construction"}"#).unwrap();
        assert_eq!(row.name, "Acme Construction");
        assert!(row.domain.is_none());
        assert!(row.employee_count.is_none());
    }

    #[test]
    fn person_row_parses_missing_title() {
        let row: PersonRow = serde_json::from_str(r#"{"name": "Dana Smith"}"#).unwrap();
        assert_eq!(row.name, "Dana Smith");
        assert!(row.title.is_none());
    }
}
