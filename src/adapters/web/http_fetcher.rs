//! HTTP site fetcher over reqwest.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::ports::{FetchError, SiteContent, SiteFetcher};

/// Configuration for the HTTP site fetcher.
#[derive(Debug, Clone)]
pub struct HttpSiteFetcherConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum body bytes kept; the rest is truncated.
    pub max_body_bytes: usize,
    /// User agent presented to sites.
    pub user_agent: String,
}

impl Default for HttpSiteFetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_body_bytes: 256 * 1024,
            user_agent: "lead-radar/0.1".to_string(),
        }
    }
}

/// Site fetcher that issues a GET against `https://<domain>/`.
pub struct HttpSiteFetcher {
    config: HttpSiteFetcherConfig,
    client: Client,
}

impl HttpSiteFetcher {
    /// Creates a fetcher with the given configuration.
    pub fn new(config: HttpSiteFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Creates a fetcher with defaults.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(HttpSiteFetcherConfig::default())
    }
}

#[async_trait]
impl SiteFetcher for HttpSiteFetcher {
    async fn fetch(&self, domain: &str) -> Result<SiteContent, FetchError> {
        if domain.trim().is_empty() || domain.contains('/') || !domain.contains('.') {
            return Err(FetchError::InvalidDomain(domain.to_string()));
        }

        let url = format!("https://{}/", domain);
        tracing::debug!(domain, "Fetching site content");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    timeout_secs: self.config.timeout.as_secs() as u32,
                }
            } else {
                FetchError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(domain, status = status.as_u16(), "Site returned non-success");
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let mut body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    timeout_secs: self.config.timeout.as_secs() as u32,
                }
            } else {
                FetchError::Unreachable(e.to_string())
            }
        })?;

        if body.len() > self.config.max_body_bytes {
            let mut cut = self.config.max_body_bytes;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }

        Ok(SiteContent {
            url: final_url,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_invalid_domains_without_network() {
        let fetcher = HttpSiteFetcher::with_defaults().unwrap();

        for bad in ["", "   ", "no-dot", "acme.example/path"] {
            let err = fetcher.fetch(bad).await.unwrap_err();
            assert!(matches!(err, FetchError::InvalidDomain(_)), "{:?}", bad);
        }
    }

    #[test]
    fn default_config_bounds_requests() {
        let config = HttpSiteFetcherConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.max_body_bytes > 0);
    }
}
