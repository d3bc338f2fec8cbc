//! Site-fetch utility port, used only by the website analyzer.

use async_trait::async_trait;

/// Port for fetching a company site's content.
#[async_trait]
pub trait SiteFetcher: Send + Sync {
    /// Fetches content for a normalized domain (no scheme, no `www.`).
    ///
    /// Implementations must bound the request with a timeout and cap the
    /// returned body size.
    async fn fetch(&self, domain: &str) -> Result<SiteContent, FetchError>;
}

/// Fetched site content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContent {
    /// URL that was ultimately fetched (after scheme selection/redirects).
    pub url: String,
    /// Response body, truncated to the fetcher's cap.
    pub body: String,
}

/// Site fetch errors.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Request timed out.
    #[error("fetch timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// DNS or connection failure.
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// Site responded with a non-success status.
    #[error("http status {status}")]
    Http { status: u16 },

    /// The domain string is not something we can fetch.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_display_readably() {
        assert_eq!(
            FetchError::Timeout { timeout_secs: 10 }.to_string(),
            "fetch timed out after 10s"
        );
        assert_eq!(FetchError::Http { status: 404 }.to_string(), "http status 404");
        assert_eq!(
            FetchError::InvalidDomain("   ".into()).to_string(),
            "invalid domain:    "
        );
    }

    #[test]
    fn site_fetcher_is_object_safe() {
        fn _accepts_dyn(_fetcher: &dyn SiteFetcher) {}
    }
}
