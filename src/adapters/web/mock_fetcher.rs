//! Scripted site fetcher for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{FetchError, SiteContent, SiteFetcher};

/// Scripted outcome for one domain.
#[derive(Debug, Clone)]
enum ScriptedFetch {
    Body(String),
    Timeout { timeout_secs: u32 },
    Http { status: u16 },
    Unreachable(String),
}

/// Mock site fetcher keyed by domain.
#[derive(Debug, Clone, Default)]
pub struct MockSiteFetcher {
    scripts: Arc<Mutex<HashMap<String, ScriptedFetch>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSiteFetcher {
    /// Creates an empty mock; unscripted domains are unreachable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful fetch for a domain.
    pub fn with_site(self, domain: impl Into<String>, body: impl Into<String>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(domain.into(), ScriptedFetch::Body(body.into()));
        self
    }

    /// Scripts a timeout for a domain.
    pub fn with_timeout(self, domain: impl Into<String>, timeout_secs: u32) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(domain.into(), ScriptedFetch::Timeout { timeout_secs });
        self
    }

    /// Scripts an HTTP error status for a domain.
    pub fn with_status(self, domain: impl Into<String>, status: u16) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(domain.into(), ScriptedFetch::Http { status });
        self
    }

    /// Scripts a connection failure for a domain.
    pub fn with_unreachable(self, domain: impl Into<String>, message: impl Into<String>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(domain.into(), ScriptedFetch::Unreachable(message.into()));
        self
    }

    /// Sets simulated latency per fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Domains fetched so far, in order.
    pub fn fetched_domains(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of fetches made.
    pub fn fetch_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SiteFetcher for MockSiteFetcher {
    async fn fetch(&self, domain: &str) -> Result<SiteContent, FetchError> {
        self.calls.lock().unwrap().push(domain.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let script = self.scripts.lock().unwrap().get(domain).cloned();
        match script {
            Some(ScriptedFetch::Body(body)) => Ok(SiteContent {
                url: format!("https://{}/", domain),
                body,
            }),
            Some(ScriptedFetch::Timeout { timeout_secs }) => {
                Err(FetchError::Timeout { timeout_secs })
            }
            Some(ScriptedFetch::Http { status }) => Err(FetchError::Http { status }),
            Some(ScriptedFetch::Unreachable(message)) => Err(FetchError::Unreachable(message)),
            None => Err(FetchError::Unreachable(format!("no script for {}", domain))),
        }
    }
}
