//! Website intelligence analyzer.
//!
//! Normalizes the domain, serves fresh cache entries without fetching,
//! otherwise fetches the site, summarizes it through the completion client,
//! scores legitimacy with the fixed rubric, and writes the cache. Failures
//! become `ValidatorOutcome::Failed`; they never poison the cache and never
//! propagate as errors.

use std::sync::Arc;

use crate::domain::conversation::TurnRole;
use crate::domain::foundation::Timestamp;
use crate::domain::vetting::{FailureReason, ValidatorDetails, ValidatorOutcome, WebsiteIntel};
use crate::ports::{
    CompletionClient, CompletionError, CompletionRequest, DomainCache, DomainCacheEntry,
    FetchError, SiteContent, SiteFetcher,
};

/// Strips scheme, `www.`, path, and trailing slash; lower-cases.
pub fn normalize_domain(raw: &str) -> String {
    let mut domain = raw.trim().to_lowercase();
    for scheme in ["https://", "http://"] {
        if let Some(rest) = domain.strip_prefix(scheme) {
            domain = rest.to_string();
            break;
        }
    }
    if let Some(rest) = domain.strip_prefix("www.") {
        domain = rest.to_string();
    }
    if let Some(slash) = domain.find('/') {
        domain.truncate(slash);
    }
    domain
}

/// Scores how legitimate a company's web presence looks.
#[derive(Clone)]
pub struct WebsiteIntelligenceAnalyzer {
    fetcher: Arc<dyn SiteFetcher>,
    completion: Arc<dyn CompletionClient>,
    cache: Arc<dyn DomainCache>,
    cache_ttl_days: i64,
}

impl WebsiteIntelligenceAnalyzer {
    /// Creates an analyzer with the default 30-day cache TTL.
    pub fn new(
        fetcher: Arc<dyn SiteFetcher>,
        completion: Arc<dyn CompletionClient>,
        cache: Arc<dyn DomainCache>,
    ) -> Self {
        Self {
            fetcher,
            completion,
            cache,
            cache_ttl_days: 30,
        }
    }

    /// Sets the cache TTL in days.
    pub fn with_cache_ttl_days(mut self, days: i64) -> Self {
        self.cache_ttl_days = days;
        self
    }

    /// Analyzes a domain, consulting the cache first.
    pub async fn analyze(&self, raw_domain: &str) -> ValidatorOutcome {
        let domain = normalize_domain(raw_domain);
        if domain.is_empty() {
            return ValidatorOutcome::failed(FailureReason::MissingPrecondition(
                "no_domain".to_string(),
            ));
        }

        let now = Timestamp::now();
        match self.cache.get(&domain).await {
            Ok(Some(entry)) if entry.is_fresh(self.cache_ttl_days, &now) => {
                tracing::debug!(%domain, "Domain cache hit");
                return ValidatorOutcome::ok(
                    entry.legitimacy,
                    ValidatorDetails::Website(entry.intel),
                );
            }
            Ok(Some(_)) => tracing::debug!(%domain, "Domain cache entry stale"),
            Ok(None) => tracing::debug!(%domain, "Domain cache miss"),
            // A broken cache read degrades to a fresh fetch.
            Err(e) => tracing::warn!(%domain, error = %e, "Domain cache read failed"),
        }

        let content = match self.fetcher.fetch(&domain).await {
            Ok(content) => content,
            Err(FetchError::Timeout { .. }) => {
                tracing::warn!(%domain, "Site fetch timed out");
                return ValidatorOutcome::failed(FailureReason::Timeout);
            }
            Err(e) => {
                tracing::warn!(%domain, error = %e, "Site fetch failed");
                return ValidatorOutcome::failed(FailureReason::Upstream(e.to_string()));
            }
        };

        let intel = match self.summarize(&domain, &content).await {
            Ok(intel) => intel,
            Err(CompletionError::Timeout { .. }) => {
                return ValidatorOutcome::failed(FailureReason::Timeout);
            }
            Err(e) => {
                tracing::warn!(%domain, error = %e, "Site summarization failed");
                return ValidatorOutcome::failed(FailureReason::Upstream(e.to_string()));
            }
        };

        let legitimacy = intel.legitimacy_score();

        // Only successful analyses reach the cache; a failure above left any
        // prior valid entry usable and an empty cache empty.
        let entry = DomainCacheEntry::new(domain.clone(), intel, legitimacy, now);
        if let Err(e) = self.cache.upsert(entry).await {
            tracing::warn!(%domain, error = %e, "Domain cache write failed");
        }

        tracing::debug!(%domain, %legitimacy, "Analyzed domain");
        ValidatorOutcome::ok(legitimacy, ValidatorDetails::Website(intel))
    }

    /// Derives the structured intelligence summary from site content.
    async fn summarize(
        &self,
        domain: &str,
        content: &SiteContent,
    ) -> Result<WebsiteIntel, CompletionError> {
        let request = CompletionRequest::new()
            .with_system_prompt(
                "You inspect company websites. Reply with a single JSON object:\n\
                 {\"has_company_description\": bool, \"has_contact_info\": bool,\n\
                  \"has_team_page\": bool, \"has_product_info\": bool,\n\
                  \"has_customer_evidence\": bool, \"appears_parked\": bool}",
            )
            .with_turn(
                TurnRole::User,
                format!("Domain: {}\n\nContent:\n{}", domain, content.body),
            )
            .with_temperature(0.0)
            .with_max_tokens(300);

        let response = self.completion.complete(request).await?;
        parse_intel(&response.content)
            .ok_or_else(|| CompletionError::parse("summary reply had no JSON object"))
    }
}

/// Parses the summarization reply; absent flags default to false.
fn parse_intel(content: &str) -> Option<WebsiteIntel> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }

    #[derive(serde::Deserialize, Default)]
    #[serde(default)]
    struct Flags {
        has_company_description: bool,
        has_contact_info: bool,
        has_team_page: bool,
        has_product_info: bool,
        has_customer_evidence: bool,
        appears_parked: bool,
    }

    let flags: Flags = serde_json::from_str(&content[start..=end]).ok()?;
    Some(WebsiteIntel {
        has_company_description: flags.has_company_description,
        has_contact_info: flags.has_contact_info,
        has_team_page: flags.has_team_page,
        has_product_info: flags.has_product_info,
        has_customer_evidence: flags.has_customer_evidence,
        appears_parked: flags.appears_parked,
    })
}
