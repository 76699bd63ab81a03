//! Occupation directory: search and detail lookup against O*NET.
//!
//! `OnetApiClient` (authenticated web services) is the primary source and
//! `OnetSiteScraper` (public HTML pages) the fallback. `FallbackDirectory`
//! composes the two; `AppState` carries it as `Arc<dyn OccupationDirectory>`.

pub mod api;
pub mod handlers;
pub mod scraper;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::occupation::{Occupation, OccupationDetail, MAX_ITEMS};

pub use api::OnetApiClient;
pub use scraper::OnetSiteScraper;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("page markup not recognized: {0}")]
    MarkupChanged(String),
}

/// A source of occupation data. Implement this to add or swap a backend
/// without touching the handlers.
#[async_trait]
pub trait OccupationDirectory: Send + Sync {
    /// Up to `MAX_ITEMS` occupations matching a free-text keyword.
    async fn search(&self, keyword: &str) -> Result<Vec<Occupation>, DirectoryError>;

    /// Descriptive detail for one occupation code.
    async fn details(&self, code: &str) -> Result<OccupationDetail, DirectoryError>;
}

/// Tries the primary directory (when configured) and falls back to the
/// secondary on any failure. Exactly one fallback attempt, no retries.
pub struct FallbackDirectory {
    primary: Option<Arc<dyn OccupationDirectory>>,
    fallback: Arc<dyn OccupationDirectory>,
}

impl FallbackDirectory {
    pub fn new(
        primary: Option<Arc<dyn OccupationDirectory>>,
        fallback: Arc<dyn OccupationDirectory>,
    ) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl OccupationDirectory for FallbackDirectory {
    async fn search(&self, keyword: &str) -> Result<Vec<Occupation>, DirectoryError> {
        if let Some(primary) = &self.primary {
            match primary.search(keyword).await {
                Ok(occupations) => return Ok(normalize_results(occupations)),
                Err(e) => warn!("O*NET API search failed, falling back to scraping: {e}"),
            }
        }
        self.fallback.search(keyword).await.map(normalize_results)
    }

    async fn details(&self, code: &str) -> Result<OccupationDetail, DirectoryError> {
        if let Some(primary) = &self.primary {
            match primary.details(code).await {
                Ok(detail) => return Ok(detail),
                Err(e) => warn!("O*NET API details failed for {code}, falling back to scraping: {e}"),
            }
        }
        self.fallback.details(code).await
    }
}

/// Drops entries with an empty code or title, removes duplicate codes
/// (first occurrence wins) and caps the list at `MAX_ITEMS`.
pub fn normalize_results(occupations: Vec<Occupation>) -> Vec<Occupation> {
    let mut seen = HashSet::new();
    occupations
        .into_iter()
        .map(|o| Occupation {
            code: o.code.trim().to_string(),
            title: o.title.trim().to_string(),
        })
        .filter(|o| !o.code.is_empty() && !o.title.is_empty())
        .filter(|o| seen.insert(o.code.clone()))
        .take(MAX_ITEMS)
        .collect()
}

/// Builds the production directory from configuration: API first when
/// `ONET_API_KEY` is set, scraping otherwise.
pub fn build_directory(config: &Config) -> anyhow::Result<FallbackDirectory> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()?;

    let primary: Option<Arc<dyn OccupationDirectory>> = match &config.onet_api_key {
        Some(key) => {
            info!("O*NET API credential found; scraping is the fallback");
            Some(Arc::new(OnetApiClient::new(
                client.clone(),
                config.onet_api_base.clone(),
                key,
            )))
        }
        None => {
            info!("ONET_API_KEY not set; occupation data will be scraped from public pages");
            None
        }
    };

    let fallback = Arc::new(OnetSiteScraper::new(client, config.onet_site_base.clone()));

    Ok(FallbackDirectory::new(primary, fallback))
}
