/*!
 * Best-effort pictogram lookup.
 *
 * Keywords are resolved against an ARASAAC-style search API, one language
 * per run. A miss of any kind (network failure, non-success status, empty
 * result set) is a valid outcome, never an error: the item simply renders
 * without an image.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::document::{EasyReadDocument, PictogramRef};
use crate::errors::ProviderError;

/// Default pictogram search API endpoint.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.arasaac.org/api";

/// Default base URL for pictogram image assets.
pub const DEFAULT_STATIC_ENDPOINT: &str = "https://static.arasaac.org";

/// One result from the pictogram search API
#[derive(Debug, Clone, Deserialize)]
pub struct PictogramHit {
    /// Identifier used to build the display URL
    #[serde(rename = "_id")]
    pub id: u64,
}

/// Search seam for pictogram lookup
///
/// The HTTP client and the test mocks both implement this, so resolver
/// behavior (first-hit selection, miss handling) is testable offline.
#[async_trait]
pub trait PictogramSearch: Send + Sync {
    /// Search for pictograms matching a keyword in one language
    async fn search(
        &self,
        language: &str,
        keyword: &str,
    ) -> Result<Vec<PictogramHit>, ProviderError>;
}

/// HTTP client for the pictogram search API
#[derive(Debug)]
pub struct PictogramClient {
    /// HTTP client for API requests
    client: Client,
    /// Search API base URL
    endpoint: String,
}

impl PictogramClient {
    /// Create a client for the given search endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, 30)
    }

    /// Create a client with a request timeout in seconds.
    pub fn with_timeout(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the search URL with the keyword escaped as a path segment.
    fn search_url(&self, language: &str, keyword: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(self.endpoint.trim_end_matches('/'))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid search endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::RequestFailed("Search endpoint cannot be a base URL".to_string())
            })?
            .extend(["pictograms", language, "search", keyword]);
        Ok(url)
    }
}

#[async_trait]
impl PictogramSearch for PictogramClient {
    async fn search(
        &self,
        language: &str,
        keyword: &str,
    ) -> Result<Vec<PictogramHit>, ProviderError> {
        let url = self.search_url(language, keyword)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            ProviderError::RequestFailed(format!("Failed to send pictogram search: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: format!("Pictogram search failed with status {}", status),
            });
        }

        response.json::<Vec<PictogramHit>>().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse pictogram search response: {}", e))
        })
    }
}

/// Resolver mapping keywords to display references
pub struct PictogramResolver<S: PictogramSearch> {
    search: S,
    /// Language the search is scoped to
    language: String,
    /// Base URL for image assets
    static_endpoint: String,
}

impl<S: PictogramSearch> PictogramResolver<S> {
    /// Create a resolver over a search implementation.
    pub fn new(search: S, language: impl Into<String>) -> Self {
        Self {
            search,
            language: language.into(),
            static_endpoint: DEFAULT_STATIC_ENDPOINT.to_string(),
        }
    }

    /// Override the image asset base URL.
    pub fn static_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.static_endpoint = endpoint.into();
        self
    }

    /// Resolve one keyword to a display reference.
    ///
    /// Best-effort: any failure or an empty result set yields `None`.
    pub async fn resolve(&self, keyword: &str) -> Option<PictogramRef> {
        match self.search.search(&self.language, keyword).await {
            Ok(hits) => match hits.first() {
                Some(hit) => {
                    debug!("Pictogram for '{}': id {}", keyword, hit.id);
                    Some(PictogramRef::new(self.display_url(hit.id)))
                }
                None => {
                    debug!("No pictogram found for '{}'", keyword);
                    None
                }
            },
            Err(e) => {
                warn!("Pictogram lookup for '{}' failed: {}", keyword, e);
                None
            }
        }
    }

    /// Resolve a whole document, strictly sequentially, one ref slot per item.
    ///
    /// Only the primary keyword of each item is looked up; items without
    /// keywords are skipped. The returned vector is keyed positionally.
    pub async fn resolve_document(&self, document: &EasyReadDocument) -> Vec<Option<PictogramRef>> {
        let mut refs = Vec::with_capacity(document.len());
        for item in &document.items {
            let resolved = match item.primary_keyword() {
                Some(keyword) => self.resolve(keyword).await,
                None => None,
            };
            refs.push(resolved);
        }
        refs
    }

    /// Display URL for a pictogram id, with the no-download flag.
    fn display_url(&self, id: u64) -> String {
        format!(
            "{}/pictograms/{}/{}_300.png?download=false",
            self.static_endpoint.trim_end_matches('/'),
            id,
            id
        )
    }
}
