//! TMDB (The Movie Database) catalog provider.

use async_trait::async_trait;
use medialist_core::config::SearchConfig;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::CatalogSearchProvider;
use crate::errors::MediaSearchError;
use crate::types::{MediaType, SearchResult};

/// Request descriptor for a catalog call.
///
/// Built before anything is sent so callers and tests can inspect exactly
/// what would go over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    url: Url,
}

impl SearchRequest {
    /// Full request URL including query parameters.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Value of a query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// URL path without the query string, safe to log.
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

/// Catalog provider backed by the TMDB v3 API.
#[derive(Debug, Clone)]
pub struct TmdbProvider {
    client: reqwest::Client,
    api_base_url: String,
    api_key: String,
    language: String,
}

impl TmdbProvider {
    /// Creates a provider from search configuration.
    ///
    /// # Errors
    /// - `MediaSearchError::ProviderError` - No API key configured or HTTP client setup failed
    pub fn new(config: &SearchConfig) -> Result<Self, MediaSearchError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| MediaSearchError::ProviderError {
                reason: "TMDB API key not configured (set MEDIALIST_TMDB_API_KEY)".to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("medialist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MediaSearchError::ProviderError {
                reason: format!("HTTP client setup failed: {e}"),
            })?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
            language: config.language.clone(),
        })
    }

    /// Builds the multi-type search request for `query`.
    ///
    /// # Errors
    /// - `MediaSearchError::ProviderError` - Configured base URL is not a valid URL
    pub fn build_request(&self, query: &str) -> Result<SearchRequest, MediaSearchError> {
        self.request(
            "/search/multi",
            &[
                ("query", query),
                ("include_adult", "false"),
                ("page", "1"),
            ],
        )
    }

    fn detail_request(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<SearchRequest, MediaSearchError> {
        self.request(&format!("/{}/{id}", media_type.catalog_tag()), &[])
    }

    fn request(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<SearchRequest, MediaSearchError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        params.extend_from_slice(extra_params);

        let url = Url::parse_with_params(&format!("{}{path}", self.api_base_url), &params)
            .map_err(|e| MediaSearchError::ProviderError {
                reason: format!("invalid catalog URL: {e}"),
            })?;

        Ok(SearchRequest { url })
    }

    /// Sends `request`. `Ok(None)` means the catalog answered 404.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: &SearchRequest,
    ) -> Result<Option<T>, MediaSearchError> {
        tracing::debug!(path = request.path(), "Catalog request");

        let response = self
            .client
            .get(request.url().clone())
            .send()
            .await
            .map_err(|e| MediaSearchError::NetworkError {
                reason: format!("HTTP request failed: {}", e.without_url()),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response
                .json::<TmdbErrorBody>()
                .await
                .ok()
                .and_then(|body| body.status_message)
                .unwrap_or_else(|| "no details".to_string());
            return Err(MediaSearchError::ProviderError {
                reason: format!("TMDB returned {status}: {message}"),
            });
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| MediaSearchError::ParseError {
                reason: format!("JSON parsing failed: {}", e.without_url()),
            })
    }
}

#[async_trait]
impl CatalogSearchProvider for TmdbProvider {
    async fn search_multi(&self, query: &str) -> Result<Vec<SearchResult>, MediaSearchError> {
        let request = self.build_request(query)?;
        let page: TmdbPage = self
            .fetch(&request)
            .await?
            .ok_or_else(|| MediaSearchError::ProviderError {
                reason: "search endpoint not found".to_string(),
            })?;

        Ok(page
            .results
            .into_iter()
            .map(|item| item.into_result(None))
            .collect())
    }

    async fn lookup(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<SearchResult, MediaSearchError> {
        let request = self.detail_request(media_type, id)?;
        let item: TmdbItem = self
            .fetch(&request)
            .await?
            .ok_or(MediaSearchError::NotFound { media_type, id })?;

        Ok(item.into_result(Some(media_type)))
    }
}

#[derive(Debug, Deserialize)]
struct TmdbPage {
    results: Vec<TmdbItem>,
}

#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: Option<String>,
}

/// Raw catalog entry. Movies carry `title`/`release_date`, series carry
/// `name`/`first_air_date`.
#[derive(Debug, Deserialize)]
struct TmdbItem {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    media_type: Option<String>,
}

impl TmdbItem {
    fn into_result(self, known_type: Option<MediaType>) -> SearchResult {
        let media_type =
            known_type.unwrap_or_else(|| MediaType::from_tag(self.media_type.as_deref()));

        SearchResult {
            id: self.id,
            title: self.title.or(self.name).unwrap_or_default(),
            poster_path: non_empty(self.poster_path),
            vote_average: self.vote_average.unwrap_or_default(),
            release_date: non_empty(self.release_date),
            first_air_date: non_empty(self.first_air_date),
            media_type,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TmdbProvider {
        let config = SearchConfig {
            api_key: Some("key123".to_string()),
            ..Default::default()
        };
        TmdbProvider::new(&config).unwrap()
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let result = TmdbProvider::new(&SearchConfig::default());
        assert!(matches!(result, Err(MediaSearchError::ProviderError { .. })));
    }

    #[test]
    fn test_build_request() {
        let request = provider().build_request("the office & co").unwrap();

        assert_eq!(request.path(), "/3/search/multi");
        assert_eq!(request.query_param("query").as_deref(), Some("the office & co"));
        assert_eq!(request.query_param("api_key").as_deref(), Some("key123"));
        assert_eq!(request.query_param("language").as_deref(), Some("en-US"));
        assert_eq!(request.query_param("include_adult").as_deref(), Some("false"));
        assert_eq!(request.url().host_str(), Some("api.themoviedb.org"));
    }

    #[test]
    fn test_detail_request_uses_catalog_tag() {
        let request = provider().detail_request(MediaType::Series, 1396).unwrap();
        assert_eq!(request.path(), "/3/tv/1396");
    }

    #[test]
    fn test_item_normalization() {
        let page: TmdbPage = serde_json::from_str(
            r#"{"page":1,"results":[
                {"id":1396,"name":"Breaking Bad","media_type":"tv","poster_path":"/bb.jpg",
                 "vote_average":8.9,"first_air_date":"2008-01-20"},
                {"id":603,"title":"The Matrix","media_type":"movie","poster_path":null,
                 "vote_average":8.2,"release_date":""},
                {"id":287,"name":"Brad Pitt","media_type":"person","profile_path":"/bp.jpg"}
            ]}"#,
        )
        .unwrap();

        let results: Vec<SearchResult> = page
            .results
            .into_iter()
            .map(|item| item.into_result(None))
            .collect();

        assert_eq!(results[0].title, "Breaking Bad");
        assert_eq!(results[0].media_type, MediaType::Series);
        assert_eq!(results[0].display_date(), Some("2008-01-20"));

        assert_eq!(results[1].media_type, MediaType::Movie);
        assert_eq!(results[1].release_date, None);
        assert!(!results[1].has_poster());

        assert_eq!(results[2].media_type, MediaType::Movie);
        assert_eq!(results[2].vote_average, 0.0);
        assert!(!results[2].has_poster());
    }
}
