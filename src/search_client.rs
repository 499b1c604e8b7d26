//! Google Custom Search JSON API client.
//!
//! One call is one `GET <endpoint>?key=..&cx=..&q=..`. There is no retry and
//! no timeout beyond reqwest's defaults.

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::data_models::{SearchInformation, SearchOutcome, SearchResult};

pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to perform search";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The API answered with a non-2xx status.
    #[error("API Error: {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// Network failure, bad endpoint or an undecodable body.
    #[error("{0}")]
    Transport(String),
}

impl SearchError {
    /// Joins the whole `source()` chain, outermost first, so the cause
    /// (refused connection, serde error) survives reqwest's generic label.
    fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut chain: Vec<String> = Vec::new();
        let mut current = Some(err);
        while let Some(e) = current {
            let text = e.to_string();
            if !text.trim().is_empty() && chain.last() != Some(&text) {
                chain.push(text);
            }
            current = e.source();
        }
        Self::from_message(chain.join(": "))
    }

    fn from_message(message: String) -> Self {
        if message.trim().is_empty() {
            SearchError::Transport(FALLBACK_ERROR_MESSAGE.to_string())
        } else {
            SearchError::Transport(message)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CseResponse {
    items: Option<Vec<SearchResult>>,
    search_information: Option<SearchInformation>,
}

/// A successfully decoded response. `items` may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub items: Vec<SearchResult>,
    pub information: Option<SearchInformation>,
}

#[derive(Debug, Clone)]
pub struct CseClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    search_engine_id: String,
}

impl CseClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        search_engine_id: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            search_engine_id: search_engine_id.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.endpoint.clone(),
            config.api_key.clone(),
            config.search_engine_id.clone(),
        )
    }

    pub fn request_url(&self, query: &str) -> Result<Url, SearchError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("key", self.api_key.as_str()),
                ("cx", self.search_engine_id.as_str()),
                ("q", query),
            ],
        )
        .map_err(|e| SearchError::transport(&e))
    }

    pub async fn search(&self, query: &str) -> Result<SearchPage, SearchError> {
        let url = self.request_url(query)?;
        tracing::debug!(endpoint = %self.endpoint, query, "sending search request");

        // without_url() keeps the api key out of error messages
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::transport(&e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body: CseResponse = response
            .json()
            .await
            .map_err(|e| SearchError::transport(&e.without_url()))?;

        if let Some(info) = &body.search_information {
            tracing::info!(
                total_results = %info.total_results,
                search_time = info.search_time,
                "search completed"
            );
        }

        Ok(SearchPage {
            items: body.items.unwrap_or_default(),
            information: body.search_information,
        })
    }
}

/// Maps a finished request onto the outcome shown to the user.
pub fn classify(result: Result<SearchPage, SearchError>) -> SearchOutcome {
    match result {
        Ok(page) if page.items.is_empty() => SearchOutcome::Empty,
        Ok(page) => SearchOutcome::Success(page.items),
        Err(e) => SearchOutcome::Failure(e.to_string()),
    }
}

#[test]
fn test_classify() {
    let item = SearchResult {
        title: "t".into(),
        link: "https://a.example/".into(),
        snippet: "s".into(),
        display_link: "a.example".into(),
    };
    assert_eq!(
        classify(Ok(SearchPage { items: vec![item.clone()], information: None })),
        SearchOutcome::Success(vec![item])
    );
    assert_eq!(
        classify(Ok(SearchPage { items: vec![], information: None })),
        SearchOutcome::Empty
    );
    assert_eq!(
        classify(Err(SearchError::Http { status: 403, status_text: "Forbidden".into() })),
        SearchOutcome::Failure("API Error: 403 Forbidden".into())
    );
    assert_eq!(
        classify(Err(SearchError::from_message(String::new()))),
        SearchOutcome::Failure(FALLBACK_ERROR_MESSAGE.into())
    );
}

#[test]
fn test_request_url_encodes_query() {
    let client = CseClient::new("https://www.googleapis.com/customsearch/v1", "k", "c");
    let url = client.request_url("GTA V +(exe|iso) \"x\"").unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("key".to_string(), "k".to_string()),
            ("cx".to_string(), "c".to_string()),
            ("q".to_string(), "GTA V +(exe|iso) \"x\"".to_string()),
        ]
    );
    assert_eq!(url.path(), "/customsearch/v1");
}

#[test]
fn test_bad_endpoint_is_transport_error() {
    let client = CseClient::new("not a url", "k", "c");
    assert!(matches!(client.request_url("q"), Err(SearchError::Transport(_))));
}

#[test]
fn test_transport_message_keeps_source_chain() {
    #[derive(Debug, Error)]
    #[error("Connection refused")]
    struct Refused;

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct SendFailed(#[source] Refused);

    assert_eq!(
        SearchError::transport(&SendFailed(Refused)),
        SearchError::Transport("error sending request: Connection refused".to_string())
    );
}
