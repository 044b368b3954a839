use std::time::Duration;

use async_trait::async_trait;
use html_escape::decode_html_entities;
use serde::Deserialize;
use url::Url;

use crate::domain::profile::SearchResult;
use crate::search::{
    MAX_PAGE_SIZE, ProviderError, ProviderResult, SearchProvider, build_reqwest_client,
};

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Credentials and transport settings for the Custom Search JSON API.
#[derive(Clone, Debug)]
pub struct GoogleSearchConfig {
    pub api_key: String,
    pub cse_id: String,
    pub endpoint: String,
    pub timeout: Duration,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

/// [`SearchProvider`] backed by Google Programmable Search.
pub struct GoogleCustomSearch {
    config: GoogleSearchConfig,
    client: reqwest::Client,
}

impl GoogleCustomSearch {
    pub fn new(config: GoogleSearchConfig) -> ProviderResult<Self> {
        Url::parse(&config.endpoint).map_err(|e| ProviderError::Build(e.to_string()))?;
        Ok(Self {
            client: build_reqwest_client(config.timeout)?,
            config,
        })
    }

    fn request_url(&self, query: &str, max_results: usize) -> ProviderResult<Url> {
        let num = max_results.clamp(1, MAX_PAGE_SIZE).to_string();
        Url::parse_with_params(
            &self.config.endpoint,
            [
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.cse_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ],
        )
        .map_err(|e| ProviderError::Build(e.to_string()))
    }

    async fn fetch(&self, query: &str, max_results: usize) -> ProviderResult<Vec<SearchResult>> {
        let url = self.request_url(query, max_results)?;
        let res = self.client.get(url).send().await?;
        if !res.status().is_success() {
            return Err(ProviderError::Status(res.status()));
        }
        let body = res.text().await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        Ok(response
            .items
            .into_iter()
            .take(max_results)
            .map(clean_result)
            .collect())
    }
}

/// Decodes HTML entities the API leaves in titles and snippets.
fn clean_result(result: SearchResult) -> SearchResult {
    SearchResult {
        link: result.link.trim().to_string(),
        title: decode_html_entities(&result.title).trim().to_string(),
        snippet: decode_html_entities(&result.snippet)
            .replace('\n', " ")
            .trim()
            .to_string(),
    }
}

#[async_trait]
impl SearchProvider for GoogleCustomSearch {
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        match self.fetch(query, max_results).await {
            Ok(results) => {
                log::info!("Query {query:?} returned {} results", results.len());
                results
            }
            Err(e) => {
                log::error!("Search failed for {query:?}: {e}");
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> GoogleSearchConfig {
        GoogleSearchConfig {
            api_key: "key".to_string(),
            cse_id: "cse".to_string(),
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn request_url_encodes_query_and_caps_page_size() {
        let provider = GoogleCustomSearch::new(config(DEFAULT_ENDPOINT)).expect("provider");

        let url = provider
            .request_url("site:linkedin.com/in/ \"Acme\" Hong Kong", 25)
            .expect("url");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let param = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(param("q"), Some("site:linkedin.com/in/ \"Acme\" Hong Kong"));
        assert_eq!(param("num"), Some("10"));
        assert_eq!(param("cx"), Some("cse"));
    }

    #[test]
    fn rejects_malformed_endpoint() {
        assert!(GoogleCustomSearch::new(config("not a url")).is_err());
    }

    #[test]
    fn response_items_are_cleaned() {
        let body = r#"{"items":[{"link":"https://linkedin.com/in/a","title":"A &amp; B - CEO","snippet":"Hong\nKong","kind":"customsearch#result"}]}"#;
        let response: SearchResponse = serde_json::from_str(body).expect("decode");

        let cleaned: Vec<SearchResult> = response.items.into_iter().map(clean_result).collect();

        assert_eq!(cleaned[0].title, "A & B - CEO");
        assert_eq!(cleaned[0].snippet, "Hong Kong");
    }

    #[test]
    fn missing_items_decode_as_empty() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"kind":"customsearch#search"}"#).expect("decode");

        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_yields_no_results() {
        // nothing listens on the discard port
        let provider = GoogleCustomSearch::new(config("http://127.0.0.1:9/customsearch/v1"))
            .expect("provider");

        let results = provider.search("anything", 10).await;

        assert!(results.is_empty());
    }
}
