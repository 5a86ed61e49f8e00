//! HTTP fetcher
//!
//! A thin, synchronous-in-spirit transport: one URL in, the full textual
//! body out. Retry and timeout policy live here, not in the traversal.

use crate::config::SourceConfig;
use crate::{CrawlError, Result};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Builds an HTTP client with the configured user agent
pub fn build_http_client(config: &SourceConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page-fetching capability used by the traversal
///
/// The crawler only ever needs "give me the body at this URL"; keeping it
/// behind a trait lets tests drive the traversal without a network.
pub trait Fetch {
    /// Fetches the full textual body of the resource at `url`
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Production fetcher backed by a reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from the source configuration
    pub fn new(config: &SourceConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CrawlError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| CrawlError::Fetch {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&SourceConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&SourceConfig::default()).unwrap();
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, CrawlError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&SourceConfig::default()).unwrap();
        let body = fetcher.fetch(&server.uri()).await.unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_fetch_error() {
        let fetcher = HttpFetcher::new(&SourceConfig::default()).unwrap();
        // nothing listens on port 1
        let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, CrawlError::Fetch { .. }));
    }
}
