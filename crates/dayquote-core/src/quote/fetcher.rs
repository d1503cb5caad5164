//! Quote fetcher
//!
//! One GET per call against a randomly chosen category, bounded by a
//! client-side timeout. No retries: the caller owns the fallback policy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::sanitize::DisplayQuote;
use super::source::QuoteSource;
use crate::error::FetchError;

const DEFAULT_BASE_URL: &str = "https://v1.hitokoto.cn";
const DEFAULT_TIMEOUT_MS: u64 = 5000;
const USER_AGENT: &str = concat!("dayquote/", env!("CARGO_PKG_VERSION"));

/// Anything that can hand the widget a quote
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quote(&self) -> Result<DisplayQuote, FetchError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// API root; category query parameters are appended to it
    pub base_url: String,
    pub timeout_ms: u64,
    /// Pin a single category instead of picking one at random
    pub category: Option<QuoteSource>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            category: None,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Fetches quotes from the remote plain-text API
pub struct QuoteFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl QuoteFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self::with_client(client, config)
    }

    pub fn with_client(client: reqwest::Client, config: FetchConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn pick_source(&self) -> QuoteSource {
        self.config.category.unwrap_or_else(QuoteSource::random)
    }

    /// Fetch from one specific category
    ///
    /// The request future is dropped when the timeout wins the race, which
    /// aborts the connection. A late response is never observed.
    pub async fn fetch_from(&self, source: QuoteSource) -> Result<DisplayQuote, FetchError> {
        let timeout = self.config.timeout();
        match tokio::time::timeout(timeout, self.request(source)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout)),
        }
    }

    async fn request(&self, source: QuoteSource) -> Result<DisplayQuote, FetchError> {
        let url = source.endpoint(&self.config.base_url);
        debug!(source = %source, url = %url, "Fetching quote");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "text/plain")
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(FetchError::Network)?;
        let quote = DisplayQuote::from_raw(&body).ok_or(FetchError::EmptyBody)?;

        info!(source = %source, chars = quote.len(), "Fetched quote");
        Ok(quote)
    }
}

#[async_trait]
impl QuoteProvider for QuoteFetcher {
    async fn fetch_quote(&self) -> Result<DisplayQuote, FetchError> {
        self.fetch_from(self.pick_source()).await
    }
}

/// Provider that always returns the same quote (no network)
pub struct StaticQuote(pub DisplayQuote);

#[async_trait]
impl QuoteProvider for StaticQuote {
    async fn fetch_quote(&self) -> Result<DisplayQuote, FetchError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded (url, accept header) per request
    type Seen = Arc<Mutex<Vec<(String, Option<String>)>>>;

    struct StubServer {
        base_url: String,
        seen: Seen,
    }

    /// Serve every request with the same canned response on a background thread
    fn serve(status: u16, body: &'static str, delay: Duration) -> StubServer {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();

        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let accept = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Accept"))
                    .map(|h| h.value.as_str().to_string());
                log.lock().push((request.url().to_string(), accept));

                std::thread::sleep(delay);
                let response = tiny_http::Response::from_string(body).with_status_code(status);
                let _ = request.respond(response);
            }
        });

        StubServer {
            base_url: format!("http://127.0.0.1:{}", port),
            seen,
        }
    }

    fn fetcher(base_url: &str, timeout_ms: u64, category: Option<QuoteSource>) -> QuoteFetcher {
        QuoteFetcher::new(FetchConfig {
            base_url: base_url.to_string(),
            timeout_ms,
            category,
        })
    }

    #[tokio::test]
    async fn test_fetch_sanitizes_body() {
        let stub = serve(200, "  Hello\n\nWorld  ", Duration::ZERO);
        let quote = fetcher(&stub.base_url, 5000, Some(QuoteSource::Poetry))
            .fetch_quote()
            .await
            .unwrap();

        assert_eq!(quote.as_str(), "Hello World");

        let seen = stub.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "/?c=i&encode=text");
        assert_eq!(seen[0].1.as_deref(), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_fetch_truncates_long_body() {
        let body = "This quote is far too long to fit on the homepage banner so it gets cut";
        let stub = serve(200, body, Duration::ZERO);
        let quote = fetcher(&stub.base_url, 5000, None)
            .fetch_quote()
            .await
            .unwrap();

        assert_eq!(quote.len(), 60);
        assert!(quote.as_str().ends_with("..."));
    }

    #[tokio::test]
    async fn test_empty_body() {
        let stub = serve(200, "", Duration::ZERO);
        let result = fetcher(&stub.base_url, 5000, None).fetch_quote().await;
        assert!(matches!(result, Err(FetchError::EmptyBody)));
    }

    #[tokio::test]
    async fn test_whitespace_body() {
        let stub = serve(200, " \r\n\t ", Duration::ZERO);
        let result = fetcher(&stub.base_url, 5000, None).fetch_quote().await;
        assert!(matches!(result, Err(FetchError::EmptyBody)));
    }

    #[tokio::test]
    async fn test_http_status() {
        let stub = serve(503, "busy", Duration::ZERO);
        let result = fetcher(&stub.base_url, 5000, None).fetch_quote().await;
        assert!(matches!(result, Err(FetchError::HttpStatus { code: 503 })));
    }

    #[tokio::test]
    async fn test_timeout_wins_over_slow_response() {
        let stub = serve(200, "too late", Duration::from_millis(1000));
        let result = fetcher(&stub.base_url, 200, None).fetch_quote().await;
        assert!(matches!(result, Err(FetchError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_network_error() {
        // Bind then drop to get a port nothing listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let result = fetcher(&format!("http://127.0.0.1:{}", port), 5000, None)
            .fetch_quote()
            .await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[tokio::test]
    async fn test_static_quote() {
        let quote = DisplayQuote::from_raw("Keep going.").unwrap();
        let provider = StaticQuote(quote.clone());
        assert_eq!(provider.fetch_quote().await.unwrap(), quote);
    }
}
