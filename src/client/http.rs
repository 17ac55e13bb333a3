use super::{ApiUrl, ClientError, DocumentSource, Result};
use crate::config::ApiSettings;
use crate::mapper::Document;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::RETRY_AFTER};
use std::time::Duration;
use tracing::debug;

const DEFAULT_USER_AGENT: &str = concat!("cinemap/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed document source
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::build(base_url.into(), DEFAULT_USER_AGENT, Duration::from_secs(30))
    }

    /// Create a client from API settings, including the API key
    pub fn from_settings(settings: &ApiSettings) -> Result<Self> {
        let client = Self::build(
            settings.base_url.clone(),
            &settings.user_agent,
            Duration::from_secs(settings.timeout_secs),
        )?;

        Ok(match &settings.api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        })
    }

    fn build(base_url: String, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        })
    }

    /// Send `api_key` with every request
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Get the underlying reqwest client
    #[must_use]
    pub const fn inner(&self) -> &Client {
        &self.client
    }

    /// Absolute URL of a request, without query
    #[must_use]
    pub fn url(&self, url: &ApiUrl) -> String {
        format!("{}{}", self.base_url, url.path())
    }

    /// Check status and parse the body
    async fn handle_response(url: &ApiUrl, response: reqwest::Response) -> Result<Document> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url.path()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .map_or(Duration::from_secs(1), Duration::from_secs);
            return Err(ClientError::RateLimit(retry_after));
        }

        if !status.is_success() {
            let status_code = status.as_u16();
            let message = response.text().await.unwrap_or_default();

            return Err(ClientError::Api {
                status: status_code,
                message,
            });
        }

        let body = response.bytes().await.map_err(redact)?;
        Ok(Document::parse_slice(&body)?)
    }
}

/// Drop the request URL from a transport error; its query carries the API key
fn redact(err: reqwest::Error) -> ClientError {
    ClientError::Network(err.without_url())
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DocumentSource for HttpClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &ApiUrl) -> Result<Document> {
        debug!(url = %url, "GET");

        let mut request = self.client.get(self.url(url)).query(url.params());
        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key.as_str())]);
        }

        let response = request.send().await.map_err(redact)?;
        Self::handle_response(url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::PopulateError;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single request with a canned response; returns the base URL
    async fn serve_once(status: &str, headers: &[&str], body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n",
            body.len()
        );
        for header in headers {
            response.push_str(header);
            response.push_str("\r\n");
        }
        response.push_str("\r\n");
        response.push_str(body);

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 8192];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}")
    }

    async fn fetch_from(base_url: String) -> Result<Document> {
        HttpClient::new(base_url)
            .unwrap()
            .with_api_key("secret-key")
            .fetch(&ApiUrl::new("movie").segment(78))
            .await
    }

    #[tokio::test]
    async fn test_success_body_is_parsed() {
        let base = serve_once("200 OK", &["Content-Type: application/json"], r#"{"id": 78}"#).await;

        let document = fetch_from(base).await.unwrap();
        assert_eq!(document.get("id"), Some(&serde_json::json!(78)));
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let base = serve_once("404 Not Found", &[], "").await;

        let err = fetch_from(base).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(path) if path == "/movie/78"));
    }

    #[tokio::test]
    async fn test_rate_limit_reads_retry_after() {
        let base = serve_once("429 Too Many Requests", &["Retry-After: 7"], "").await;

        let err = fetch_from(base).await.unwrap_err();
        assert!(matches!(err, ClientError::RateLimit(d) if d == Duration::from_secs(7)));
    }

    #[tokio::test]
    async fn test_rate_limit_without_header_waits_one_second() {
        let base = serve_once("429 Too Many Requests", &[], "").await;

        let err = fetch_from(base).await.unwrap_err();
        assert!(matches!(err, ClientError::RateLimit(d) if d == Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn test_other_status_is_api_error() {
        let base = serve_once("500 Internal Server Error", &[], "upstream failed").await;

        match fetch_from(base).await.unwrap_err() {
            ClientError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream failed");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let base = serve_once("200 OK", &[], "<html>not json</html>").await;

        let err = fetch_from(base).await.unwrap_err();
        assert!(matches!(err, ClientError::Populate(PopulateError::Parse(_))));
    }

    #[tokio::test]
    async fn test_network_error_hides_api_key() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetch_from(format!("http://{addr}")).await.unwrap_err();

        assert!(matches!(err, ClientError::Network(_)));
        assert!(!format!("{err}").contains("secret-key"));
        assert!(!format!("{err:?}").contains("secret-key"));
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = HttpClient::new("https://api.themoviedb.org/3/").unwrap();
        let url = ApiUrl::new("movie").segment(78).param("language", "en");

        assert_eq!(client.url(&url), "https://api.themoviedb.org/3/movie/78");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = HttpClient::new("https://example.org")
            .unwrap()
            .with_api_key("secret-key");

        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_from_settings() {
        let settings = ApiSettings {
            api_key: Some("k".to_string()),
            base_url: "http://localhost:9000".to_string(),
            ..ApiSettings::default()
        };

        let client = HttpClient::from_settings(&settings).unwrap();
        assert_eq!(client.api_key.as_deref(), Some("k"));
        assert_eq!(client.url(&ApiUrl::new("configuration")), "http://localhost:9000/configuration");
    }
}
