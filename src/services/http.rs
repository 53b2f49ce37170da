//! Outbound HTTP
//!
//! Every upstream call (remote playlists, Xtream and Stalker APIs) goes through
//! [`HttpFetch`], so adapters can be driven by a stub in tests. Calls are made
//! exactly once with the client's bounded timeout; nothing here retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Raw upstream response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure before a status line was received, or while reading the body
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection timeout - server did not respond")]
    Timeout,
    #[error("connection failed - server unreachable: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("playlist too large: {size_mb:.1}MB (limit {limit_mb}MB)")]
    TooLarge { size_mb: f64, limit_mb: usize },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Hard failure of the remote playlist fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },
}

/// Failure inside an account adapter; always degraded to "no channels"
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("empty response")]
    EmptyResponse,
}

/// GET capability used by the fetcher and both account adapters
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// [`HttpFetch`] backed by a shared `reqwest` client
pub struct ReqwestFetcher {
    client: Client,
    max_body_bytes: u64,
    max_body_mb: usize,
}

impl ReqwestFetcher {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_millis(config.fetch_timeout_ms))
            .gzip(true)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: (config.max_playlist_size_mb as u64) * 1024 * 1024,
            max_body_mb: config.max_playlist_size_mb,
        })
    }

    fn check_body_size(&self, len: u64) -> Result<(), TransportError> {
        if len > self.max_body_bytes {
            return Err(TransportError::TooLarge {
                size_mb: len as f64 / 1024.0 / 1024.0,
                limit_mb: self.max_body_mb,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        if let Some(len) = response.content_length() {
            self.check_body_size(len)?;
        }

        // Content-Length may be absent or wrong; count what actually arrives
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            self.check_body_size(body.len() as u64)?;
        }

        Ok(HttpResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

/// Human-readable reason for a non-2xx status
fn status_reason(status: u16) -> String {
    match status {
        404 => "not found, check the URL".to_string(),
        403 => "access denied, the source may require authentication".to_string(),
        429 => "too many requests, the server is rate limiting".to_string(),
        _ => reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("error")
            .to_string(),
    }
}

/// Single GET returning the body of a 2xx response
pub async fn fetch_text(http: &dyn HttpFetch, url: &str) -> Result<String, FetchError> {
    let response = http.get(url).await?;

    if !response.is_success() {
        return Err(FetchError::Status {
            status: response.status,
            reason: status_reason(response.status),
        });
    }

    Ok(response.body)
}

/// Single GET decoding a JSON body into `T`
pub async fn fetch_json<T: DeserializeOwned>(
    http: &dyn HttpFetch,
    url: &str,
) -> Result<T, AdapterError> {
    let text = fetch_text(http, url).await?;
    let trimmed = text.trim();

    if trimmed.is_empty() || trimmed == "null" {
        return Err(AdapterError::EmptyResponse);
    }

    serde_json::from_str(trimmed).map_err(|e| {
        let preview: String = trimmed.chars().take(500).collect();
        debug!("Response text: {}", preview);
        AdapterError::Parse(e)
    })
}
