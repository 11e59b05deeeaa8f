//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with timeout and default headers
//! - Rotating the `User-Agent` on every request
//! - Classifying transport failures and non-success statuses
//! - Decoding successful bodies and parsing them into a document tree

use crate::config::ClientConfig;
use crate::crawler::charset::decode_body;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use thiserror::Error;

/// Reasons a page could not be fetched
///
/// Every variant is recoverable: the crawl loop logs it and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Status { url, .. }
            | Self::Body { url, .. }
            | Self::Request { url, .. } => url,
        }
    }

    /// Short description of the failure, without the URL
    pub fn reason(&self) -> String {
        match self {
            Self::Timeout { .. } => "request timeout".to_string(),
            Self::Connect { message, .. } => format!("connection failed: {}", message),
            Self::Status { status, .. } => format!("HTTP {}", status),
            Self::Body { message, .. } => format!("body read failed: {}", message),
            Self::Request { message, .. } => message.clone(),
        }
    }

    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            Self::Connect {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// A fetched page parsed into a document tree
///
/// Parsing is best effort: malformed markup still yields a tree.
#[derive(Debug)]
pub struct Document {
    /// URL of the final response after redirects
    pub final_url: String,

    /// HTTP status code of the final response
    pub status_code: u16,

    html: Html,
}

impl Document {
    /// Parses an HTML body into a document
    pub fn parse(final_url: impl Into<String>, status_code: u16, body: &str) -> Self {
        Self {
            final_url: final_url.into(),
            status_code,
            html: Html::parse_document(body),
        }
    }

    /// The parsed document tree
    pub fn html(&self) -> &Html {
        &self.html
    }
}

/// Picks a client identity uniformly at random from `pool`
///
/// Returns None only for an empty pool.
pub fn random_user_agent(pool: &[String]) -> Option<&str> {
    pool.choose(&mut rand::thread_rng()).map(String::as_str)
}

/// Builds an HTTP client with proper configuration
///
/// The client follows redirects with reqwest's default policy and carries
/// browser-like `Accept` headers. `User-Agent` is set per request.
///
/// # Arguments
///
/// * `config` - The HTTP client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues GET requests with a rotating client identity
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agents: Vec<String>,
}

impl Fetcher {
    /// Creates a fetcher from client configuration
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            user_agents: config.user_agents.clone(),
        })
    }

    /// Fetches a URL and parses the response body
    ///
    /// # Error Classification
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Timeout (connect or total) | `FetchError::Timeout` |
    /// | Connection refused / DNS failure | `FetchError::Connect` |
    /// | Non-2xx status after redirects | `FetchError::Status` |
    /// | Body could not be read | `FetchError::Body` |
    /// | Anything else from the client | `FetchError::Request` |
    pub async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let mut request = self.client.get(url);
        if let Some(user_agent) = random_user_agent(&self.user_agents) {
            request = request.header(USER_AGENT, user_agent);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        tracing::debug!(
            "Fetched {} ({} bytes, final URL {})",
            url,
            bytes.len(),
            final_url
        );

        let body = decode_body(&bytes, content_type.as_deref());

        Ok(Document::parse(final_url, status.as_u16(), &body))
    }
}
