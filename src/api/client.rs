//! HTTP client for post pages and media files.

use std::time::Duration;

use reqwest::{Client, Response};
use scraper::Html;
use url::Url;

use crate::config::HttpConfig;
use crate::error::{Error, Result};

/// HTTP client carrying the spoofed browser identity and the per-request timeout.
#[derive(Debug, Clone)]
pub struct PostClient {
    client: Client,
}

impl PostClient {
    /// Build a client from the HTTP settings.
    pub fn new(http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&http.user_agent)
            .timeout(Duration::from_secs(http.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch a post page and parse it as HTML.
    ///
    /// Every failure (connection, timeout, non-success status, unreadable
    /// body) is reported as [`Error::Fetch`] with the cause kept in `reason`.
    pub async fn fetch_page(&self, url: &str) -> Result<Html> {
        tracing::info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(url, &e))?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let text = response.text().await.map_err(|e| fetch_error(url, &e))?;
        tracing::debug!("Page length: {} bytes", text.len());

        Ok(Html::parse_document(&text))
    }

    /// Start downloading a media file.
    pub async fn download_file(&self, url: &Url) -> Result<Response> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::download(url.as_str(), describe(&e)))?;

        if !response.status().is_success() {
            return Err(Error::download(
                url.as_str(),
                format!("HTTP {}", response.status()),
            ));
        }

        Ok(response)
    }
}

fn fetch_error(url: &str, err: &reqwest::Error) -> Error {
    Error::Fetch {
        url: url.to_string(),
        reason: describe(err),
    }
}

/// Short human description of a transport error.
pub(crate) fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out ({})", err)
    } else if err.is_connect() {
        format!("connection failed ({})", err)
    } else {
        err.to_string()
    }
}
