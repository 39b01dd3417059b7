//! JSON fetching.
//!
//! The feeds are read through the [`Fetch`] trait. [`HttpFetcher`] talks to
//! the real endpoints; [`MemoryFetcher`] serves canned payloads for offline
//! runs and tests.

use crate::error::DataError;
use serde_json::Value;
use std::collections::HashMap;

/// Source of JSON documents keyed by URL.
pub trait Fetch {
    /// Fetch and parse the JSON document at `url`.
    fn fetch_json(&self, url: &str) -> Result<Value, DataError>;
}

/// Fetch `url`, logging and swallowing failures.
///
/// Returns `None` when the request or the parse failed.
pub fn fetch_or_warn(fetcher: &dyn Fetch, url: &str) -> Option<Value> {
    match fetcher.fetch_json(url) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(%url, error = %err, "fetch failed");
            None
        }
    }
}

/// Blocking HTTP fetcher.
#[cfg(feature = "http")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new(timeout: std::time::Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Fetcher honoring the configured timeout.
    pub fn from_config(config: &crate::config::DataConfig) -> Result<Self, DataError> {
        Self::new(std::time::Duration::from_secs(config.timeout_secs))
    }
}

#[cfg(feature = "http")]
impl Fetch for HttpFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value, DataError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Fetch {
                url: url.to_string(),
                reason: format!("status {status}"),
            });
        }
        Ok(response.json::<Value>()?)
    }
}

/// Fetcher answering from an in-memory URL map.
///
/// # Examples
///
/// ```rust
/// use riftstat::data::fetch::{Fetch, MemoryFetcher};
/// use serde_json::json;
///
/// let fetcher = MemoryFetcher::new().with("http://x/versions.json", json!(["14.23.1"]));
/// assert_eq!(fetcher.fetch_json("http://x/versions.json").unwrap(), json!(["14.23.1"]));
/// assert!(fetcher.fetch_json("http://x/other.json").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    documents: HashMap<String, Value>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `value` for `url`.
    pub fn with(mut self, url: impl Into<String>, value: Value) -> Self {
        self.insert(url, value);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, value: Value) {
        self.documents.insert(url.into(), value);
    }
}

impl Fetch for MemoryFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value, DataError> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| DataError::Fetch {
                url: url.to_string(),
                reason: "status 404 Not Found".into(),
            })
    }
}
