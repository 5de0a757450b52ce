use std::time::Duration;

use feed_logging::feed_info;
use futures_util::StreamExt;
use signal_core::Signal;
use url::Url;

use crate::rows::{normalize_rows, SignalRow};
use crate::{FailureKind, FetchError};

/// Anything that can deliver a full, ordered signal collection.
#[async_trait::async_trait]
pub trait SignalSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Signal>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Project URL of the hosted backend, e.g. `https://xyz.example.co`.
    pub base_url: String,
    pub api_key: String,
    pub table: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl FetchSettings {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// `{base}/rest/v1/{table}?select=*&order=published_at.desc`
    pub fn signals_url(&self) -> Result<Url, FetchError> {
        let mut base = self.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let mut url = Url::parse(&base)
            .and_then(|base| base.join(&format!("rest/v1/{}", self.table)))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "published_at.desc");
        Ok(url)
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            table: "signals".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Reads the signals table through the backend's REST interface.
#[derive(Debug, Clone)]
pub struct RestSignalFetcher {
    settings: FetchSettings,
}

impl RestSignalFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    pub async fn fetch_rows(&self) -> Result<Vec<SignalRow>, FetchError> {
        if self.settings.api_key.is_empty() {
            return Err(FetchError::new(
                FailureKind::MissingCredentials,
                "no api key configured",
            ));
        }
        let url = self.settings.signals_url()?;
        let client = self.build_client()?;

        let response = client
            .get(url)
            .header("apikey", &self.settings.api_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.settings.api_key),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl SignalSource for RestSignalFetcher {
    async fn load(&self) -> Result<Vec<Signal>, FetchError> {
        let rows = self.fetch_rows().await?;
        feed_info!("Fetched {} signal rows from {}", rows.len(), self.settings.table);
        Ok(normalize_rows(rows))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
