use crate::config::ScraperConfig;
use crate::error::FetchError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Source of page markup
///
/// Implementors send at most one request per call and never retry.
pub trait Fetch {
    /// Fetch the body of `url` as text
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Check that `address` is an absolute HTTP(S) URL
pub fn validate_url(address: &str) -> Result<Url, FetchError> {
    let url = Url::parse(address).map_err(|e| FetchError::InvalidUrl {
        url: address.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FetchError::InvalidUrl {
            url: address.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

/// HTTP fetcher backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(Client::new(), timeout)
    }

    /// Create a fetcher on top of an existing client
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(config.timeout())
    }

    /// Default timeout applied by [`Fetch::fetch`]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `address` with an explicit timeout
    ///
    /// The address is validated before anything is sent. Any non-2xx status
    /// is returned as [`FetchError::Status`].
    pub async fn fetch_with_timeout(
        &self,
        address: &str,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        let url = validate_url(address)?;
        ::log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(address, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            ::log::warn!("{} returned {}", address, status);
            return Err(FetchError::Status {
                url: address.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify(address, timeout, e))?;

        ::log::debug!("Fetched {} bytes from {}", body.len(), address);
        Ok(body)
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetch_with_timeout(url, self.timeout).await
    }
}

/// Sort a transport error into the timeout, connection or generic bucket
fn classify(url: &str, timeout: Duration, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if error.is_timeout() {
        FetchError::Timeout { url, timeout }
    } else if error.is_connect() {
        FetchError::Connection { url, source: error }
    } else {
        FetchError::Request { url, source: error }
    }
}
