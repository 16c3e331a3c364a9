//! Network transport for source downloads

use crate::config::Settings;
use crate::error::{Error, Result};

use std::time::Duration;

/// Something that can download a URL into memory
pub trait Fetch {
    /// GET `url` and return the response body. Non-success responses are errors.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP client
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| Error::fetch("(client setup)", e))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!("sources - downloading {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::fetch(url, e))?;

        if !response.status().is_success() {
            return Err(Error::fetch(url, format!("HTTP {}", response.status())));
        }

        let bytes = response.bytes().map_err(|e| Error::fetch(url, e))?;
        Ok(bytes.to_vec())
    }
}
