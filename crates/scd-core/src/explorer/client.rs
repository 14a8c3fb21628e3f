//! Blocking explorer client over libcurl.

use std::time::Duration;

use anyhow::Context;
use url::Url;

use crate::config::ScdConfig;
use crate::error::FetchFailure;

use super::types::ScanResponse;
use super::ContractFetcher;

/// `getsourcecode` client for one Etherscan-compatible endpoint.
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    base_url: Url,
    connect_timeout: Duration,
    timeout: Duration,
}

impl EtherscanClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid explorer URL: {base_url}"))?;
        Ok(Self {
            base_url,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        })
    }

    pub fn from_config(cfg: &ScdConfig) -> anyhow::Result<Self> {
        Ok(Self::new(&cfg.explorer_url)?.with_timeouts(
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.timeout_secs),
        ))
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.timeout = timeout;
        self
    }

    /// Full request URL; existing query parameters on the base URL are kept.
    pub(crate) fn request_url(&self, address: &str, api_key: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("module", "contract")
            .append_pair("action", "getsourcecode")
            .append_pair("address", address)
            .append_pair("apikey", api_key);
        url
    }
}

impl ContractFetcher for EtherscanClient {
    fn fetch(&self, address: &str, api_key: &str) -> Result<ScanResponse, FetchFailure> {
        let url = self.request_url(address, api_key);
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str()).map_err(FetchFailure::from_curl)?;
        easy.get(true).map_err(FetchFailure::from_curl)?;
        easy.follow_location(true).map_err(FetchFailure::from_curl)?;
        easy.max_redirections(10).map_err(FetchFailure::from_curl)?;
        easy.connect_timeout(self.connect_timeout)
            .map_err(FetchFailure::from_curl)?;
        easy.timeout(self.timeout).map_err(FetchFailure::from_curl)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(FetchFailure::from_curl)?;
            transfer.perform().map_err(FetchFailure::from_curl)?;
        }

        let code = easy.response_code().map_err(FetchFailure::from_curl)?;
        if !(200..300).contains(&code) {
            return Err(FetchFailure::Http(code));
        }
        tracing::debug!(address, bytes = body.len(), "explorer response received");

        decode_response(&body)
    }
}

pub(crate) fn decode_response(body: &[u8]) -> Result<ScanResponse, FetchFailure> {
    serde_json::from_slice(body).map_err(FetchFailure::Decode)
}
