//! End-to-end download: resolve → normalize → archive.

use std::path::PathBuf;

use crate::archive;
use crate::config::ScdConfig;
use crate::error::Result;
use crate::explorer::{ContractFetcher, ContractRecord};
use crate::normalize::{self, SourceEncoding};
use crate::resolver;

/// Inputs the pipeline needs beyond the fetcher itself.
#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub output_dir: PathBuf,
    pub max_proxy_hops: usize,
}

impl From<&ScdConfig> for DownloadSettings {
    fn from(cfg: &ScdConfig) -> Self {
        Self {
            output_dir: cfg.output_dir.clone(),
            max_proxy_hops: cfg.max_proxy_hops,
        }
    }
}

/// What a successful download produced.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub record: ContractRecord,
    pub requested_address: String,
    pub encoding: SourceEncoding,
    pub file_count: usize,
    pub archive_path: PathBuf,
}

impl DownloadOutcome {
    /// True when proxies were followed to a different address.
    pub fn followed_proxy(&self) -> bool {
        !self.record.address.eq_ignore_ascii_case(&self.requested_address)
    }
}

/// Downloads the verified source behind `address` into a zip archive.
///
/// The archive is named after the resolved contract and the address that
/// actually holds the source (the implementation when proxies were followed).
pub fn download_contract<F>(
    fetcher: &F,
    settings: &DownloadSettings,
    address: &str,
    api_key: &str,
) -> Result<DownloadOutcome>
where
    F: ContractFetcher + ?Sized,
{
    let record = resolver::resolve(fetcher, address, api_key, settings.max_proxy_hops)?;
    tracing::info!(contract = %record.contract_name, address = %record.address, "resolved contract");

    let (tree, encoding) = normalize::normalize_with_encoding(&record.source_code, &record.contract_name)?;
    tracing::info!(%encoding, files = tree.len(), "source normalized");

    let archive_path = archive::write_contract_archive(
        &settings.output_dir,
        &record.contract_name,
        &record.address,
        &tree,
    )?;

    Ok(DownloadOutcome {
        requested_address: address.to_string(),
        encoding,
        file_count: tree.len(),
        archive_path,
        record,
    })
}
