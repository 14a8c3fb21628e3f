//! Block explorer access: response types, the fetch seam and the curl client.
//!
//! The resolver only depends on [`ContractFetcher`]; tests substitute an
//! in-memory fetcher and the CLI uses [`EtherscanClient`].

mod client;
mod types;

pub use client::EtherscanClient;
pub use types::{
    CompilerMetadata, ContractRecord, ScanResponse, ScanResult, NOT_VERIFIED_ABI, SUCCESS_MESSAGE,
};

use crate::error::FetchFailure;

/// One `getsourcecode` request per call. Implementations must not retry.
pub trait ContractFetcher {
    fn fetch(&self, address: &str, api_key: &str) -> Result<ScanResponse, FetchFailure>;
}
