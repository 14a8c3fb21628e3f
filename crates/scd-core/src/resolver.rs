//! Proxy-aware resolution of an address to its terminal verified record.
//!
//! The resolver only depends on [`ContractFetcher`] and knows nothing about
//! HTTP. Proxy indirection is followed in a bounded loop: one fetch per hop,
//! stopping at a non-proxy record or a proxy whose implementation is itself.

use crate::error::{FetchFailure, Result, ScdError};
use crate::explorer::{ContractFetcher, ContractRecord, ScanResponse, SUCCESS_MESSAGE};

/// Default upper bound on proxy redirections.
pub const DEFAULT_MAX_PROXY_HOPS: usize = 10;

/// Fetches `address` and follows proxies until a terminal record is reached.
///
/// At most `max_hops` redirections are followed; a chain needing more fails
/// with [`ScdError::ProxyLoopLimitExceeded`]. Each hop performs exactly one
/// fetch and a failed hop is never retried.
pub fn resolve<F>(fetcher: &F, address: &str, api_key: &str, max_hops: usize) -> Result<ContractRecord>
where
    F: ContractFetcher + ?Sized,
{
    let mut current = address.to_string();
    let mut hops = 0usize;

    loop {
        tracing::info!(address = %current, hop = hops, "fetching contract source");
        let response = fetcher
            .fetch(&current, api_key)
            .map_err(|cause| ScdError::FetchFailed {
                address: current.clone(),
                cause,
            })?;
        let record = check_response(&current, response)?;

        if !needs_redirect(&record) {
            return Ok(record);
        }

        if hops >= max_hops {
            return Err(ScdError::ProxyLoopLimitExceeded {
                start: address.to_string(),
                last: record.implementation,
                limit: max_hops,
            });
        }

        tracing::info!(
            proxy = %current,
            implementation = %record.implementation,
            "proxy contract; refetching implementation address"
        );
        current = record.implementation;
        hops += 1;
    }
}

/// Validates one explorer response and extracts its single record.
fn check_response(address: &str, response: ScanResponse) -> Result<ContractRecord> {
    if response.message != SUCCESS_MESSAGE {
        return Err(ScdError::FetchFailed {
            address: address.to_string(),
            cause: FetchFailure::Upstream(response.message),
        });
    }

    let count = response.result.len();
    let Some(result) = response.result.into_iter().next().filter(|_| count == 1) else {
        return Err(ScdError::UnexpectedResultShape {
            address: address.to_string(),
            count,
        });
    };

    if !result.is_verified() {
        return Err(ScdError::NotVerified {
            address: address.to_string(),
        });
    }

    Ok(ContractRecord::from_result(address, result))
}

/// True when the record is a proxy pointing somewhere other than itself.
fn needs_redirect(record: &ContractRecord) -> bool {
    record.proxy && !record.implementation.eq_ignore_ascii_case(&record.address)
}
