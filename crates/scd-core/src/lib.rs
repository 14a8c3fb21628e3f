//! Verified smart-contract source downloader.
//!
//! [`resolver`] follows proxies to a verified explorer record, [`normalize`]
//! turns its source into a file tree and [`archive`] writes that tree as a zip.

pub mod archive;
pub mod checksum;
pub mod config;
pub mod error;
pub mod explorer;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod resolver;

