//! CLI for the SCD contract source downloader.

mod prompt;

use anyhow::{bail, Context, Result};
use clap::Parser;
use scd_core::checksum;
use scd_core::config;
use scd_core::explorer::EtherscanClient;
use scd_core::pipeline::{self, DownloadSettings};
use std::path::PathBuf;

/// Download verified contract source from the block explorer into a zip archive.
#[derive(Debug, Parser)]
#[command(name = "scd")]
#[command(about = "SCD: verified smart-contract source downloader (Ethereum main-net)", long_about = None)]
pub struct Cli {
    /// Contract address (prompted for when omitted).
    #[arg(long)]
    pub address: Option<String>,

    /// Directory for the zip archive (overrides `output_dir` in config.toml).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        tracing::info!("running scd; Ethereum main-net only");

        let address = match cli.address {
            Some(a) => a,
            None => prompt::read_address()?,
        };
        let address = validate_address(&address)?;
        tracing::info!("contract address is {}", address);

        match config::load_dotenv()? {
            Some(path) => tracing::debug!("loaded environment from {}", path.display()),
            None => tracing::debug!("no .env file found"),
        }
        let api_key = cfg
            .api_key()
            .context("expected scan api key (set ETHERSCAN_APIKEY in the environment or .env, or api_key in config.toml)")?;

        let mut settings = DownloadSettings::from(&cfg);
        if let Some(dir) = cli.output_dir {
            settings.output_dir = dir;
        }

        let client = EtherscanClient::from_config(&cfg)?;
        let outcome = pipeline::download_contract(&client, &settings, &address, &api_key)
            .with_context(|| format!("download {address}"))?;

        let digest = checksum::sha256_path(&outcome.archive_path)?;
        tracing::info!(
            "downloaded contract name={} address={}",
            outcome.record.contract_name,
            outcome.record.address
        );

        if outcome.followed_proxy() {
            println!(
                "Proxy {} resolved to implementation {}",
                outcome.requested_address, outcome.record.address
            );
        }
        println!(
            "Saved {} ({} {} file(s)) to {}",
            outcome.record.contract_name,
            outcome.file_count,
            outcome.encoding,
            outcome.archive_path.display()
        );
        println!("{}  {}", digest, outcome.archive_path.display());
        Ok(())
    }
}

/// Trims the input and requires the `0x` marker somewhere in it.
pub(crate) fn validate_address(input: &str) -> Result<String> {
    let address = input.trim();
    if address.is_empty() {
        bail!("no contract address given");
    }
    if !address.contains("0x") {
        bail!("invalid ethereum address: {address}");
    }
    Ok(address.to_string())
}
