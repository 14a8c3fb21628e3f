//! Interactive address prompt used when `--address` is omitted.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

pub(crate) fn read_address() -> Result<String> {
    let stdin = io::stdin();
    read_address_from(&mut stdin.lock(), &mut io::stdout())
}

fn read_address_from<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    writeln!(out, "↓ input smart contract address ↓")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("read address from stdin")?;
    Ok(line.trim().to_string())
}
