//! `pixelbin sign-url <url>` – add pbs/pbe/pbt signature parameters.

use anyhow::Result;
use pixelbin_core::security;

pub fn run_sign_url(url: &str, expiry: u64, access_key: &str, token: &str) -> Result<()> {
    let signed = security::sign_url(url, expiry, access_key, token)?;
    println!("{}", signed);
    Ok(())
}
