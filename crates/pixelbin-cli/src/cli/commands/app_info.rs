//! `pixelbin app-info` – look up the app behind the configured API secret.

use anyhow::{Context, Result};
use pixelbin_core::config::PixelbinSettings;

use super::platform_client;

pub async fn run_app_info(cfg: &PixelbinSettings) -> Result<()> {
    let client = platform_client(cfg)?;
    let details = tokio::task::spawn_blocking(move || {
        let token = client.config().api_secret.clone();
        client.organization.get_app_by_token(&token)
    })
    .await
    .context("app-info task join")??;
    println!("{}", serde_json::to_string_pretty(&details)?);
    Ok(())
}
