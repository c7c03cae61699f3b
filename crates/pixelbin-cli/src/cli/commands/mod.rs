//! CLI command handlers, one file per command.

mod app_info;
mod build;
mod list_files;
mod parse;
mod sign_url;

pub use app_info::run_app_info;
pub use build::run_build;
pub use list_files::run_list_files;
pub use parse::run_parse;
pub use sign_url::run_sign_url;

use anyhow::{Context, Result};
use pixelbin_core::config::PixelbinSettings;
use pixelbin_core::http::CurlExecutor;
use pixelbin_core::platform::{PixelbinClient, PixelbinConfig};
use std::sync::Arc;

/// Platform client from the loaded settings; fails without an API secret.
fn platform_client(cfg: &PixelbinSettings) -> Result<PixelbinClient> {
    let config = PixelbinConfig::from_settings(cfg).with_context(|| {
        format!(
            "api_secret is not set in {}",
            pixelbin_core::config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "config.toml".to_string())
        )
    })?;
    Ok(PixelbinClient::with_executor(
        config,
        Arc::new(CurlExecutor::from_settings(cfg)),
    ))
}
