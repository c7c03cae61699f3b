use std::sync::Arc;

use super::api_client::{ApiClient, PixelbinConfig};
use super::assets::Assets;
use super::organization::Organization;
use crate::http::HttpExecutor;

/// Entry point to the platform API; services share one [`ApiClient`].
#[derive(Debug, Clone)]
pub struct PixelbinClient {
    pub assets: Assets,
    pub organization: Organization,
    api: ApiClient,
}

impl PixelbinClient {
    /// Client using the libcurl executor with default timeouts.
    pub fn new(config: PixelbinConfig) -> Self {
        Self::from_api(ApiClient::new(config))
    }

    pub fn with_executor(config: PixelbinConfig, executor: Arc<dyn HttpExecutor>) -> Self {
        Self::from_api(ApiClient::with_executor(config, executor))
    }

    fn from_api(api: ApiClient) -> Self {
        Self {
            assets: Assets::new(api.clone()),
            organization: Organization::new(api.clone()),
            api,
        }
    }

    pub fn config(&self) -> &PixelbinConfig {
        self.api.config()
    }
}
