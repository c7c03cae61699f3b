use std::collections::BTreeMap;

use super::api_client::ApiClient;
use super::models::AppOrgDetails;
use crate::error::Error;
use crate::http::Method;

#[derive(Debug, Clone)]
pub struct Organization {
    api: ApiClient,
}

impl Organization {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// App and organization details for an API token.
    pub fn get_app_by_token(&self, token: &str) -> Result<AppOrgDetails, Error> {
        self.api.call::<(), _>(
            Method::Get,
            &format!("/service/platform/organization/v1.0/apps/{}", token),
            BTreeMap::new(),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::api_client::testing::{client, RecordingExecutor};

    #[test]
    fn get_app_by_token_path() {
        let exec = RecordingExecutor::with_responses(&[
            r#"{"app":{"name":"sdk"},"org":{"cloudName":"red-scene-95b6ea"}}"#,
        ]);
        let org = Organization::new(client(exec.clone()));
        let details = org.get_app_by_token("tok-1").unwrap();
        assert_eq!(details.org.cloud_name, "red-scene-95b6ea");
        assert_eq!(
            exec.last().url,
            "https://api.pixelbin.io/service/platform/organization/v1.0/apps/tok-1"
        );
    }
}
