use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::PixelbinSettings;
use crate::error::Error;
use crate::http::{encode_query, CurlExecutor, HttpExecutor, HttpRequest, Method};
use crate::signature::{sign_request, SignatureRequest, PARAM_HEADER};

const EXCLUDED_HEADERS: [&str; 2] = ["Authorization", "Content-Type"];

/// Credentials and origin for the platform API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelbinConfig {
    pub api_secret: String,
    /// API origin, e.g. `https://api.pixelbin.io`.
    pub domain: String,
}

impl PixelbinConfig {
    pub fn new(api_secret: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            api_secret: api_secret.into(),
            domain: domain.into().trim_end_matches('/').to_string(),
        }
    }

    /// `None` when the settings carry no API secret.
    pub fn from_settings(settings: &PixelbinSettings) -> Option<Self> {
        let secret = settings.api_secret.as_deref().filter(|s| !s.is_empty())?;
        Some(Self::new(secret, settings.domain.as_str()))
    }
}

/// Signs and executes platform API calls.
#[derive(Clone)]
pub struct ApiClient {
    config: PixelbinConfig,
    executor: Arc<dyn HttpExecutor>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("domain", &self.config.domain)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: PixelbinConfig) -> Self {
        Self::with_executor(config, Arc::new(CurlExecutor::default()))
    }

    pub fn with_executor(config: PixelbinConfig, executor: Arc<dyn HttpExecutor>) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &PixelbinConfig {
        &self.config
    }

    /// Executes `method path` and returns the raw response body.
    ///
    /// `query` is sent for GET only; `body` is sent as JSON for other methods.
    pub fn execute(
        &self,
        method: Method,
        path: &str,
        query: BTreeMap<String, String>,
        body: Option<serde_json::Value>,
    ) -> Result<Vec<u8>, Error> {
        let body = if method == Method::Get { None } else { body };

        let mut headers = BTreeMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", STANDARD.encode(self.config.api_secret.as_bytes())),
        );
        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        let signed = sign_request(
            &SignatureRequest {
                domain: self.config.domain.clone(),
                method: method.as_str().to_string(),
                path: path.to_string(),
                query_string: if method == Method::Get {
                    encode_query(&query)
                } else {
                    String::new()
                },
                headers,
                body: body.clone(),
                exclude_headers: EXCLUDED_HEADERS.iter().map(|h| h.to_string()).collect(),
            },
            false,
        )?;

        let mut headers = signed.headers;
        if let Some(param) = headers.get_mut(PARAM_HEADER) {
            *param = STANDARD.encode(param.as_bytes());
        }

        let request = HttpRequest {
            method,
            url: format!("{}{}", self.config.domain, path),
            query: if method == Method::Get { query } else { BTreeMap::new() },
            headers,
            body,
        };
        self.executor.execute(&request)
    }

    /// [`execute`](Self::execute) with a typed body and a decoded JSON response.
    pub fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        query: BTreeMap<String, String>,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        let bytes = self.execute(method, path, query, body)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
