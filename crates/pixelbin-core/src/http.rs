//! HTTP transport for the platform API.
//!
//! [`HttpExecutor`] is the seam between the API client and the network; the
//! default [`CurlExecutor`] uses libcurl. Calls block the current thread; use
//! `spawn_blocking` from async code.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::config::PixelbinSettings;
use crate::error::{ApiError, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared request (already signed).
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL without query string.
    pub url: String,
    /// Sent only for GET requests.
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    /// JSON body; ignored for GET requests.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Form-encoded query, keys in ascending order.
    pub fn query_string(&self) -> String {
        encode_query(&self.query)
    }

    /// `url` plus the query string for GET requests.
    pub fn full_url(&self) -> String {
        let query = self.query_string();
        if self.method != Method::Get || query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query)
        }
    }
}

pub fn encode_query(query: &BTreeMap<String, String>) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter())
        .finish()
}

/// Executes a request and returns the body of a 200 response.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, req: &HttpRequest) -> Result<Vec<u8>, Error>;
}

/// libcurl-backed executor.
#[derive(Debug, Clone)]
pub struct CurlExecutor {
    connect_timeout: Duration,
    timeout: Duration,
}

impl Default for CurlExecutor {
    fn default() -> Self {
        Self::from_settings(&PixelbinSettings::default())
    }
}

impl CurlExecutor {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            connect_timeout,
            timeout,
        }
    }

    pub fn from_settings(settings: &PixelbinSettings) -> Self {
        Self::new(settings.connect_timeout(), settings.request_timeout())
    }
}

impl HttpExecutor for CurlExecutor {
    fn execute(&self, req: &HttpRequest) -> Result<Vec<u8>, Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(&req.full_url())?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        match req.method {
            Method::Get => easy.get(true)?,
            method => {
                if let Some(body) = &req.body {
                    easy.post_fields_copy(&serde_json::to_vec(body)?)?;
                }
                easy.custom_request(method.as_str())?;
            }
        }

        let mut list = curl::easy::List::new();
        for (k, v) in &req.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        tracing::debug!(method = %req.method, url = %req.url, status = code, "api request");
        if code != 200 {
            return Err(api_error_from_response(code, &body).into());
        }
        Ok(body)
    }
}

/// Decodes a non-200 response body; unreadable bodies get a generic message.
pub fn api_error_from_response(status: u32, body: &[u8]) -> ApiError {
    let status = u16::try_from(status).unwrap_or(500);
    match serde_json::from_slice::<ApiError>(body) {
        Ok(err) => err.with_status(status),
        Err(_) => ApiError::new("").with_status(status),
    }
}
