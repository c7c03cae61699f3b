//! [`UrlObject`] → URL string.

use super::error::UrlError;
use super::grammar::{self, WORKER_MARKER};
use super::model::{UrlObject, UrlOptions};
use super::parse::{is_version_token, is_zone_slug};

/// Origin used when the object has no `base_url`.
pub const DEFAULT_BASE_URL: &str = "https://cdn.pixelbin.io";
/// Version written when the object has none or an unknown one.
const BUILD_DEFAULT_VERSION: &str = "v2";

/// Serializes `obj` into a canonical Pixelbin URL.
///
/// Missing `version` and invalid `zone` values are defaulted or dropped
/// rather than rejected.
pub fn build(obj: &UrlObject) -> Result<String, UrlError> {
    let base_url = obj.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

    if !obj.is_custom_domain && obj.cloud_name.is_none() {
        return Err(UrlError::MissingCloudName);
    }
    if obj.is_custom_domain && obj.cloud_name.is_some() {
        return Err(UrlError::CloudNameOnCustomDomain);
    }

    let (pattern, tail) = if obj.worker {
        let worker_path = obj.worker_path.as_deref().ok_or(UrlError::MissingWorkerPath)?;
        (WORKER_MARKER.to_string(), worker_path)
    } else {
        let file_path = obj.file_path.as_deref().ok_or(UrlError::MissingFilePath)?;
        (grammar::encode_pattern(&obj.transformations)?, file_path)
    };

    let version = obj
        .version
        .as_deref()
        .filter(|v| is_version_token(v))
        .unwrap_or(BUILD_DEFAULT_VERSION);
    let zone = obj.zone.as_deref().filter(|z| is_zone_slug(z));

    let segments: Vec<&str> = [
        Some(base_url),
        Some(version),
        obj.cloud_name.as_deref(),
        zone,
        Some(pattern.as_str()),
        Some(tail),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut out = segments.join("/");
    let query = query_string(&obj.options)?;
    if !query.is_empty() {
        out.push('?');
        out.push_str(&query);
    }
    Ok(out)
}

/// `dpr` then `f_auto`. A directly constructed out-of-range dpr is rejected here.
fn query_string(options: &UrlOptions) -> Result<String, UrlError> {
    let mut parts = Vec::new();
    if let Some(dpr) = options.dpr {
        parts.push(format!("dpr={}", dpr.checked()?));
    }
    if let Some(f_auto) = options.f_auto {
        parts.push(format!("f_auto={}", f_auto));
    }
    Ok(parts.join("&"))
}
