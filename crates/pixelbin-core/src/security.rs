//! Signed delivery URLs.
//!
//! A private asset URL is authorized by three query parameters:
//! `pbs` (signature), `pbe` (expiry, unix seconds) and `pbt` (access key id).
//! The signature is `hex(HMAC-SHA256(token, path + expiry))`, where `path` is
//! the decoded URL path without its leading slash.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::url_codec::percent_decode;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignUrlError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("URL already has a signature")]
    AlreadySigned,
}

/// Signs `url` so that it stays valid for `expiry_seconds` from now.
pub fn sign_url(
    url: &str,
    expiry_seconds: u64,
    access_key: &str,
    token: &str,
) -> Result<String, SignUrlError> {
    sign_url_at(url, expiry_seconds, access_key, token, chrono::Utc::now().timestamp())
}

/// Like [`sign_url`] with an explicit current time (unix seconds).
pub fn sign_url_at(
    url: &str,
    expiry_seconds: u64,
    access_key: &str,
    token: &str,
    now_unix: i64,
) -> Result<String, SignUrlError> {
    let mut parsed = url::Url::parse(url)?;
    if parsed.query_pairs().any(|(k, v)| k == "pbs" && !v.is_empty()) {
        return Err(SignUrlError::AlreadySigned);
    }

    let expiry = now_unix.saturating_add(i64::try_from(expiry_seconds).unwrap_or(i64::MAX));
    let signature = generate_signature(parsed.path(), expiry, token);

    parsed
        .query_pairs_mut()
        .append_pair("pbs", &signature)
        .append_pair("pbe", &expiry.to_string())
        .append_pair("pbt", access_key);

    tracing::debug!(expiry, access_key, "signed delivery url");
    Ok(parsed.to_string())
}

fn generate_signature(encoded_path: &str, expiry: i64, key: &str) -> String {
    let path = percent_decode(encoded_path);
    let path = path.strip_prefix('/').unwrap_or(&path);
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(path.as_bytes());
    mac.update(expiry.to_string().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
