//! Request signing for the platform API.
//!
//! Every API call carries an `x-ebg-param` timestamp and an `x-ebg-signature`
//! computed over a canonical form of the request:
//!
//! ```text
//! METHOD
//! /path
//! query-string
//! header:value\n ...        (all signed-over headers, sorted by name)
//! host;x-ebg-param          (names of the signed headers, sorted)
//! sha256-hex(json body)
//! ```
//!
//! The signature is `v1:` + hex(HMAC-SHA256(key, timestamp + "\n" + sha256-hex(canonical))).

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

type HmacSha256 = Hmac<Sha256>;

pub const PARAM_HEADER: &str = "x-ebg-param";
pub const SIGNATURE_HEADER: &str = "x-ebg-signature";
const SIGNED_HEADER_PREFIX: &str = "x-ebg-";
/// Key shared with the platform for request signatures.
const SIGNING_KEY: &[u8] = b"1234567";

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("cannot serialize request body for signing: {0}")]
    Body(#[from] serde_json::Error),
}

/// Request parts that take part in the signature.
#[derive(Debug, Clone, Default)]
pub struct SignatureRequest {
    /// API origin, e.g. `https://api.pixelbin.io`.
    pub domain: String,
    pub method: String,
    /// Path relative to `domain`, e.g. `/service/platform/assets/v1.0/listFiles`.
    pub path: String,
    pub query_string: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
    /// Headers sent with the request but left out of the signature.
    pub exclude_headers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub headers: BTreeMap<String, String>,
    pub query_string: String,
}

/// Signs `req` using the current time.
pub fn sign_request(req: &SignatureRequest, sign_query: bool) -> Result<SignedRequest, SignError> {
    sign_request_at(req, sign_query, Utc::now())
}

/// Signs `req` as of `now`. With `sign_query` the timestamp and signature are
/// appended to the query string instead of being sent as headers.
pub fn sign_request_at(
    req: &SignatureRequest,
    sign_query: bool,
    now: DateTime<Utc>,
) -> Result<SignedRequest, SignError> {
    let timestamp = format_timestamp(now);
    let mut headers = req.headers.clone();
    let mut query_string = req.query_string.clone();

    let host = req
        .domain
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    headers.insert("host".to_string(), host.to_string());
    if sign_query {
        if query_string.is_empty() {
            query_string = format!("?{}={}", PARAM_HEADER, timestamp);
        } else {
            query_string = format!("{}&{}={}", query_string, PARAM_HEADER, timestamp);
        }
    } else {
        headers.insert(PARAM_HEADER.to_string(), timestamp.clone());
    }

    let excluded: Vec<(String, String)> = req
        .exclude_headers
        .iter()
        .filter_map(|name| headers.remove(name).map(|v| (name.clone(), v)))
        .collect();

    let headers_block: String = headers
        .iter()
        .map(|(k, v)| format!("{}:{}\n", k, v))
        .collect();

    let mut signed_headers: Vec<String> = headers
        .keys()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| k == "host" || k.starts_with(SIGNED_HEADER_PREFIX))
        .collect();
    signed_headers.sort();

    let body_hash = match &req.body {
        Some(body) => sha256_hex(serde_json::to_string(body)?.as_bytes()),
        None => sha256_hex(b""),
    };

    let canonical = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        req.method.to_uppercase(),
        req.path,
        query_string,
        headers_block,
        signed_headers.join(";"),
        body_hash
    );
    let string_to_sign = format!("{}\n{}", timestamp, sha256_hex(canonical.as_bytes()));

    let mut mac = HmacSha256::new_from_slice(SIGNING_KEY).expect("HMAC can take key of any size");
    mac.update(string_to_sign.as_bytes());
    let signature = format!("v1:{}", hex::encode(mac.finalize().into_bytes()));
    tracing::trace!(method = %req.method, path = %req.path, "signed request");

    if sign_query {
        query_string = format!("{}&{}={}", query_string, SIGNATURE_HEADER, signature);
    } else {
        headers.insert(SIGNATURE_HEADER.to_string(), signature);
    }
    for (name, value) in excluded {
        if !value.is_empty() {
            headers.insert(name, value);
        }
    }

    Ok(SignedRequest {
        headers,
        query_string,
    })
}

/// `YYYYMMDDTHHMMSSZ` (RFC 3339 with `-` and `:` removed).
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%SZ").to_string()
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn request() -> SignatureRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), "Bearer dG9rZW4=".to_string());
        SignatureRequest {
            domain: "https://api.pixelbin.io".to_string(),
            method: "get".to_string(),
            path: "/service/platform/assets/v1.0/listFiles".to_string(),
            query_string: "name=cat".to_string(),
            headers,
            body: None,
            exclude_headers: vec!["Authorization".to_string(), "Content-Type".to_string()],
        }
    }

    #[test]
    fn timestamp_format() {
        assert_eq!(format_timestamp(now()), "20240102T030405Z");
    }

    #[test]
    fn signature_matches_canonical_request() {
        let signed = sign_request_at(&request(), false, now()).unwrap();

        let canonical = "GET\n/service/platform/assets/v1.0/listFiles\nname=cat\n\
host:api.pixelbin.io\nx-ebg-param:20240102T030405Z\n\n\
host;x-ebg-param\n\
e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        let to_sign = format!("20240102T030405Z\n{}", sha256_hex(canonical.as_bytes()));
        let mut mac = HmacSha256::new_from_slice(SIGNING_KEY).unwrap();
        mac.update(to_sign.as_bytes());
        let expected = format!("v1:{}", hex::encode(mac.finalize().into_bytes()));

        assert_eq!(signed.headers.get(SIGNATURE_HEADER), Some(&expected));
        assert_eq!(signed.headers.get("host").map(String::as_str), Some("api.pixelbin.io"));
        assert_eq!(
            signed.headers.get(PARAM_HEADER).map(String::as_str),
            Some("20240102T030405Z")
        );
        assert_eq!(signed.query_string, "name=cat");
    }

    #[test]
    fn excluded_headers_are_restored() {
        let signed = sign_request_at(&request(), false, now()).unwrap();
        assert_eq!(
            signed.headers.get("Authorization").map(String::as_str),
            Some("Bearer dG9rZW4=")
        );
        assert!(!signed.headers.contains_key("Content-Type"));
    }

    #[test]
    fn body_changes_signature() {
        let a = sign_request_at(&request(), false, now()).unwrap();
        let mut req = request();
        req.body = Some(serde_json::json!({"ids": ["a"]}));
        let b = sign_request_at(&req, false, now()).unwrap();
        assert_ne!(a.headers.get(SIGNATURE_HEADER), b.headers.get(SIGNATURE_HEADER));
    }

    #[test]
    fn query_signing_appends_params() {
        let mut req = request();
        req.query_string.clear();
        let signed = sign_request_at(&req, true, now()).unwrap();
        assert!(signed
            .query_string
            .starts_with("?x-ebg-param=20240102T030405Z&x-ebg-signature=v1:"));
        assert!(!signed.headers.contains_key(SIGNATURE_HEADER));
        assert!(!signed.headers.contains_key(PARAM_HEADER));
    }
}
