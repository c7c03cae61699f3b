//! Structured form of a Pixelbin CDN URL.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::UrlError;

/// One `key:value` argument of a transformation.
///
/// Both halves are optional so that hand-built objects missing one of them
/// can be reported by the encoder instead of being rejected at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationValue {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl TransformationValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

/// One operation in a transformation chain, e.g. `t.resize(h:600,w:800)` or `p:preset1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    pub plugin: String,
    pub name: String,
    /// `None` when the operation carries no parameters (never `Some(vec![])` after decoding).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<TransformationValue>>,
}

impl Transformation {
    pub fn new(plugin: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            name: name.into(),
            values: None,
        }
    }

    /// Builder-style helper appending a `key:value` argument.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .get_or_insert_with(Vec::new)
            .push(TransformationValue::new(key, value));
        self
    }
}

/// Recognized query options exactly as they appeared in a parsed URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpr: Option<String>,
    #[serde(default, rename = "f_auto", skip_serializing_if = "Option::is_none")]
    pub f_auto: Option<String>,
}

impl QueryOptions {
    pub fn is_empty(&self) -> bool {
        self.dpr.is_none() && self.f_auto.is_none()
    }
}

/// Result of parsing a Pixelbin URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedUrl {
    /// Scheme and host, e.g. `https://cdn.pixelbin.io`.
    pub base_url: String,
    pub version: String,
    /// Present only for managed-domain URLs.
    pub cloud_name: Option<String>,
    pub zone: Option<String>,
    pub worker: bool,
    pub worker_path: String,
    /// Raw chain text, `original`, or empty in worker mode.
    pub pattern: String,
    pub file_path: String,
    pub options: QueryOptions,
    pub transformations: Vec<Transformation>,
}

/// Device pixel ratio accepted by the CDN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DprValue {
    Auto,
    /// Whole ratio in `1..=5`.
    Level(u8),
    /// Fractional ratio in `0.1..=5.0`, rendered with one decimal place.
    Decimal(f64),
}

impl DprValue {
    pub fn level(n: i64) -> Result<Self, UrlError> {
        if (1..=5).contains(&n) {
            Ok(DprValue::Level(n as u8))
        } else {
            Err(UrlError::InvalidDpr)
        }
    }

    pub fn decimal(v: f64) -> Result<Self, UrlError> {
        if v.is_finite() && (0.1..=5.0).contains(&v) {
            Ok(DprValue::Decimal(v))
        } else {
            Err(UrlError::InvalidDpr)
        }
    }

    /// Re-checks the range of a value that may have been built from a variant directly.
    pub fn checked(self) -> Result<Self, UrlError> {
        match self {
            DprValue::Auto => Ok(self),
            DprValue::Level(n) => DprValue::level(i64::from(n)),
            DprValue::Decimal(v) => DprValue::decimal(v),
        }
    }
}

impl fmt::Display for DprValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DprValue::Auto => write!(f, "auto"),
            DprValue::Level(n) => write!(f, "{}", n),
            DprValue::Decimal(v) => write!(f, "{:.1}", v),
        }
    }
}

impl FromStr for DprValue {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "auto" {
            return Ok(DprValue::Auto);
        }
        if let Ok(n) = s.parse::<i64>() {
            return DprValue::level(n);
        }
        match s.parse::<f64>() {
            Ok(v) => DprValue::decimal(v),
            Err(_) => Err(UrlError::InvalidDpr),
        }
    }
}

/// Wire shape of a dpr value in JSON: `"auto"`, an integer, or a float.
#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum RawDpr {
    Int(i64),
    Float(f64),
    Text(String),
}

impl TryFrom<RawDpr> for DprValue {
    type Error = UrlError;

    fn try_from(raw: RawDpr) -> Result<Self, Self::Error> {
        match raw {
            RawDpr::Int(n) => DprValue::level(n),
            RawDpr::Float(v) => DprValue::decimal(v),
            RawDpr::Text(s) if s == "auto" => Ok(DprValue::Auto),
            RawDpr::Text(_) => Err(UrlError::InvalidDpr),
        }
    }
}

impl Serialize for DprValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = match *self {
            DprValue::Auto => RawDpr::Text("auto".to_string()),
            DprValue::Level(n) => RawDpr::Int(i64::from(n)),
            DprValue::Decimal(v) => RawDpr::Float(v),
        };
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DprValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDpr::deserialize(deserializer)?;
        DprValue::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Wire shape of `f_auto`: anything but a boolean is rejected with the option's own message.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFAuto {
    Bool(bool),
    Other(serde::de::IgnoredAny),
}

fn deserialize_f_auto<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    match Option::<RawFAuto>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawFAuto::Bool(b)) => Ok(Some(b)),
        Some(RawFAuto::Other(_)) => Err(serde::de::Error::custom(UrlError::InvalidFAuto)),
    }
}

/// Validated query options for building a URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpr: Option<DprValue>,
    #[serde(
        default,
        rename = "f_auto",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_f_auto"
    )]
    pub f_auto: Option<bool>,
}

impl TryFrom<&QueryOptions> for UrlOptions {
    type Error = UrlError;

    fn try_from(raw: &QueryOptions) -> Result<Self, Self::Error> {
        let dpr = raw.dpr.as_deref().map(str::parse::<DprValue>).transpose()?;
        let f_auto = match raw.f_auto.as_deref() {
            None => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(_) => return Err(UrlError::InvalidFAuto),
        };
        Ok(UrlOptions { dpr, f_auto })
    }
}

/// Input for building a URL. Only `file_path` (or `worker_path` in worker
/// mode) and, outside custom domains, `cloud_name` are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlObject {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub cloud_name: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub is_custom_domain: bool,
    #[serde(default)]
    pub worker: bool,
    #[serde(default)]
    pub worker_path: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub options: UrlOptions,
    #[serde(default)]
    pub transformations: Vec<Transformation>,
}

impl TryFrom<&ParsedUrl> for UrlObject {
    type Error = UrlError;

    fn try_from(parsed: &ParsedUrl) -> Result<Self, Self::Error> {
        let (worker_path, file_path) = if parsed.worker {
            (Some(parsed.worker_path.clone()), None)
        } else {
            (None, Some(parsed.file_path.clone()))
        };
        Ok(UrlObject {
            base_url: Some(parsed.base_url.clone()),
            version: Some(parsed.version.clone()),
            cloud_name: parsed.cloud_name.clone(),
            zone: parsed.zone.clone(),
            is_custom_domain: parsed.cloud_name.is_none(),
            worker: parsed.worker,
            worker_path,
            file_path,
            options: UrlOptions::try_from(&parsed.options)?,
            transformations: parsed.transformations.clone(),
        })
    }
}
