//! Textual grammar of a transformation chain.
//!
//! A chain is a `~`-separated list of operations. Plugin operations read
//! `plugin.name(k:v,k:v)`; preset references read `p:name` or `p:name(k:v)`.

use std::collections::BTreeMap;

use super::error::UrlError;
use super::model::{Transformation, TransformationValue};

pub const OPERATION_SEPARATOR: char = '~';
pub const PARAMETER_SEPARATOR: char = ',';
pub const PRESET_PLUGIN: &str = "p";
/// Pattern segment meaning "no transformation".
pub const ORIGINAL: &str = "original";
/// Path segment routing a request to the worker instead of the pipeline.
pub const WORKER_MARKER: &str = "wrkr";

/// Decodes a pattern segment into its ordered list of operations.
pub fn decode_pattern(pattern: &str) -> Result<Vec<Transformation>, UrlError> {
    if pattern.is_empty() || pattern == ORIGINAL {
        return Ok(Vec::new());
    }
    pattern
        .split(OPERATION_SEPARATOR)
        .map(decode_operation)
        .collect()
}

/// Decodes a single operation token.
///
/// Arguments are returned sorted by key; a repeated key keeps its last value.
pub fn decode_operation(token: &str) -> Result<Transformation, UrlError> {
    let full_name = token.split('(').next().unwrap_or_default();
    let preset_prefix = format!("{}:", PRESET_PLUGIN);

    let split = if token.starts_with(&preset_prefix) {
        full_name.split_once(':')
    } else {
        full_name.split_once('.')
    };
    let (plugin, name) = match split {
        Some((p, n)) if !p.is_empty() && !n.is_empty() => (p, n),
        _ => return Err(UrlError::MalformedOperation(token.to_string())),
    };

    let values = token
        .split_once('(')
        .map(|(_, args)| decode_arguments(args))
        .filter(|v| !v.is_empty());

    Ok(Transformation {
        plugin: plugin.to_string(),
        name: name.to_string(),
        values,
    })
}

fn decode_arguments(args: &str) -> Vec<TransformationValue> {
    let args = args.replace(')', "");
    let mut params = BTreeMap::new();
    for param in args.split(PARAMETER_SEPARATOR) {
        // Split on the first colon only so values such as URLs survive.
        if let Some((key, value)) = param.split_once(':') {
            if !key.is_empty() {
                params.insert(key.to_string(), value.to_string());
            }
        }
    }
    params
        .into_iter()
        .map(|(k, v)| TransformationValue::new(k, v))
        .collect()
}

/// Encodes operations into a pattern segment; an empty list becomes `original`.
///
/// Arguments are written in the order given.
pub fn encode_pattern(transformations: &[Transformation]) -> Result<String, UrlError> {
    if transformations.is_empty() {
        return Ok(ORIGINAL.to_string());
    }
    let ops = transformations
        .iter()
        .map(encode_operation)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ops.join(&OPERATION_SEPARATOR.to_string()))
}

fn encode_operation(t: &Transformation) -> Result<String, UrlError> {
    let mut params = Vec::new();
    for item in t.values.as_deref().unwrap_or_default() {
        let key = item.key.as_deref().ok_or(UrlError::KeyNotSpecified)?;
        let value = item
            .value
            .as_deref()
            .ok_or_else(|| UrlError::ValueNotSpecified(key.to_string()))?;
        params.push(format!("{}:{}", key, value));
    }
    let params = params.join(&PARAMETER_SEPARATOR.to_string());

    if t.plugin == PRESET_PLUGIN {
        if params.is_empty() {
            Ok(format!("{}:{}", t.plugin, t.name))
        } else {
            Ok(format!("{}:{}({})", t.plugin, t.name, params))
        }
    } else {
        Ok(format!("{}.{}({})", t.plugin, t.name, params))
    }
}
