//! Codec between Pixelbin CDN URLs and their structured form.
//!
//! A URL such as
//! `https://cdn.pixelbin.io/v2/my-cloud/z-slug/t.resize(h:600,w:800)~t.flip()/dir/a.jpeg?dpr=2`
//! decomposes into version, cloud name, zone, transformation pattern, file
//! path and query options. [`url_to_obj`] parses, [`obj_to_url`] serializes.
//!
//! The two directions are not exact inverses: parsing sorts transformation
//! arguments by key and reports `v1` when no version is present, while
//! building keeps argument order as given and writes `v2` by default.

mod build;
mod domain;
mod error;
mod grammar;
mod model;
mod parse;

pub use build::DEFAULT_BASE_URL;
pub(crate) use parse::percent_decode;
pub use domain::{DomainMode, UrlToObjOptions};
pub use error::{ErrorKind, UrlError};
pub use grammar::{
    decode_operation, decode_pattern, encode_pattern, OPERATION_SEPARATOR, ORIGINAL,
    PARAMETER_SEPARATOR, PRESET_PLUGIN, WORKER_MARKER,
};
pub use model::{
    DprValue, ParsedUrl, QueryOptions, Transformation, TransformationValue, UrlObject, UrlOptions,
};

/// Parses a Pixelbin URL into its structured form.
pub fn url_to_obj(url: &str, opts: UrlToObjOptions) -> Result<ParsedUrl, UrlError> {
    parse::parse(url, opts.mode())
}

/// Builds a Pixelbin URL from its structured form.
pub fn obj_to_url(obj: &UrlObject) -> Result<String, UrlError> {
    build::build(obj)
}
