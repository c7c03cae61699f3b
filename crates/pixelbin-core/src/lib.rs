//! Pixelbin SDK core: transformation URL codec, delivery URL signing and a
//! client for the platform API.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod platform;
pub mod security;
pub mod signature;
pub mod url_codec;

pub use error::{ApiError, Error};
pub use security::{sign_url, SignUrlError};
pub use url_codec::{obj_to_url, url_to_obj, UrlError, UrlObject, UrlToObjOptions};
