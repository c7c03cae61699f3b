//! `pixelbin parse <url>` – print the structured form of a URL.

use anyhow::Result;
use pixelbin_core::url_codec::{url_to_obj, UrlToObjOptions};

pub fn run_parse(url: &str, custom_domain: bool) -> Result<()> {
    let parsed = url_to_obj(
        url,
        UrlToObjOptions {
            is_custom_domain: custom_domain,
        },
    )?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}
