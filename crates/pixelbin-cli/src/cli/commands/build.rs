//! `pixelbin build <file|->` – build a URL from a JSON object.

use anyhow::{Context, Result};
use pixelbin_core::config::PixelbinSettings;
use pixelbin_core::url_codec::{obj_to_url, UrlObject};
use std::io::Read;
use std::path::Path;

pub fn run_build(input: &Path, cfg: &PixelbinSettings) -> Result<()> {
    let data = if input == Path::new("-") {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("read url object from stdin")?;
        s
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("read url object from {}", input.display()))?
    };
    let mut obj: UrlObject = serde_json::from_str(&data).context("invalid url object")?;
    if obj.base_url.is_none() {
        obj.base_url = Some(cfg.cdn_base_url.clone());
    }
    println!("{}", obj_to_url(&obj)?);
    Ok(())
}
