//! `pixelbin list-files` – list files and folders, optionally every page.

use anyhow::{Context, Result};
use pixelbin_core::config::PixelbinSettings;
use pixelbin_core::platform::{ExploreItem, ListFilesQuery};

use super::platform_client;

fn print_items(items: &[ExploreItem]) {
    for item in items {
        let id = if item.file_id.is_empty() {
            &item.name
        } else {
            &item.file_id
        };
        println!("  {:<6}  {:>10}  {}", item.item_type, item.size, id);
    }
}

pub async fn run_list_files(
    cfg: &PixelbinSettings,
    path: Option<String>,
    name: Option<String>,
    all: bool,
) -> Result<()> {
    let client = platform_client(cfg)?;
    let query = ListFilesQuery {
        path,
        name,
        ..Default::default()
    };
    let items = tokio::task::spawn_blocking(move || -> Result<Vec<ExploreItem>> {
        if !all {
            return Ok(client.assets.list_files(&query)?.items);
        }
        let mut items = Vec::new();
        for page in client.assets.list_files_paginator(query) {
            items.extend(page?.items);
        }
        Ok(items)
    })
    .await
    .context("list-files task join")??;
    print_items(&items);
    Ok(())
}
