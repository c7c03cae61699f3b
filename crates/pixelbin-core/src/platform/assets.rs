use std::collections::BTreeMap;

use super::api_client::ApiClient;
use super::models::*;
use super::paginator::FilesPaginator;
use crate::error::Error;
use crate::http::Method;

const BASE: &str = "/service/platform/assets/v1.0";

/// File and folder operations.
#[derive(Debug, Clone)]
pub struct Assets {
    api: ApiClient,
}

fn no_query() -> BTreeMap<String, String> {
    BTreeMap::new()
}

impl Assets {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Uploads an asset fetched from a public URL.
    pub fn url_upload(&self, req: &UrlUploadRequest) -> Result<UploadResponse, Error> {
        self.api
            .call(Method::Post, &format!("{}/upload/url", BASE), no_query(), Some(req))
    }

    /// Returns a pre-signed S3 form the asset can be uploaded to directly.
    pub fn create_signed_url(
        &self,
        req: &SignedUploadRequest,
    ) -> Result<SignedUploadResponse, Error> {
        self.api.call(
            Method::Post,
            &format!("{}/upload/signed-url", BASE),
            no_query(),
            Some(req),
        )
    }

    /// Lists and searches files and folders.
    pub fn list_files(&self, query: &ListFilesQuery) -> Result<ListFilesResponse, Error> {
        self.api.call::<(), _>(
            Method::Get,
            &format!("{}/listFiles", BASE),
            query.to_query(),
            None,
        )
    }

    /// Iterates over `list_files` pages, starting at `query.page_no` (or 1).
    pub fn list_files_paginator(&self, query: ListFilesQuery) -> FilesPaginator {
        FilesPaginator::new(self.clone(), query)
    }

    /// File details by database `_id`.
    pub fn get_file_by_id(&self, id: &str) -> Result<FilesResponse, Error> {
        self.api
            .call::<(), _>(Method::Get, &format!("{}/files/id/{}", BASE, id), no_query(), None)
    }

    /// File details by path-like `fileId` (e.g. `animals/cat`).
    pub fn get_file_by_file_id(&self, file_id: &str) -> Result<FilesResponse, Error> {
        self.api
            .call::<(), _>(Method::Get, &format!("{}/files/{}", BASE, file_id), no_query(), None)
    }

    pub fn update_file(
        &self,
        file_id: &str,
        req: &UpdateFileRequest,
    ) -> Result<FilesResponse, Error> {
        self.api.call(
            Method::Patch,
            &format!("{}/files/{}", BASE, file_id),
            no_query(),
            Some(req),
        )
    }

    pub fn delete_file(&self, file_id: &str) -> Result<FilesResponse, Error> {
        self.api
            .call::<(), _>(Method::Delete, &format!("{}/files/{}", BASE, file_id), no_query(), None)
    }

    /// Deletes several files by `_id`.
    pub fn delete_files(&self, ids: &[String]) -> Result<Vec<FilesResponse>, Error> {
        let body = DeleteMultipleFilesRequest { ids: ids.to_vec() };
        self.api.call(
            Method::Post,
            &format!("{}/files/delete", BASE),
            no_query(),
            Some(&body),
        )
    }

    pub fn create_folder(&self, req: &CreateFolderRequest) -> Result<FoldersResponse, Error> {
        self.api
            .call(Method::Post, &format!("{}/folders", BASE), no_query(), Some(req))
    }

    pub fn update_folder(
        &self,
        folder_id: &str,
        req: &UpdateFolderRequest,
    ) -> Result<FoldersResponse, Error> {
        self.api.call(
            Method::Patch,
            &format!("{}/folders/{}", BASE, folder_id),
            no_query(),
            Some(req),
        )
    }

    /// Deletes a folder by `_id`, returning the removed folders.
    pub fn delete_folder(&self, id: &str) -> Result<Vec<FoldersResponse>, Error> {
        self.api
            .call::<(), _>(Method::Delete, &format!("{}/folders/{}", BASE, id), no_query(), None)
    }

    /// All transformation modules and the pattern delimiters.
    pub fn get_modules(&self) -> Result<TransformationModulesResponse, Error> {
        self.api.call::<(), _>(
            Method::Get,
            &format!("{}/playground/plugins", BASE),
            no_query(),
            None,
        )
    }

    pub fn get_module(&self, identifier: &str) -> Result<TransformationModuleResponse, Error> {
        self.api.call::<(), _>(
            Method::Get,
            &format!("{}/playground/plugins/{}", BASE, identifier),
            no_query(),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::api_client::testing::{client, RecordingExecutor};
    use crate::platform::Access;

    #[test]
    fn url_upload_posts_json() {
        let exec = RecordingExecutor::with_responses(&[
            r#"{"_id":"1","fileId":"animals/cat","url":"https://cdn.pixelbin.io/v2/x/original/animals/cat.jpeg"}"#,
        ]);
        let assets = Assets::new(client(exec.clone()));
        let resp = assets
            .url_upload(&UrlUploadRequest {
                url: "https://example.com/cat.jpeg".into(),
                path: Some("animals".into()),
                access: Some(Access::PublicRead),
                overwrite: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(resp.file_id, "animals/cat");

        let req = exec.last();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url, "https://api.pixelbin.io/service/platform/assets/v1.0/upload/url");
        assert_eq!(
            req.body,
            Some(serde_json::json!({
                "url": "https://example.com/cat.jpeg",
                "path": "animals",
                "access": "public-read",
                "overwrite": true
            }))
        );
    }

    #[test]
    fn list_files_sends_query() {
        let exec = RecordingExecutor::with_responses(&[r#"{"items":[],"page":{"hasNext":false}}"#]);
        let assets = Assets::new(client(exec.clone()));
        let resp = assets
            .list_files(&ListFilesQuery {
                name: Some("cat".into()),
                page_size: Some(10),
                ..Default::default()
            })
            .unwrap();
        assert!(resp.items.is_empty());
        let req = exec.last();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.query_string(), "name=cat&pageSize=10");
    }

    #[test]
    fn endpoints_use_expected_paths() {
        let exec = RecordingExecutor::with_responses(&["{}", "{}", "{}", "[]", "[]", "{}", "{}"]);
        let assets = Assets::new(client(exec.clone()));
        let base = "https://api.pixelbin.io/service/platform/assets/v1.0";

        assets.get_file_by_id("64f1").unwrap();
        assert_eq!(exec.last().url, format!("{}/files/id/64f1", base));
        assets.get_file_by_file_id("animals/cat").unwrap();
        assert_eq!(exec.last().url, format!("{}/files/animals/cat", base));
        assets
            .update_folder("f1", &UpdateFolderRequest { is_active: false })
            .unwrap();
        assert_eq!(exec.last().method, Method::Patch);
        assert_eq!(exec.last().body, Some(serde_json::json!({"isActive": false})));
        assets.delete_files(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(exec.last().url, format!("{}/files/delete", base));
        assert_eq!(exec.last().body, Some(serde_json::json!({"ids": ["a", "b"]})));
        assets.delete_folder("f1").unwrap();
        assert_eq!(exec.last().method, Method::Delete);
        assert_eq!(exec.last().body, None);
        assets.get_modules().unwrap();
        assert_eq!(exec.last().url, format!("{}/playground/plugins", base));
        assets.get_module("t").unwrap();
        assert_eq!(exec.last().url, format!("{}/playground/plugins/t", base));
    }
}
