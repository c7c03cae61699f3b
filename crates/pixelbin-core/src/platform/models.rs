//! Request and response bodies of the platform API.
//!
//! Response models default every field so partial payloads still decode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::enums::Access;

type Metadata = serde_json::Map<String, serde_json::Value>;

fn is_false(b: &bool) -> bool {
    !*b
}

/// Body of `url_upload`: fetch an asset from a public URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlUploadRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "is_false")]
    pub overwrite: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub filename_override: bool,
}

/// Body of `create_signed_url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUploadRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "is_false")]
    pub overwrite: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub filename_override: bool,
}

/// Filters for `list_files`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilesQuery {
    pub name: Option<String>,
    pub path: Option<String>,
    pub format: Option<String>,
    pub tags: Vec<String>,
    pub only_files: bool,
    pub only_folders: bool,
    pub page_no: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Option<String>,
}

impl ListFilesQuery {
    pub fn to_query(&self) -> BTreeMap<String, String> {
        let mut q = BTreeMap::new();
        let mut put = |k: &str, v: Option<String>| {
            if let Some(v) = v {
                q.insert(k.to_string(), v);
            }
        };
        put("name", self.name.clone());
        put("path", self.path.clone());
        put("format", self.format.clone());
        put(
            "tags",
            (!self.tags.is_empty()).then(|| self.tags.join(",")),
        );
        put("onlyFiles", self.only_files.then(|| "true".to_string()));
        put("onlyFolders", self.only_folders.then(|| "true".to_string()));
        put("pageNo", self.page_no.map(|n| n.to_string()));
        put("pageSize", self.page_size.map(|n| n.to_string()));
        put("sort", self.sort.clone());
        q
    }
}

/// Body of `update_file`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateFolderRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteMultipleFilesRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub file_id: String,
    pub name: String,
    pub path: String,
    pub format: String,
    pub size: u64,
    pub access: Option<Access>,
    pub tags: Vec<String>,
    pub metadata: Metadata,
    pub url: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilesResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub path: String,
    pub file_id: String,
    pub format: String,
    pub size: u64,
    pub access: Option<Access>,
    pub is_active: bool,
    pub tags: Vec<String>,
    pub metadata: Metadata,
    pub url: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FoldersResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub path: String,
    pub is_active: bool,
}

/// A file or folder in a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExploreItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// `file` or `folder`.
    #[serde(rename = "type")]
    pub item_type: String,
    pub path: String,
    pub file_id: String,
    pub format: String,
    pub size: u64,
    pub access: Option<Access>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    /// Pagination style, `number` for page-number pagination.
    #[serde(rename = "type")]
    pub page_type: String,
    pub size: u64,
    pub current: u64,
    pub has_next: bool,
    pub item_total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFilesResponse {
    pub items: Vec<ExploreItem>,
    pub page: Page,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresignedUrl {
    pub url: String,
    pub fields: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignedUploadResponse {
    pub s3_presigned_url: PresignedUrl,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Delimiter {
    pub operation_separator: String,
    pub parameter_separator: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationModuleResponse {
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub credentials: Metadata,
    pub operations: Vec<serde_json::Value>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformationModulesResponse {
    pub delimiters: Delimiter,
    pub plugins: BTreeMap<String, TransformationModuleResponse>,
    pub presets: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationDetail {
    #[serde(rename = "_id")]
    pub id: u64,
    pub name: String,
    pub cloud_name: String,
    pub owner_id: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppDetail {
    #[serde(rename = "_id")]
    pub id: u64,
    pub org_id: u64,
    pub name: String,
    pub token: String,
    pub permissions: Vec<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOrgDetails {
    pub app: AppDetail,
    pub org: OrganizationDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_request_omits_unset_fields() {
        let req = UrlUploadRequest {
            url: "https://example.com/a.jpeg".into(),
            access: Some(Access::Private),
            tags: vec!["cat".into()],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"url": "https://example.com/a.jpeg", "access": "private", "tags": ["cat"]})
        );
    }

    #[test]
    fn list_query_skips_defaults() {
        assert!(ListFilesQuery::default().to_query().is_empty());
        let q = ListFilesQuery {
            path: Some("animals".into()),
            tags: vec!["cat".into(), "dog".into()],
            only_files: true,
            page_no: Some(2),
            ..Default::default()
        }
        .to_query();
        assert_eq!(q.get("path").map(String::as_str), Some("animals"));
        assert_eq!(q.get("tags").map(String::as_str), Some("cat,dog"));
        assert_eq!(q.get("onlyFiles").map(String::as_str), Some("true"));
        assert_eq!(q.get("pageNo").map(String::as_str), Some("2"));
        assert!(!q.contains_key("onlyFolders"));
    }

    #[test]
    fn list_response_decodes_partial_items() {
        let resp: ListFilesResponse = serde_json::from_str(
            r#"{"items":[{"_id":"1","name":"animals","type":"folder","path":""},
                         {"_id":"2","name":"cat","type":"file","fileId":"animals/cat","access":"public-read","size":1024}],
                "page":{"type":"number","size":2,"current":1,"hasNext":true,"itemTotal":7}}"#,
        )
        .unwrap();
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].item_type, "folder");
        assert_eq!(resp.items[0].access, None);
        assert_eq!(resp.items[1].access, Some(Access::PublicRead));
        assert!(resp.page.has_next);
        assert_eq!(resp.page.item_total, 7);
    }

    #[test]
    fn app_org_details_decode() {
        let d: AppOrgDetails = serde_json::from_str(
            r#"{"app":{"_id":12,"orgId":3,"name":"sdk","permissions":["read"]},
                "org":{"_id":3,"cloudName":"red-scene-95b6ea","active":true}}"#,
        )
        .unwrap();
        assert_eq!(d.app.org_id, 3);
        assert_eq!(d.org.cloud_name, "red-scene-95b6ea");
        assert!(d.org.active);
    }
}
