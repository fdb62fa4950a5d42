//! Content items: documents living inside folders.

use bytes::Bytes;
use futures_util::Stream;
use reqwest::Method;
use serde::Deserialize;

use super::{ListQuery, Page};
use crate::params::{FilePart, Params};
use crate::util::encode_segment;
use crate::{ReefClient, Result};

/// A content item as the server reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentItem {
    /// Server-assigned identifier.
    pub id: String,
    /// File or document name.
    pub name: String,
    /// The folder containing the item.
    #[serde(default)]
    pub folder_id: Option<String>,
    /// MIME type of the stored body.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Size of the stored body in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Current version number.
    #[serde(default)]
    pub version: Option<u32>,
    /// Id of the user that created the item.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Fields for creating a content item without a body.
#[derive(Debug, Clone)]
pub struct NewContent {
    /// Item name.
    pub name: String,
    /// Folder to create the item in.
    pub folder_id: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Fields for updating a content item's metadata.
#[derive(Debug, Clone, Default)]
pub struct ContentUpdate {
    /// New item name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Handle for the `api/content` area. Obtained via [`ReefClient::content`].
#[derive(Debug, Clone)]
pub struct Content {
    client: ReefClient,
}

impl ReefClient {
    /// Wrappers for the content endpoints.
    pub fn content(&self) -> Content {
        Content {
            client: self.clone(),
        }
    }
}

impl Content {
    /// Fetch a content item's metadata by id.
    pub async fn get(&self, id: &str) -> Result<ContentItem> {
        let path = format!("api/content/{}", encode_segment(id));
        self.client.call_json(Method::GET, &path, Params::new()).await
    }

    /// List the content items in a folder.
    pub async fn list(&self, folder_id: &str, query: ListQuery) -> Result<Page<ContentItem>> {
        let path = format!("api/folders/{}/content", encode_segment(folder_id));
        let params = query.apply(Params::new());
        self.client.call_json(Method::GET, &path, params).await
    }

    /// Create a content item without a body.
    pub async fn create(&self, content: NewContent) -> Result<ContentItem> {
        let params = Params::new()
            .set("name", &content.name)
            .set("folder", &content.folder_id)
            .set_opt("description", content.description.as_deref());
        self.client.call_json(Method::POST, "api/content", params).await
    }

    /// Update a content item's metadata.
    pub async fn update(&self, id: &str, update: ContentUpdate) -> Result<ContentItem> {
        let path = format!("api/content/{}", encode_segment(id));
        let params = Params::new()
            .set_opt("name", update.name.as_deref())
            .set_opt("description", update.description.as_deref());
        self.client.call_json(Method::PUT, &path, params).await
    }

    /// Delete a content item.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("api/content/{}", encode_segment(id));
        self.client.call_unit(Method::DELETE, &path, Params::new()).await
    }

    /// Upload a file into a folder, creating a new content item.
    ///
    /// `name` overrides the item name; the part's file name is the default.
    pub async fn upload(
        &self,
        folder_id: &str,
        file: FilePart,
        name: Option<&str>,
    ) -> Result<ContentItem> {
        let item_name = name.unwrap_or_else(|| file.file_name()).to_string();
        let params = Params::new()
            .set("folder", folder_id)
            .set("name", item_name)
            .file("file", file);
        self.client
            .call_json(Method::POST, "api/content/upload", params)
            .await
    }

    /// Replace an item's body with a new file, creating a new version.
    pub async fn update_body(&self, id: &str, file: FilePart) -> Result<ContentItem> {
        let path = format!("api/content/{}/body", encode_segment(id));
        let params = Params::new().file("file", file);
        self.client.call_json(Method::POST, &path, params).await
    }

    /// Download an item's body into memory.
    pub async fn download(&self, id: &str) -> Result<Bytes> {
        let path = format!("api/content/{}/download", encode_segment(id));
        self.client.call_bytes(Method::GET, &path, Params::new()).await
    }

    /// Download an item's body as a byte stream.
    ///
    /// Prefer this over [`Content::download`] for large bodies.
    pub async fn download_stream(&self, id: &str) -> Result<impl Stream<Item = Result<Bytes>>> {
        let path = format!("api/content/{}/download", encode_segment(id));
        self.client.call_stream(Method::GET, &path, Params::new()).await
    }
}
