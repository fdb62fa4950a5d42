//! Folders: the containers content items live in.

use reqwest::Method;
use serde::Deserialize;

use super::{ListQuery, Page};
use crate::params::Params;
use crate::util::encode_segment;
use crate::{ReefClient, Result};

/// A folder as the server reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct Folder {
    /// Server-assigned identifier.
    pub id: String,
    /// Folder name.
    pub name: String,
    /// Parent folder id; `None` for a tenant's root folder.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Server-side path, when the server includes it.
    #[serde(default)]
    pub path: Option<String>,
}

/// Fields for creating a folder.
#[derive(Debug, Clone)]
pub struct NewFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder to create it in.
    pub parent_id: String,
}

/// Fields for updating a folder. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct FolderUpdate {
    /// New folder name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Handle for the `api/folders` area. Obtained via [`ReefClient::folders`].
#[derive(Debug, Clone)]
pub struct Folders {
    client: ReefClient,
}

impl ReefClient {
    /// Wrappers for the folder endpoints.
    pub fn folders(&self) -> Folders {
        Folders {
            client: self.clone(),
        }
    }
}

impl Folders {
    /// Fetch a folder by id.
    pub async fn get(&self, id: &str) -> Result<Folder> {
        let path = format!("api/folders/{}", encode_segment(id));
        self.client.call_json(Method::GET, &path, Params::new()).await
    }

    /// List a folder's direct subfolders.
    pub async fn list_children(&self, id: &str, query: ListQuery) -> Result<Page<Folder>> {
        let path = format!("api/folders/{}/children", encode_segment(id));
        let params = query.apply(Params::new());
        self.client.call_json(Method::GET, &path, params).await
    }

    /// Create a folder.
    pub async fn create(&self, folder: NewFolder) -> Result<Folder> {
        let params = Params::new()
            .set("name", &folder.name)
            .set("parent", &folder.parent_id);
        self.client.call_json(Method::POST, "api/folders", params).await
    }

    /// Update a folder.
    pub async fn update(&self, id: &str, update: FolderUpdate) -> Result<Folder> {
        let path = format!("api/folders/{}", encode_segment(id));
        let params = Params::new()
            .set_opt("name", update.name.as_deref())
            .set_opt("description", update.description.as_deref());
        self.client.call_json(Method::PUT, &path, params).await
    }

    /// Delete a folder (and, server-side, its contents).
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("api/folders/{}", encode_segment(id));
        self.client.call_unit(Method::DELETE, &path, Params::new()).await
    }

    /// Move a folder under a new parent.
    pub async fn move_to(&self, id: &str, new_parent_id: &str) -> Result<Folder> {
        let path = format!("api/folders/{}/parent", encode_segment(id));
        let params = Params::new().set("parent", new_parent_id);
        self.client.call_json(Method::PUT, &path, params).await
    }
}
