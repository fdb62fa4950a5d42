//! User groups and their memberships.

use reqwest::Method;
use serde::Deserialize;

use super::users::User;
use super::{ListQuery, Page};
use crate::params::Params;
use crate::util::encode_segment;
use crate::{ReefClient, Result};

/// A group as the server reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    /// Server-assigned identifier.
    pub id: String,
    /// Group name, unique per tenant.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Number of members, when the server includes it.
    #[serde(default)]
    pub member_count: Option<u64>,
}

/// Fields for creating a group.
#[derive(Debug, Clone)]
pub struct NewGroup {
    /// Group name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Fields for updating a group. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct GroupUpdate {
    /// New group name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Handle for the `api/groups` area. Obtained via [`ReefClient::groups`].
#[derive(Debug, Clone)]
pub struct Groups {
    client: ReefClient,
}

impl ReefClient {
    /// Wrappers for the group endpoints.
    pub fn groups(&self) -> Groups {
        Groups {
            client: self.clone(),
        }
    }
}

impl Groups {
    /// Fetch a group by id.
    pub async fn get(&self, id: &str) -> Result<Group> {
        let path = format!("api/groups/{}", encode_segment(id));
        self.client.call_json(Method::GET, &path, Params::new()).await
    }

    /// List groups, with paging and an optional free-text filter.
    pub async fn list(&self, query: ListQuery) -> Result<Page<Group>> {
        let params = query.apply(Params::new());
        self.client.call_json(Method::GET, "api/groups", params).await
    }

    /// Create a group.
    pub async fn create(&self, group: NewGroup) -> Result<Group> {
        let params = Params::new()
            .set("name", &group.name)
            .set_opt("description", group.description.as_deref());
        self.client.call_json(Method::POST, "api/groups", params).await
    }

    /// Update a group.
    pub async fn update(&self, id: &str, update: GroupUpdate) -> Result<Group> {
        let path = format!("api/groups/{}", encode_segment(id));
        let params = Params::new()
            .set_opt("name", update.name.as_deref())
            .set_opt("description", update.description.as_deref());
        self.client.call_json(Method::PUT, &path, params).await
    }

    /// Delete a group.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("api/groups/{}", encode_segment(id));
        self.client.call_unit(Method::DELETE, &path, Params::new()).await
    }

    /// List the members of a group.
    pub async fn members(&self, id: &str, query: ListQuery) -> Result<Page<User>> {
        let path = format!("api/groups/{}/members", encode_segment(id));
        let params = query.apply(Params::new());
        self.client.call_json(Method::GET, &path, params).await
    }

    /// Add a user to a group.
    pub async fn add_member(&self, id: &str, user_id: &str) -> Result<()> {
        let path = format!("api/groups/{}/members", encode_segment(id));
        let params = Params::new().set("user", user_id);
        self.client.call_unit(Method::POST, &path, params).await
    }

    /// Remove a user from a group.
    pub async fn remove_member(&self, id: &str, user_id: &str) -> Result<()> {
        let path = format!(
            "api/groups/{}/members/{}",
            encode_segment(id),
            encode_segment(user_id)
        );
        self.client.call_unit(Method::DELETE, &path, Params::new()).await
    }
}
