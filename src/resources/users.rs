//! User accounts.

use reqwest::Method;
use serde::Deserialize;

use super::{ListQuery, Page};
use crate::params::{FilePart, Params};
use crate::util::encode_segment;
use crate::{ReefClient, Result};

/// A user account as the server reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    pub id: String,
    /// Login name, unique per tenant.
    pub username: String,
    /// Human-facing name, if set.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Primary email address, if set.
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the account may log in.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// The tenant the account lives in, if the server is multi-tenant.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

fn default_enabled() -> bool {
    true
}

/// Fields for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Initial password.
    pub password: String,
    /// Optional human-facing name.
    pub display_name: Option<String>,
    /// Optional email address.
    pub email: Option<String>,
}

/// Fields for updating a user. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New human-facing name.
    pub display_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
}

/// Handle for the `api/users` area. Obtained via [`ReefClient::users`].
#[derive(Debug, Clone)]
pub struct Users {
    client: ReefClient,
}

impl ReefClient {
    /// Wrappers for the user endpoints.
    pub fn users(&self) -> Users {
        Users {
            client: self.clone(),
        }
    }
}

impl Users {
    /// Fetch a user by id.
    pub async fn get(&self, id: &str) -> Result<User> {
        let path = format!("api/users/{}", encode_segment(id));
        self.client.call_json(Method::GET, &path, Params::new()).await
    }

    /// Fetch a user by login name.
    pub async fn get_by_username(&self, username: &str) -> Result<User> {
        let path = format!("api/users/by-username/{}", encode_segment(username));
        self.client.call_json(Method::GET, &path, Params::new()).await
    }

    /// List users, with paging and an optional free-text filter.
    pub async fn list(&self, query: ListQuery) -> Result<Page<User>> {
        let params = query.apply(Params::new());
        self.client.call_json(Method::GET, "api/users", params).await
    }

    /// Create a user.
    pub async fn create(&self, user: NewUser) -> Result<User> {
        let params = Params::new()
            .set("username", &user.username)
            .set("password", &user.password)
            .set_opt("displayName", user.display_name.as_deref())
            .set_opt("email", user.email.as_deref());
        self.client.call_json(Method::POST, "api/users", params).await
    }

    /// Update a user's profile fields.
    pub async fn update(&self, id: &str, update: UserUpdate) -> Result<User> {
        let path = format!("api/users/{}", encode_segment(id));
        let params = Params::new()
            .set_opt("displayName", update.display_name.as_deref())
            .set_opt("email", update.email.as_deref());
        self.client.call_json(Method::PUT, &path, params).await
    }

    /// Delete a user.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("api/users/{}", encode_segment(id));
        self.client.call_unit(Method::DELETE, &path, Params::new()).await
    }

    /// Enable or disable an account.
    pub async fn set_enabled(&self, id: &str, enabled: bool) -> Result<()> {
        let path = format!("api/users/{}/enabled", encode_segment(id));
        let params = Params::new().set("enabled", enabled);
        self.client.call_unit(Method::PUT, &path, params).await
    }

    /// Change a user's password.
    pub async fn update_password(&self, id: &str, new_password: &str) -> Result<()> {
        let path = format!("api/users/{}/password", encode_segment(id));
        let params = Params::new().set("password", new_password);
        self.client.call_unit(Method::PUT, &path, params).await
    }

    /// Upload an avatar image (multipart).
    pub async fn upload_avatar(&self, id: &str, image: FilePart) -> Result<()> {
        let path = format!("api/users/{}/avatar", encode_segment(id));
        let params = Params::new().file("avatar", image);
        self.client.call_unit(Method::POST, &path, params).await
    }
}
