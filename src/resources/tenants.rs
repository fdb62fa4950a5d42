//! Tenant administration. These endpoints require an administrator session.

use reqwest::Method;
use serde::Deserialize;

use super::{ListQuery, Page};
use crate::params::Params;
use crate::util::encode_segment;
use crate::{ReefClient, Result};

/// A tenant as the server reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct Tenant {
    /// Server-assigned identifier.
    pub id: String,
    /// Tenant display name.
    pub name: String,
    /// The domain the tenant answers on, if configured.
    #[serde(default)]
    pub domain: Option<String>,
    /// Whether the tenant is active.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Storage quota in bytes; `None` means unlimited.
    #[serde(default)]
    pub quota_bytes: Option<u64>,
}

fn default_enabled() -> bool {
    true
}

/// Fields for creating a tenant.
#[derive(Debug, Clone)]
pub struct NewTenant {
    /// Tenant display name.
    pub name: String,
    /// Optional domain the tenant answers on.
    pub domain: Option<String>,
}

/// Fields for updating a tenant. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TenantUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New domain.
    pub domain: Option<String>,
}

/// Handle for the `api/admin/tenants` area. Obtained via
/// [`ReefClient::tenants`].
#[derive(Debug, Clone)]
pub struct Tenants {
    client: ReefClient,
}

impl ReefClient {
    /// Wrappers for the tenant administration endpoints.
    pub fn tenants(&self) -> Tenants {
        Tenants {
            client: self.clone(),
        }
    }
}

impl Tenants {
    /// Fetch a tenant by id.
    pub async fn get(&self, id: &str) -> Result<Tenant> {
        let path = format!("api/admin/tenants/{}", encode_segment(id));
        self.client.call_json(Method::GET, &path, Params::new()).await
    }

    /// List tenants.
    pub async fn list(&self, query: ListQuery) -> Result<Page<Tenant>> {
        let params = query.apply(Params::new());
        self.client
            .call_json(Method::GET, "api/admin/tenants", params)
            .await
    }

    /// Create a tenant.
    pub async fn create(&self, tenant: NewTenant) -> Result<Tenant> {
        let params = Params::new()
            .set("name", &tenant.name)
            .set_opt("domain", tenant.domain.as_deref());
        self.client
            .call_json(Method::POST, "api/admin/tenants", params)
            .await
    }

    /// Update a tenant.
    pub async fn update(&self, id: &str, update: TenantUpdate) -> Result<Tenant> {
        let path = format!("api/admin/tenants/{}", encode_segment(id));
        let params = Params::new()
            .set_opt("name", update.name.as_deref())
            .set_opt("domain", update.domain.as_deref());
        self.client.call_json(Method::PUT, &path, params).await
    }

    /// Delete a tenant.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("api/admin/tenants/{}", encode_segment(id));
        self.client.call_unit(Method::DELETE, &path, Params::new()).await
    }

    /// Activate or deactivate a tenant.
    pub async fn set_enabled(&self, id: &str, enabled: bool) -> Result<()> {
        let path = format!("api/admin/tenants/{}/enabled", encode_segment(id));
        let params = Params::new().set("enabled", enabled);
        self.client.call_unit(Method::PUT, &path, params).await
    }

    /// Set a tenant's storage quota in bytes. `None` removes the quota.
    pub async fn set_quota(&self, id: &str, quota_bytes: Option<u64>) -> Result<()> {
        let path = format!("api/admin/tenants/{}/quota", encode_segment(id));
        let params = Params::new().set_opt("quota", quota_bytes);
        self.client.call_unit(Method::PUT, &path, params).await
    }
}
