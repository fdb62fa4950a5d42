//! Thin wrappers over the server's resource areas.
//!
//! Each submodule covers one area of the REST API (`users`, `groups`,
//! `content`, `folders`, `tenants`, `search`). Handles are obtained from
//! the client (`client.users()`, …), are cheap clones of the request
//! context, and every operation is a path + method + parameter bag handed
//! to the shared dispatch core.

use serde::Deserialize;

use crate::params::Params;

pub mod content;
pub mod folders;
pub mod groups;
pub mod search;
pub mod tenants;
pub mod users;

/// One page of a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    #[serde(default)]
    pub total: u64,
    /// Offset of the first item on this page.
    #[serde(default)]
    pub offset: u64,
    /// Page size the server applied.
    #[serde(default)]
    pub limit: u64,
}

/// Paging and filtering knobs shared by list endpoints.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Free-text filter, where the endpoint supports one.
    pub q: Option<String>,
    /// Offset of the first item to return.
    pub offset: Option<u64>,
    /// Maximum number of items to return.
    pub limit: Option<u64>,
}

impl ListQuery {
    /// Fold the paging knobs into a parameter bag.
    pub(crate) fn apply(&self, params: Params) -> Params {
        self.apply_paging(params.set_opt("q", self.q.as_deref()))
    }

    /// Like [`ListQuery::apply`] but without the free-text filter, for
    /// endpoints that take the query term as an explicit argument.
    pub(crate) fn apply_paging(&self, params: Params) -> Params {
        params
            .set_opt("offset", self.offset)
            .set_opt("limit", self.limit)
    }
}
