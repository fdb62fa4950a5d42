//! Search across content, users and everything at once.

use std::fmt;

use reqwest::Method;
use serde::Deserialize;

use super::content::ContentItem;
use super::users::User;
use super::{ListQuery, Page};
use crate::params::Params;
use crate::{ReefClient, Result};

/// What the global search endpoint may match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Content items.
    Content,
    /// User accounts.
    Users,
    /// Folders.
    Folders,
    /// Groups.
    Groups,
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchScope::Content => "content",
            SearchScope::Users => "users",
            SearchScope::Folders => "folders",
            SearchScope::Groups => "groups",
        };
        f.write_str(s)
    }
}

/// One hit from the global search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    /// What kind of entity matched (`content`, `users`, ...).
    pub kind: String,
    /// Identifier of the matched entity.
    pub id: String,
    /// Display title of the matched entity.
    pub title: String,
    /// Highlighted excerpt, when the server provides one.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Relevance score, when the server provides one.
    #[serde(default)]
    pub score: Option<f64>,
}

/// Handle for the `api/search` area. Obtained via [`ReefClient::search`].
#[derive(Debug, Clone)]
pub struct Search {
    client: ReefClient,
}

impl ReefClient {
    /// Wrappers for the search endpoints.
    pub fn search(&self) -> Search {
        Search {
            client: self.clone(),
        }
    }
}

impl Search {
    /// Full-text search over content items.
    ///
    /// `q` is the search term; [`ListQuery::q`] is ignored here, only the
    /// paging knobs apply.
    pub async fn content(&self, q: &str, query: ListQuery) -> Result<Page<ContentItem>> {
        let params = query.apply_paging(Params::new().set("q", q));
        self.client
            .call_json(Method::GET, "api/search/content", params)
            .await
    }

    /// Search user accounts.
    ///
    /// `q` is the search term; [`ListQuery::q`] is ignored here, only the
    /// paging knobs apply.
    pub async fn users(&self, q: &str, query: ListQuery) -> Result<Page<User>> {
        let params = query.apply_paging(Params::new().set("q", q));
        self.client
            .call_json(Method::GET, "api/search/users", params)
            .await
    }

    /// Global search, optionally restricted to some entity kinds.
    ///
    /// An empty `scopes` slice searches everything. `q` is the search term;
    /// [`ListQuery::q`] is ignored here, only the paging knobs apply.
    pub async fn all(&self, q: &str, scopes: &[SearchScope], query: ListQuery) -> Result<Page<SearchHit>> {
        let mut params = Params::new().set("q", q);
        if !scopes.is_empty() {
            let types = scopes
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params = params.set("types", types);
        }
        let params = query.apply_paging(params);
        self.client.call_json(Method::GET, "api/search", params).await
    }
}
