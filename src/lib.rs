#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod client;
pub mod errors;
mod params;
mod request;
pub mod resources;
mod session;
mod util;

// --- PUBLIC API EXPORTS ---
// Request context
pub use client::{ReefClient, ReefClientBuilder};
// Parameter bag for the dispatch layer
pub use params::{FilePart, ParamValue, Params};
// Session state
pub use session::SessionInfo;

// Errors
pub use errors::{AuthError, BuildError, Error, RequestError, Result};

// Resource handles and response types
pub use resources::{
    content::{Content, ContentItem, ContentUpdate, NewContent},
    folders::{Folder, FolderUpdate, Folders, NewFolder},
    groups::{Group, GroupUpdate, Groups, NewGroup},
    search::{Search, SearchHit, SearchScope},
    tenants::{NewTenant, Tenant, TenantUpdate, Tenants},
    users::{NewUser, User, UserUpdate, Users},
    ListQuery, Page,
};

// Re-exports
pub use reqwest::{Method, StatusCode};
