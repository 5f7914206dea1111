//! Source and destination platforms, and the data they exchange
use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};

use crate::errors::GroupBackupError;

/// Future returned by every platform call
pub type PlatformFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, GroupBackupError>> + Send + 'a>>;

/// Group (namespace) on the source platform
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq, Clone)]
pub struct Group {
    /// Group ID
    pub id: u64,

    /// Group name
    pub name: String,

    /// Full path of the group, including parent groups
    pub full_path: String,
}

/// Project (repository) of a group on the source platform
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq, Clone)]
pub struct Project {
    /// Project ID
    pub id: u64,

    /// Name of the project
    pub name: String,

    /// Description of the project
    pub description: String,

    /// HTTPS clone URL
    pub http_url: String,

    /// Name of the owning group
    pub group: String,
}

/// Organization on the destination platform
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq, Clone)]
pub struct Organization {
    /// Organization ID
    pub id: u64,

    /// Organization name
    pub name: String,
}

/// Authenticated account on the destination platform
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq, Clone)]
pub struct Account {
    /// Account ID
    pub id: u64,

    /// Login name
    pub login: String,
}

/// Username/token pair used to authenticate against the source platform
#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username
    pub username: String,

    /// Personal access token
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"***")
            .finish()
    }
}

/// Request to create a repository mirrored from a remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRequest {
    /// Address to clone from
    pub clone_addr: String,

    /// Credentials for the remote
    pub credentials: Credentials,

    /// Owning organization on the destination
    pub owner: Organization,

    /// Repository name on the destination
    pub repo_name: String,

    /// Repository description
    pub description: String,

    /// Keep the repository in sync with the remote
    pub mirror: bool,
}

/// Platform the repositories are read from
pub trait SourcePlatform: Sync + Send {
    /// Search groups matching `name`
    fn search_groups(&self, name: &str) -> PlatformFuture<'_, Vec<Group>>;

    /// List the projects of `group` (first page only)
    fn list_group_projects(&self, group: &Group) -> PlatformFuture<'_, Vec<Project>>;

    /// Base URL of the API
    fn get_remote_url(&self) -> &str;
}

/// Platform the repositories are mirrored to
pub trait DestinationPlatform: Sync + Send {
    /// Get an organization by name
    fn get_organization(&self, name: &str) -> PlatformFuture<'_, Organization>;

    /// Get the account owning the token
    fn get_current_user(&self) -> PlatformFuture<'_, Account>;

    /// Create a repository migrated from a remote
    fn create_migration(&self, request: MirrorRequest) -> PlatformFuture<'_, ()>;

    /// Base URL of the API
    fn get_remote_url(&self) -> &str;
}

/// Build the API base URL from a user supplied endpoint, appending `api_path` when missing
pub(crate) fn api_base_url(endpoint: &str, api_path: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.ends_with(api_path) {
        endpoint.to_string()
    } else {
        format!("{endpoint}{api_path}")
    }
}
