//! Gitea payloads
use serde::{Deserialize, Serialize};

use crate::platform::{Account, MirrorRequest, Organization};

/// Gitea organization
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct GiteaOrganization {
    /// Organization id
    pub id: u64,

    /// Organization name
    #[serde(default)]
    pub username: String,
}

/// Gitea user
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct GiteaUser {
    /// User id
    pub id: u64,

    /// Login name
    #[serde(default)]
    pub login: String,
}

/// Body of `POST /repos/migrate`
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GiteaMigrateRepo {
    /// Address to clone from
    pub clone_addr: String,

    /// Username for the remote
    pub auth_username: String,

    /// Password or token for the remote
    pub auth_password: String,

    /// Owner id (older Gitea versions)
    pub uid: u64,

    /// Owner name
    pub repo_owner: String,

    /// Repository name
    pub repo_name: String,

    /// Repository description
    pub description: String,

    /// Create a pull mirror instead of a one-shot copy
    pub mirror: bool,
}

impl From<GiteaOrganization> for Organization {
    fn from(org: GiteaOrganization) -> Self {
        Organization {
            id: org.id,
            name: org.username,
        }
    }
}

impl From<GiteaUser> for Account {
    fn from(user: GiteaUser) -> Self {
        Account {
            id: user.id,
            login: user.login,
        }
    }
}

impl From<MirrorRequest> for GiteaMigrateRepo {
    fn from(request: MirrorRequest) -> Self {
        GiteaMigrateRepo {
            clone_addr: request.clone_addr,
            auth_username: request.credentials.username,
            auth_password: request.credentials.token,
            uid: request.owner.id,
            repo_owner: request.owner.name,
            repo_name: request.repo_name,
            description: request.description,
            mirror: request.mirror,
        }
    }
}
