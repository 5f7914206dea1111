//! Gitlab group and project payloads
use crate::platform::{Group, Project};
use serde::{Deserialize, Serialize};

/// Gitlab group
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct GitlabGroup {
    /// Group id
    pub id: u64,

    /// Group name
    pub name: String,

    /// Full path, including parent groups
    #[serde(default)]
    pub full_path: String,
}

/// Gitlab project
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct GitlabProject {
    /// Project id
    pub id: u64,

    /// Project name
    pub name: String,

    /// Project description
    pub description: Option<String>,

    /// HTTPS clone URL
    pub http_url_to_repo: String,

    /// Owning namespace
    #[serde(default)]
    pub namespace: Option<GitlabNamespace>,
}

/// Namespace a project lives in
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct GitlabNamespace {
    /// Namespace name
    pub name: String,
}

impl From<GitlabGroup> for Group {
    fn from(group: GitlabGroup) -> Self {
        Group {
            id: group.id,
            name: group.name,
            full_path: group.full_path,
        }
    }
}

impl GitlabProject {
    /// Convert to a [`Project`], falling back to `group` when the namespace is absent
    pub(crate) fn into_project(self, group: &Group) -> Project {
        Project {
            id: self.id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            http_url: self.http_url_to_repo,
            group: self
                .namespace
                .map(|n| n.name)
                .unwrap_or_else(|| group.name.clone()),
        }
    }
}
