//! Gitlab platform implementation
use reqwest::header::ACCEPT;

use super::{
    repo::{GitlabGroup, GitlabProject},
    GITLAB_API_PATH, GITLAB_TOKEN_HEADER,
};
use crate::{
    errors::{GroupBackupError, GroupBackupErrorKind},
    platform::{api_base_url, Group, PlatformFuture, Project, SourcePlatform},
};

/// Gitlab platform
#[derive(Default, Debug, Clone)]
pub struct GitlabPlatform {
    /// API base URL
    api_url: String,

    /// Gitlab token
    token: String,

    /// Reqwest client
    client: reqwest::Client,
}

impl GitlabPlatform {
    /// Create a new gitlab platform from the instance endpoint
    pub fn new(endpoint: &str, token: String) -> Self {
        Self {
            api_url: api_base_url(endpoint, GITLAB_API_PATH),
            token,
            client: reqwest::Client::new(),
        }
    }

    /// GET `url` and decode the JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GroupBackupError> {
        let response = self
            .client
            .get(url)
            .header(GITLAB_TOKEN_HEADER, &self.token)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(GroupBackupError::new(GroupBackupErrorKind::Api)
                .with_text(&format!("{status} {text}")));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl SourcePlatform for GitlabPlatform {
    fn get_remote_url(&self) -> &str {
        &self.api_url
    }

    fn search_groups(&self, name: &str) -> PlatformFuture<'_, Vec<Group>> {
        let name = name.to_string();
        Box::pin(async move {
            let url = format!("{}/groups", self.api_url);
            let groups: Vec<GitlabGroup> = self.get_json(&url, &[("search", name.as_str())]).await?;
            Ok(groups.into_iter().map(|g| g.into()).collect())
        })
    }

    fn list_group_projects(&self, group: &Group) -> PlatformFuture<'_, Vec<Project>> {
        let group = group.clone();
        Box::pin(async move {
            let url = format!("{}/groups/{}/projects", self.api_url, group.id);
            let projects: Vec<GitlabProject> = self.get_json(&url, &[]).await?;
            Ok(projects
                .into_iter()
                .map(|p| p.into_project(&group))
                .collect())
        })
    }
}
