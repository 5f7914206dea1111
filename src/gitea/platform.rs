//! Gitea platform implementation
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    StatusCode,
};
use urlencoding::encode;

use super::{
    repo::{GiteaMigrateRepo, GiteaOrganization, GiteaUser},
    GITEA_API_PATH,
};
use crate::{
    errors::{GroupBackupError, GroupBackupErrorKind},
    platform::{
        api_base_url, Account, DestinationPlatform, MirrorRequest, Organization, PlatformFuture,
    },
};

/// Gitea platform
#[derive(Default, Debug, Clone)]
pub struct GiteaPlatform {
    /// API base URL
    api_url: String,

    /// Gitea token
    token: String,

    /// Reqwest client
    client: reqwest::Client,
}

impl GiteaPlatform {
    /// Create a new gitea platform from the instance endpoint
    pub fn new(endpoint: &str, token: String) -> Self {
        Self {
            api_url: api_base_url(endpoint, GITEA_API_PATH),
            token,
            client: reqwest::Client::new(),
        }
    }

    /// GET `url` and decode the JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, GroupBackupError> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/json")
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

impl DestinationPlatform for GiteaPlatform {
    fn get_remote_url(&self) -> &str {
        &self.api_url
    }

    fn get_organization(&self, name: &str) -> PlatformFuture<'_, Organization> {
        let name = name.to_string();
        Box::pin(async move {
            let url = format!("{}/orgs/{}", self.api_url, encode(&name));
            let org: GiteaOrganization = self.get_json(&url).await?;
            let mut org: Organization = org.into();
            if org.name.is_empty() {
                org.name = name;
            }
            Ok(org)
        })
    }

    fn get_current_user(&self) -> PlatformFuture<'_, Account> {
        Box::pin(async move {
            let url = format!("{}/user", self.api_url);
            let user: GiteaUser = self.get_json(&url).await?;
            Ok(user.into())
        })
    }

    fn create_migration(&self, request: MirrorRequest) -> PlatformFuture<'_, ()> {
        Box::pin(async move {
            let url = format!("{}/repos/migrate", self.api_url);
            let json_body: GiteaMigrateRepo = request.into();
            let response = self
                .client
                .post(&url)
                .header(AUTHORIZATION, format!("token {}", self.token))
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json")
                .json(&json_body)
                .send()
                .await?;
            let status = response.status();
            if status.is_success() {
                return Ok(());
            }
            let text = response.text().await?;
            let kind = if status == StatusCode::CONFLICT {
                GroupBackupErrorKind::Conflict
            } else {
                GroupBackupErrorKind::Migration
            };
            Err(GroupBackupError::new(kind).with_text(&format!("{status} {text}")))
        })
    }
}
