//! Remote mirror: create a pull mirror of every project on the destination
use log::{debug, info};

use crate::{
    errors::{GroupBackupError, GroupBackupErrorKind},
    platform::{
        Credentials, DestinationPlatform, MirrorRequest, Organization, PlatformFuture, Project,
    },
    sync::ProjectAction,
};

/// Mirror every project into one organization of the destination platform
pub struct MirrorMigrationAction {
    /// Destination platform
    destination: Box<dyn DestinationPlatform>,

    /// Organization receiving the mirrors, resolved once
    organization: Organization,

    /// Source credentials handed to the destination for pulling
    credentials: Credentials,
}

impl MirrorMigrationAction {
    /// Resolve the destination organization and create the action
    /// # Errors
    /// Error if the organization can't be resolved; nothing can be mirrored then
    pub async fn try_new(
        destination: Box<dyn DestinationPlatform>,
        org_name: &str,
        credentials: Credentials,
    ) -> Result<Self, GroupBackupError> {
        let organization = destination
            .get_organization(org_name)
            .await
            .map_err(|e| {
                GroupBackupError::new_with_source(GroupBackupErrorKind::DestinationOrg, e)
            })?;
        info!(
            "Mirroring to organization {} (id {}) on {}",
            organization.name,
            organization.id,
            destination.get_remote_url()
        );
        Ok(Self {
            destination,
            organization,
            credentials,
        })
    }

    /// Organization receiving the mirrors
    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    /// Create the mirror of one project
    /// # Errors
    /// Error if the destination credentials are rejected, or if the migration fails
    /// (`Conflict` when the repository already exists)
    pub async fn migrate(&self, project: &Project) -> Result<(), GroupBackupError> {
        let user = self
            .destination
            .get_current_user()
            .await
            .map_err(|e| GroupBackupError::new_with_source(GroupBackupErrorKind::Credential, e))?;
        debug!("Authenticated as {} (id {})", user.login, user.id);

        let request = MirrorRequest {
            clone_addr: project.http_url.clone(),
            credentials: self.credentials.clone(),
            owner: self.organization.clone(),
            repo_name: project.name.clone(),
            description: project.description.clone(),
            mirror: true,
        };
        self.destination
            .create_migration(request)
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    e
                } else {
                    GroupBackupError::new_with_source(GroupBackupErrorKind::Migration, e)
                }
            })
            .map_err(|e| e.with_url(&project.http_url))
    }
}

impl ProjectAction for MirrorMigrationAction {
    fn handle<'a>(&'a self, project: &'a Project) -> PlatformFuture<'a, ()> {
        Box::pin(async move {
            self.migrate(project).await?;
            info!(
                "Mirrored {} as {}/{}",
                project.http_url, self.organization.name, project.name
            );
            Ok(())
        })
    }

    fn name(&self) -> &str {
        "mirror"
    }
}
