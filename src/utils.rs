//! Group resolution, project listing and the main run
use log::{debug, error, info};

use crate::{
    backup::LocalBackupAction,
    config::{ActionConfig, GroupBackupConfig},
    errors::{GroupBackupError, GroupBackupErrorKind},
    gitea::platform::GiteaPlatform,
    gitlab::platform::GitlabPlatform,
    mirror::MirrorMigrationAction,
    platform::{Group, Project, SourcePlatform},
    sync::{sync_projects, ProjectAction},
};

/// Find the group named `name`; exactly one group must match
/// # Errors
/// Error if the search fails or doesn't return exactly one group
pub async fn resolve_group(
    source: &dyn SourcePlatform,
    name: &str,
) -> Result<Group, GroupBackupError> {
    let groups = source
        .search_groups(name)
        .await
        .map_err(|e| GroupBackupError::new_with_source(GroupBackupErrorKind::HostQuery, e))?;
    let count = groups.len();
    let mut groups = groups.into_iter();
    match (groups.next(), groups.next()) {
        (Some(group), None) => {
            debug!("Resolved group {} (id {})", group.full_path, group.id);
            Ok(group)
        }
        _ => Err(GroupBackupError::new(GroupBackupErrorKind::AmbiguousGroup)
            .with_text(&format!("Could not get exact group match for {name} (count {count})"))),
    }
}

/// List the projects of every group, in order.
///
/// A group whose listing fails is logged and contributes no project.
pub async fn list_projects(source: &dyn SourcePlatform, groups: &[Group]) -> Vec<Project> {
    let mut all_projects = vec![];
    for group in groups {
        match source.list_group_projects(group).await {
            Ok(projects) => {
                debug!("Listed {} projects in group {}", projects.len(), group.name);
                all_projects.extend(projects);
            }
            Err(e) => {
                let e = GroupBackupError::new_with_source(GroupBackupErrorKind::GroupListing, e);
                error!("Unable to list projects group={} err={e}", group.name);
            }
        }
    }
    all_projects
}

/// Build the per-project action. In mirror mode this resolves the destination organization.
/// # Errors
/// Error if the destination organization can't be resolved
pub async fn build_action(
    config: &GroupBackupConfig,
) -> Result<Box<dyn ProjectAction>, GroupBackupError> {
    let credentials = config.gitlab.credentials.clone();
    let action: Box<dyn ProjectAction> = match &config.action {
        ActionConfig::Backup { backup_dir } => {
            info!("Backing up into {}", backup_dir.display());
            Box::new(LocalBackupAction::new(backup_dir.clone(), credentials))
        }
        ActionConfig::Mirror(gitea) => {
            let destination = GiteaPlatform::new(&gitea.endpoint, gitea.token.clone());
            Box::new(
                MirrorMigrationAction::try_new(Box::new(destination), &gitea.org, credentials)
                    .await?,
            )
        }
    };
    Ok(action)
}

/// Main function: resolve the group, list its projects and handle each one
/// # Errors
/// Error if a step that blocks the whole run fails
pub async fn main_run(config: &GroupBackupConfig) -> Result<(), GroupBackupError> {
    let action = build_action(config).await?;
    let source = GitlabPlatform::new(
        &config.gitlab.endpoint,
        config.gitlab.credentials.token.clone(),
    );
    info!("Using {} as source", source.get_remote_url());

    let group = resolve_group(&source, &config.gitlab.group).await?;
    let projects = list_projects(&source, &[group]).await;
    info!("Number of projects: {}", projects.len());

    sync_projects(action.as_ref(), &projects).await;
    Ok(())
}
