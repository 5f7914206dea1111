//! Apply an action to every project of a group
use log::{debug, error, info};

use crate::platform::{PlatformFuture, Project};

/// Action applied to each project, one project at a time
pub trait ProjectAction: Sync + Send {
    /// Handle one project
    fn handle<'a>(&'a self, project: &'a Project) -> PlatformFuture<'a, ()>;

    /// Short name used in log lines
    fn name(&self) -> &str;
}

/// Run `action` on every project, in order.
///
/// Failures are logged and never stop the loop.
/// Returns the number of projects handled successfully.
pub async fn sync_projects(action: &dyn ProjectAction, projects: &[Project]) -> usize {
    let total = projects.len();
    let mut succeeded = 0;
    for (idx, project) in projects.iter().enumerate() {
        info!(
            "[{}/{}] {} {}...",
            idx + 1,
            total,
            action.name(),
            project.http_url
        );
        match action.handle(project).await {
            Ok(()) => {
                succeeded += 1;
            }
            Err(e) if e.is_conflict() => {
                debug!("Repository already exists url={} err={e}", project.http_url);
            }
            Err(e) => {
                error!(
                    "Unable to {} repository url={} err={e}",
                    action.name(),
                    project.http_url
                );
            }
        }
    }
    succeeded
}
