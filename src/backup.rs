//! Local backup: clone new repositories, fast-forward existing ones
use std::path::{Path, PathBuf};

use git2::{
    build::CheckoutBuilder, build::RepoBuilder, Cred, ErrorCode, FetchOptions, RemoteCallbacks,
};
use log::{debug, info};
use url::Url;

use crate::{
    errors::{GroupBackupError, GroupBackupErrorKind},
    platform::{Credentials, PlatformFuture, Project},
    sync::ProjectAction,
};

/// Marker of a working copy
const GIT_MARKER: &str = ".git";

/// Remote pulled from
const DEFAULT_REMOTE: &str = "origin";

/// What happened to a backed up repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    /// First backup, full clone
    Cloned,

    /// Already present, nothing new on the remote
    UpToDate,

    /// Already present, local branch fast-forwarded
    FastForwarded,

    /// The remote has no commit yet, nothing kept locally
    Empty,
}

/// Clone or pull every project under a backup directory
#[derive(Debug, Clone)]
pub struct LocalBackupAction {
    /// Root of the backups
    backup_dir: PathBuf,

    /// Basic auth credentials for clones and pulls
    credentials: Credentials,
}

impl LocalBackupAction {
    /// Create a new backup action
    pub fn new(backup_dir: PathBuf, credentials: Credentials) -> Self {
        Self {
            backup_dir,
            credentials,
        }
    }

    /// Local path of the backup of `remote`: the backup dir joined with the URL path, minus `.git`.
    /// # Errors
    /// Error if the URL is invalid or doesn't use https
    pub fn backup_target(&self, remote: &str) -> Result<PathBuf, GroupBackupError> {
        let url = Url::parse(remote).map_err(|e| {
            GroupBackupError::new_with_source(GroupBackupErrorKind::InvalidUrl, e).with_url(remote)
        })?;
        if url.scheme() != "https" {
            return Err(GroupBackupError::new(GroupBackupErrorKind::UnsupportedScheme)
                .with_text(&format!("{} is not supported at the moment", url.scheme()))
                .with_url(remote));
        }
        let path = url.path().trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let invalid_path = || {
            GroupBackupError::new(GroupBackupErrorKind::InvalidUrl)
                .with_text("the URL path can't be used as a backup location")
                .with_url(remote)
        };
        let mut target = self.backup_dir.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let segment = urlencoding::decode(segment).map_err(|_| invalid_path())?;
            if segment == "." || segment == ".." || segment.contains(['/', '\\']) {
                return Err(invalid_path());
            }
            target.push(&*segment);
        }
        if target == self.backup_dir {
            return Err(invalid_path());
        }
        Ok(target)
    }

    /// Back up one repository
    /// # Errors
    /// Error if the URL is rejected, or if the clone or the pull fails
    pub async fn backup(&self, remote: &str) -> Result<BackupOutcome, GroupBackupError> {
        let target = self.backup_target(remote)?;
        let remote = remote.to_string();
        let credentials = self.credentials.clone();
        tokio::task::spawn_blocking(move || sync_repository(&remote, &target, &credentials))
            .await
            .map_err(|e| GroupBackupError::new_with_source(GroupBackupErrorKind::Task, e))?
    }
}

impl ProjectAction for LocalBackupAction {
    fn handle<'a>(&'a self, project: &'a Project) -> PlatformFuture<'a, ()> {
        Box::pin(async move {
            let outcome = self.backup(&project.http_url).await?;
            info!("{}: {:?}", project.http_url, outcome);
            Ok(())
        })
    }

    fn name(&self) -> &str {
        "backup"
    }
}

/// Clone `remote` into `target` when `target` isn't a working copy yet, pull otherwise
pub(crate) fn sync_repository(
    remote: &str,
    target: &Path,
    credentials: &Credentials,
) -> Result<BackupOutcome, GroupBackupError> {
    if target.join(GIT_MARKER).exists() {
        if !has_unborn_head(target) {
            return pull_repository(target, credentials).map_err(|e| e.with_url(remote));
        }
        // no commit to keep, start over from a fresh clone
        debug!("Removing empty working copy {}", target.display());
        remove_working_copy(remote, target)?;
    }
    info!("Cloning new repository repo={remote}");
    clone_repository(remote, target, credentials)
}

/// Whether `target` opens as a repository whose HEAD has no commit
fn has_unborn_head(target: &Path) -> bool {
    git2::Repository::open(target).is_ok_and(|repo| is_unborn(&repo))
}

/// Whether HEAD points to a branch without any commit
fn is_unborn(repo: &git2::Repository) -> bool {
    matches!(repo.head(), Err(e) if e.code() == ErrorCode::UnbornBranch)
}

/// Delete a working copy so the next backup clones again
fn remove_working_copy(remote: &str, target: &Path) -> Result<(), GroupBackupError> {
    std::fs::remove_dir_all(target).map_err(|e| {
        GroupBackupError::new_with_source(GroupBackupErrorKind::Clone, e).with_url(remote)
    })
}

/// Callbacks answering credential requests with the basic auth pair, once
fn remote_callbacks(credentials: &Credentials) -> RemoteCallbacks<'static> {
    let username = credentials.username.clone();
    let token = credentials.token.clone();
    let mut attempted = false;
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |_url, _username_from_url, _allowed| {
        if attempted {
            return Err(git2::Error::from_str("credentials rejected"));
        }
        attempted = true;
        Cred::userpass_plaintext(&username, &token)
    });
    callbacks
}

/// Clone the full history of `remote` into `target`.
///
/// A remote without commits leaves nothing behind.
fn clone_repository(
    remote: &str,
    target: &Path,
    credentials: &Credentials,
) -> Result<BackupOutcome, GroupBackupError> {
    let clone_err = |e: git2::Error| {
        GroupBackupError::new_with_source(GroupBackupErrorKind::Clone, e).with_url(remote)
    };
    std::fs::create_dir_all(target).map_err(|e| {
        GroupBackupError::new_with_source(GroupBackupErrorKind::Clone, e).with_url(remote)
    })?;
    let mut fetch_opts = FetchOptions::new();
    fetch_opts.remote_callbacks(remote_callbacks(credentials));
    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_opts);
    let repo = builder.clone(remote, target).map_err(clone_err)?;
    let unborn = is_unborn(&repo);
    drop(repo);
    if unborn {
        info!("Remote has no commit yet repo={remote}");
        remove_working_copy(remote, target)?;
        return Ok(BackupOutcome::Empty);
    }
    Ok(BackupOutcome::Cloned)
}

/// Fetch the current branch from origin and fast-forward it
fn pull_repository(
    target: &Path,
    credentials: &Credentials,
) -> Result<BackupOutcome, GroupBackupError> {
    let open_err =
        |e: git2::Error| GroupBackupError::new_with_source(GroupBackupErrorKind::Open, e);
    let pull_err =
        |e: git2::Error| GroupBackupError::new_with_source(GroupBackupErrorKind::Pull, e);

    debug!("Opening repository {}", target.display());
    let repo = git2::Repository::open(target).map_err(open_err)?;
    debug!("Opening worktree");
    if repo.is_bare() {
        return Err(GroupBackupError::new(GroupBackupErrorKind::Open)
            .with_text("repository has no working tree"));
    }
    let branch = {
        let head = repo.head().map_err(open_err)?;
        match (head.is_branch(), head.shorthand()) {
            (true, Some(name)) => name.to_string(),
            _ => {
                return Err(GroupBackupError::new(GroupBackupErrorKind::Open)
                    .with_text("HEAD isn't on a branch"))
            }
        }
    };

    debug!("Pulling {branch} from {DEFAULT_REMOTE}");
    let mut remote = repo.find_remote(DEFAULT_REMOTE).map_err(pull_err)?;
    let mut fetch_opts = FetchOptions::new();
    fetch_opts.remote_callbacks(remote_callbacks(credentials));
    remote
        .fetch(&[branch.as_str()], Some(&mut fetch_opts), None)
        .map_err(pull_err)?;

    let fetch_head = repo.find_reference("FETCH_HEAD").map_err(pull_err)?;
    let fetch_commit = repo
        .reference_to_annotated_commit(&fetch_head)
        .map_err(pull_err)?;
    let (analysis, _) = repo.merge_analysis(&[&fetch_commit]).map_err(pull_err)?;
    if analysis.is_up_to_date() {
        return Ok(BackupOutcome::UpToDate);
    }
    if !analysis.is_fast_forward() {
        return Err(GroupBackupError::new(GroupBackupErrorKind::Pull)
            .with_text("local branch has diverged from origin, can't fast-forward"));
    }
    let refname = format!("refs/heads/{branch}");
    let mut reference = repo.find_reference(&refname).map_err(pull_err)?;
    reference
        .set_target(fetch_commit.id(), "pull: fast-forward")
        .map_err(pull_err)?;
    repo.set_head(&refname).map_err(pull_err)?;
    repo.checkout_head(Some(CheckoutBuilder::default().force()))
        .map_err(pull_err)?;
    Ok(BackupOutcome::FastForwarded)
}
