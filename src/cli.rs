//! Command line options for the git-group-backup tool
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use crate::{config::GroupBackupConfig, errors::GroupBackupError, utils::main_run};

/// git-group-backup - Back up or mirror every repository of a GitLab group
#[derive(Parser, Clone, Debug)]
#[command(version, about)]
pub struct GroupBackupCli {
    /// Gitlab connection options
    #[command(flatten)]
    pub gitlab: GitlabArgs,

    /// Custom configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show the current config path
    #[arg(long)]
    pub show_config_path: bool,

    /// Enable debug output (also enabled when DEBUG is set)
    #[arg(long, global = true)]
    pub debug: bool,

    /// What to do with the repositories
    #[command(subcommand)]
    pub command: Option<GroupBackupCommand>,
}

/// Gitlab connection options
#[derive(Args, Clone, Debug, Default)]
pub struct GitlabArgs {
    /// Gitlab username
    #[arg(long = "gitlab-username", env = "GITLAB_USERNAME", global = true)]
    pub username: Option<String>,

    /// Gitlab token
    #[arg(
        long = "gitlab-token",
        env = "GITLAB_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// Gitlab endpoint
    #[arg(long = "gitlab-endpoint", env = "GITLAB_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Gitlab group to back up
    #[arg(long = "gitlab-group", env = "GITLAB_GROUP", global = true)]
    pub group: Option<String>,
}

/// Action applied to every project of the group
#[derive(Subcommand, Clone, Debug)]
pub enum GroupBackupCommand {
    /// Clone (or pull) every repository into a local directory
    Backup(BackupArgs),

    /// Create a pull mirror of every repository in a Gitea organization
    Mirror(MirrorArgs),
}

/// Options of the `backup` command
#[derive(Args, Clone, Debug, Default)]
pub struct BackupArgs {
    /// Where to create the clones
    #[arg(long = "backup-dir", env = "BACKUP_DIR")]
    pub backup_dir: Option<String>,
}

/// Options of the `mirror` command
#[derive(Args, Clone, Debug, Default)]
pub struct MirrorArgs {
    /// Gitea endpoint
    #[arg(long = "gitea-endpoint", env = "GITEA_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Gitea token
    #[arg(long = "gitea-token", env = "GITEA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Gitea organization receiving the mirrors
    #[arg(long = "gitea-org", env = "GITEA_ORG")]
    pub org: Option<String>,
}

impl GroupBackupCli {
    /// Debug output is enabled by `--debug` or by the presence of `DEBUG`, whatever its value
    pub fn debug_enabled(&self) -> bool {
        self.debug || std::env::var_os("DEBUG").is_some()
    }

    /// Log level to configure the logger with
    pub fn log_level(&self) -> LevelFilter {
        if self.debug_enabled() {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Run the git-group-backup tool with the provided command line options
/// # Errors
/// Error if the configuration is incomplete or a fatal step of the run fails
pub async fn group_backup_main(args: GroupBackupCli) -> Result<(), GroupBackupError> {
    if args.show_config_path {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => GroupBackupConfig::get_config_path()?,
        };
        println!("{}", path.display());
        return Ok(());
    }
    let config = GroupBackupConfig::try_new(args)?;
    main_run(&config).await
}
