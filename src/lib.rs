//! # git-group-backup
//!
//! Back up or mirror every repository of a GitLab group
//!
//! ## Usage
//!
//! ```txt
//! Usage: git-group-backup [OPTIONS] [COMMAND]
//!
//! Commands:
//!   backup  Clone (or pull) every repository into a local directory
//!   mirror  Create a pull mirror of every repository in a Gitea organization
//!   help    Print this message or the help of the given subcommand(s)
//!
//! Options:
//!       --gitlab-username <USERNAME>  Gitlab username [env: GITLAB_USERNAME=]
//!       --gitlab-token <TOKEN>        Gitlab token [env: GITLAB_TOKEN]
//!       --gitlab-endpoint <ENDPOINT>  Gitlab endpoint [env: GITLAB_ENDPOINT=]
//!       --gitlab-group <GROUP>        Gitlab group to back up [env: GITLAB_GROUP=]
//!   -c, --config <CONFIG>             Custom configuration file path
//!       --show-config-path            Show the current config path
//!       --debug                       Enable debug output (also enabled when DEBUG is set)
//!   -h, --help                        Print help
//!   -V, --version                     Print version
//! ```
//!
//! `backup` takes `--backup-dir` (`BACKUP_DIR`), `mirror` takes `--gitea-endpoint`,
//! `--gitea-token` and `--gitea-org` (`GITEA_ENDPOINT`, `GITEA_TOKEN`, `GITEA_ORG`).

#![warn(clippy::all, rust_2018_idioms, missing_docs)]
#![deny(
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub(crate) mod backup;
pub(crate) mod cli;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod macros;
pub(crate) mod mirror;
pub(crate) mod platform;
pub(crate) mod sync;
pub(crate) mod utils;
pub(crate) use macros::config_value;

mod gitea;
mod gitlab;

pub use backup::{BackupOutcome, LocalBackupAction};
pub use cli::{
    group_backup_main, BackupArgs, GitlabArgs, GroupBackupCli, GroupBackupCommand, MirrorArgs,
};
pub use config::{ActionConfig, ConfigData, GroupBackupConfig};
pub use errors::{GroupBackupError, GroupBackupErrorKind};
pub use gitea::{config::GiteaSettings, platform::GiteaPlatform};
pub use gitlab::{config::GitlabSettings, platform::GitlabPlatform};
pub use mirror::MirrorMigrationAction;
pub use platform::{
    Account, Credentials, DestinationPlatform, Group, MirrorRequest, Organization, PlatformFuture,
    Project, SourcePlatform,
};
pub use sync::{sync_projects, ProjectAction};
pub use utils::{build_action, list_projects, main_run, resolve_group};
