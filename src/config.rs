//! Configuration handling
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use home::home_dir;
use serde::Deserialize;

use crate::{
    cli::{GroupBackupCli, GroupBackupCommand},
    config_value,
    errors::{GroupBackupError, GroupBackupErrorKind},
    gitea::config::{GiteaConfig, GiteaSettings},
    gitlab::config::{GitlabConfig, GitlabSettings},
};

/// Resolved, immutable configuration of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBackupConfig {
    /// Source platform settings
    pub gitlab: GitlabSettings,

    /// What to do with every project
    pub action: ActionConfig,

    /// Debug output enabled
    pub debug: bool,
}

/// Per-project action selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionConfig {
    /// Clone or pull into a local directory
    Backup {
        /// Root of the backups
        backup_dir: PathBuf,
    },

    /// Mirror into a Gitea organization
    Mirror(GiteaSettings),
}

/// Content of the configuration file
#[derive(Deserialize, Default, Clone, Debug)]
pub struct ConfigData {
    /// Where to create the clones
    pub backup_dir: Option<String>,

    /// Gitlab configuration
    pub gitlab: Option<GitlabConfig>,

    /// Gitea configuration
    pub gitea: Option<GiteaConfig>,
}

impl GroupBackupConfig {
    /// Build the configuration from the command line and the configuration file.
    ///
    /// An explicit `--config` path must be readable; the default path is only read when it exists.
    /// # Errors
    /// Error if the config file can't be read or a required option is missing
    pub fn try_new(cli_args: GroupBackupCli) -> Result<Self, GroupBackupError> {
        let config_data = match &cli_args.config {
            Some(path) => Some(Self::read_config_file(path)?),
            None => match Self::get_config_path() {
                Ok(path) if path.exists() => Some(Self::read_config_file(&path)?),
                _ => None,
            },
        };
        Self::from_parts(cli_args, config_data.unwrap_or_default())
    }

    /// Build the configuration from already loaded parts.
    ///
    /// Every missing option is reported at once, nothing is partially accepted.
    /// # Errors
    /// Error if a required option is missing
    pub fn from_parts(
        cli_args: GroupBackupCli,
        config_data: ConfigData,
    ) -> Result<Self, GroupBackupError> {
        let debug = cli_args.debug_enabled();
        let mut missing: Vec<&'static str> = vec![];
        let gitlab = GitlabConfig::resolve(
            &cli_args.gitlab,
            config_data.gitlab.as_ref(),
            &mut missing,
        );
        let action = match &cli_args.command {
            Some(GroupBackupCommand::Backup(args)) => {
                let file = Some(&config_data);
                let backup_dir =
                    config_value!(args.backup_dir, file, backup_dir, "--backup-dir", missing);
                Some(ActionConfig::Backup {
                    backup_dir: PathBuf::from(backup_dir),
                })
            }
            Some(GroupBackupCommand::Mirror(args)) => Some(ActionConfig::Mirror(
                GiteaConfig::resolve(args, config_data.gitea.as_ref(), &mut missing),
            )),
            None => {
                missing.push("<COMMAND> (backup or mirror)");
                None
            }
        };
        match action {
            Some(action) if missing.is_empty() => Ok(GroupBackupConfig {
                gitlab,
                action,
                debug,
            }),
            _ => Err(GroupBackupError::new(GroupBackupErrorKind::Config)
                .with_text(&format!("missing required options: {}", missing.join(", ")))),
        }
    }

    /// Read and parse a configuration file
    /// # Errors
    /// Error if the file can't be read or isn't valid toml
    pub fn read_config_file(path: &Path) -> Result<ConfigData, GroupBackupError> {
        let contents = read_to_string(path).map_err(|e| {
            GroupBackupError::new_with_source(GroupBackupErrorKind::Config, e)
                .with_url(&path.display().to_string())
        })?;
        toml::from_str(&contents).map_err(|e| {
            GroupBackupError::new_with_source(GroupBackupErrorKind::Config, e)
                .with_url(&path.display().to_string())
        })
    }

    /// Get the default path of the config file
    /// # Errors
    /// Error if the home directory can't be found
    pub fn get_config_path() -> Result<PathBuf, GroupBackupError> {
        let home_dir = match home_dir() {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                return Err(GroupBackupError::new(GroupBackupErrorKind::Config)
                    .with_text("Unable to get your home dir! home::home_dir() isn't working"))
            }
        };
        Ok(home_dir
            .join(".config")
            .join(env!("CARGO_PKG_NAME"))
            .join("config.toml"))
    }
}
