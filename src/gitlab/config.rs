//! Gitlab configuration
use serde::Deserialize;

use crate::{cli::GitlabArgs, config_value, platform::Credentials};

/// Gitlab section of the configuration file
#[derive(Deserialize, Default, Debug, Clone)]
pub struct GitlabConfig {
    /// Gitlab username
    pub username: Option<String>,

    /// Gitlab token
    pub token: Option<String>,

    /// Gitlab instance URL
    pub endpoint: Option<String>,

    /// Group to back up
    pub group: Option<String>,
}

/// Resolved Gitlab settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitlabSettings {
    /// Credentials used for the API, clones and migrations
    pub credentials: Credentials,

    /// Gitlab instance URL
    pub endpoint: String,

    /// Group to back up
    pub group: String,
}

impl GitlabConfig {
    /// Resolve the settings from the command line, then from the config file.
    /// Names of the missing options are pushed to `missing`.
    pub(crate) fn resolve(
        args: &GitlabArgs,
        file: Option<&GitlabConfig>,
        missing: &mut Vec<&'static str>,
    ) -> GitlabSettings {
        let username = config_value!(args.username, file, username, "--gitlab-username", missing);
        let token = config_value!(args.token, file, token, "--gitlab-token", missing);
        let endpoint = config_value!(args.endpoint, file, endpoint, "--gitlab-endpoint", missing);
        let group = config_value!(args.group, file, group, "--gitlab-group", missing);
        GitlabSettings {
            credentials: Credentials { username, token },
            endpoint,
            group,
        }
    }
}
