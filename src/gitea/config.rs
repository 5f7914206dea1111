//! Gitea configuration
use serde::Deserialize;

use crate::{cli::MirrorArgs, config_value};

/// Gitea section of the configuration file
#[derive(Deserialize, Default, Debug, Clone)]
pub struct GiteaConfig {
    /// Gitea instance URL
    pub endpoint: Option<String>,

    /// Gitea token
    pub token: Option<String>,

    /// Organization receiving the mirrors
    pub org: Option<String>,
}

/// Resolved Gitea settings
#[derive(Clone, PartialEq, Eq)]
pub struct GiteaSettings {
    /// Gitea instance URL
    pub endpoint: String,

    /// Gitea token
    pub token: String,

    /// Organization receiving the mirrors
    pub org: String,
}

impl std::fmt::Debug for GiteaSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GiteaSettings")
            .field("endpoint", &self.endpoint)
            .field("token", &"***")
            .field("org", &self.org)
            .finish()
    }
}

impl GiteaConfig {
    /// Resolve the settings from the command line, then from the config file.
    /// Names of the missing options are pushed to `missing`.
    pub(crate) fn resolve(
        args: &MirrorArgs,
        file: Option<&GiteaConfig>,
        missing: &mut Vec<&'static str>,
    ) -> GiteaSettings {
        let endpoint = config_value!(args.endpoint, file, endpoint, "--gitea-endpoint", missing);
        let token = config_value!(args.token, file, token, "--gitea-token", missing);
        let org = config_value!(args.org, file, org, "--gitea-org", missing);
        GiteaSettings {
            endpoint,
            token,
            org,
        }
    }
}
