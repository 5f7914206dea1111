//! Gitea API module.
pub(crate) mod config;
pub(crate) mod platform;
pub(crate) mod repo;

/// Gitea REST API path
const GITEA_API_PATH: &str = "/api/v1";
