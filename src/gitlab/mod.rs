//! GitLab API module.
pub(crate) mod config;
pub(crate) mod platform;
pub(crate) mod repo;

/// GitLab REST API path
const GITLAB_API_PATH: &str = "/api/v4";

/// GitLab token header
const GITLAB_TOKEN_HEADER: &str = "PRIVATE-TOKEN";
