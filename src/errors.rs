//! Error handling for the git-group-backup crate.
use std::{error::Error as StdError, fmt};

/// Error type for the git-group-backup crate.
#[derive(Debug)]
pub struct GroupBackupError {
    /// Inner error.
    inner: Box<Inner>,
}

impl GroupBackupError {
    /// Create a new error.
    pub(crate) fn new(kind: GroupBackupErrorKind) -> Self {
        Self {
            inner: Box::new(Inner {
                kind,
                source: None,
                url: None,
            }),
        }
    }

    /// Create a new error wrapping a source error.
    pub(crate) fn new_with_source<E: Into<BoxError>>(
        kind: GroupBackupErrorKind,
        source: E,
    ) -> Self {
        Self {
            inner: Box::new(Inner {
                kind,
                source: Some(source.into()),
                url: None,
            }),
        }
    }

    /// Attach a text message as the source.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.inner.source = Some(Box::new(std::io::Error::other(text.to_string())));
        self
    }

    /// Attach the repository URL the error relates to.
    pub(crate) fn with_url(mut self, url: &str) -> Self {
        self.inner.url = Some(url.to_string());
        self
    }

    /// Kind of the error
    pub fn kind(&self) -> &GroupBackupErrorKind {
        &self.inner.kind
    }

    /// Repository URL the error relates to, if any
    pub fn url(&self) -> Option<&str> {
        self.inner.url.as_deref()
    }

    /// Whether the destination reported the repository as already present
    pub fn is_conflict(&self) -> bool {
        matches!(self.inner.kind, GroupBackupErrorKind::Conflict)
    }

    /// Whether the error comes from missing or invalid configuration
    pub fn is_config(&self) -> bool {
        matches!(self.inner.kind, GroupBackupErrorKind::Config)
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the git-group-backup crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: GroupBackupErrorKind,

    /// Repository URL
    url: Option<String>,

    /// Source error.
    source: Option<BoxError>,
}

/// Kind of [`GroupBackupError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBackupErrorKind {
    /// Required configuration is missing or unreadable.
    Config,

    /// The group search on the source host failed.
    HostQuery,

    /// The group search did not return exactly one group.
    AmbiguousGroup,

    /// Listing the projects of a group failed.
    GroupListing,

    /// The clone URL can't be parsed or mapped to a local path.
    InvalidUrl,

    /// The clone URL doesn't use https.
    UnsupportedScheme,

    /// Cloning a new repository failed.
    Clone,

    /// Opening an existing local repository failed.
    Open,

    /// Pulling into an existing local repository failed.
    Pull,

    /// The destination rejected the credentials.
    Credential,

    /// The destination organization can't be resolved.
    DestinationOrg,

    /// The repository already exists on the destination.
    Conflict,

    /// The mirror migration request failed.
    Migration,

    /// The API answered with a non-success status.
    Api,

    /// Error related to the reqwest crate.
    Reqwest,

    /// Error related to serde.
    Serde,

    /// Error related to Git2.
    Git2,

    /// Error related to IO.
    Io,

    /// A blocking task panicked or was cancelled.
    Task,
}

impl fmt::Display for GroupBackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.inner.kind)?;
        if let Some(url) = &self.inner.url {
            write!(f, " ({url})")?;
        }
        if let Some(source) = &self.inner.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl StdError for GroupBackupError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<reqwest::Error> for GroupBackupError {
    fn from(e: reqwest::Error) -> Self {
        Self::new_with_source(GroupBackupErrorKind::Reqwest, e)
    }
}

impl From<serde_json::Error> for GroupBackupError {
    fn from(e: serde_json::Error) -> Self {
        Self::new_with_source(GroupBackupErrorKind::Serde, e)
    }
}

impl From<std::io::Error> for GroupBackupError {
    fn from(e: std::io::Error) -> Self {
        Self::new_with_source(GroupBackupErrorKind::Io, e)
    }
}

impl From<git2::Error> for GroupBackupError {
    fn from(e: git2::Error) -> Self {
        Self::new_with_source(GroupBackupErrorKind::Git2, e)
    }
}
