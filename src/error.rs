use std::process::ExitStatus;

pub type SubdomainResult<T> = Result<T, SubdomainError>;

#[derive(Debug, thiserror::Error)]
pub enum SubdomainError {
    #[error("Not logged in to Netlify. Run: netlify login")]
    NotLoggedIn,

    #[error(
        "DNS zone for {0} not found in Netlify DNS (the base domain must be managed by Netlify DNS)"
    )]
    ZoneNotFound(String),

    #[error("DNS record for {0} not found")]
    RecordNotFound(String),

    #[error("Site not found: {0}")]
    SiteNotFound(String),

    #[error("No site specified and not in a Netlify project directory")]
    NoSiteSpecified,

    #[error("Unknown alias: {0}")]
    AliasNotFound(String),

    #[error("Netlify API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("command failed: {command}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SubdomainError {
    /// HTTP status of a failed API call, if this error came from one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
