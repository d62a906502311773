//! Error taxonomy for one fetch-transform-push run.
//!
//! Every failure is fatal to the invocation that hit it. Nothing here is
//! retried; the binary maps each top-level [`DispatchError`] variant to its
//! own exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration could not be loaded, or a required key is absent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    /// Named as `section.key`, exactly as it appears in the TOML file.
    #[error("missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("venue `{venue}` not found in [venues] (known: {known})")]
    UnknownVenue { venue: String, known: String },

    /// A command-line argument that must carry text was blank.
    #[error("`--{0}` must not be blank")]
    BlankArgument(&'static str),
}

/// A source provider failed or returned something the adapter cannot use.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{provider} unavailable: {detail}")]
    ProviderUnavailable {
        provider: &'static str,
        detail: String,
    },

    #[error("malformed {provider} response: {detail}")]
    MalformedResponse {
        provider: &'static str,
        detail: String,
    },

    #[error("invalid start date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{0} returned no posts")]
    EmptyFeed(&'static str),
}

/// Delivery to the dashboard failed.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("widget name must not be empty")]
    EmptyWidgetName,

    #[error("could not reach dashboard at {url}: {detail}")]
    Transport { url: String, detail: String },

    #[error("dashboard rejected payload: HTTP {status} from {url}")]
    RemoteRejected { status: u16, url: String },
}

/// Whatever aborted a single dispatcher run.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("provider error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("push error: {0}")]
    Push(#[from] PushError),
}

impl DispatchError {
    /// Process exit code for this class of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            DispatchError::Config(_) => 2,
            DispatchError::Adapter(_) => 3,
            DispatchError::Push(_) => 4,
        }
    }
}
