//! TOML-backed configuration.
//!
//! The file is parsed leniently (every key optional) and each component asks
//! for the keys it needs through an accessor. A run therefore only fails on
//! the credentials its own source requires, and the error names the exact
//! `section.key` that is missing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub const MARTA_ARRIVALS_URL: &str =
    "http://developer.itsmarta.com/RealtimeTrainService/RestServiceNextTrain/GetRealtimeArrivals";
pub const TICKETMASTER_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2/";
pub const REDDIT_BASE_URL: &str = "https://www.reddit.com/";
pub const DEFAULT_SUBREDDIT: &str = "atlanta";
pub const DEFAULT_USER_AGENT: &str = "dashwrap daily top post grabber";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dashing: DashingSection,
    #[serde(default)]
    pub marta: MartaSection,
    #[serde(default)]
    pub ticketmaster: TicketmasterSection,
    #[serde(default)]
    pub reddit: RedditSection,
    #[serde(default)]
    pub venues: VenueRegistry,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashingSection {
    pub url: Option<String>,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MartaSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketmasterSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditSection {
    pub user_agent: Option<String>,
    pub subreddit: Option<String>,
    pub base_url: Option<String>,
}

/// Dashboard endpoint and the token stamped into every payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashingSettings {
    pub url: String,
    pub auth_token: String,
}

/// Credentials and endpoint for one provider client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditSettings {
    pub user_agent: String,
    pub subreddit: String,
    pub base_url: String,
}

/// Venue name -> provider venue id, from the `[venues]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct VenueRegistry(BTreeMap<String, String>);

impl VenueRegistry {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn resolve(&self, venue: &str) -> Result<&str, ConfigError> {
        self.0
            .get(venue)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownVenue {
                venue: venue.to_string(),
                known: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn required(value: &Option<String>, key: &'static str) -> Result<String, ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::MissingKey(key)),
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

impl Config {
    /// Read and parse the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Self::parse(raw, Path::new("<inline>"))
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse {
            path: PathBuf::from(path),
            detail: e.to_string(),
        })
    }

    pub fn dashing(&self) -> Result<DashingSettings, ConfigError> {
        Ok(DashingSettings {
            url: required(&self.dashing.url, "dashing.url")?,
            auth_token: required(&self.dashing.auth_token, "dashing.auth_token")?,
        })
    }

    pub fn marta(&self) -> Result<ProviderSettings, ConfigError> {
        Ok(ProviderSettings {
            api_key: required(&self.marta.api_key, "marta.api_key")?,
            base_url: or_default(&self.marta.base_url, MARTA_ARRIVALS_URL),
        })
    }

    pub fn ticketmaster(&self) -> Result<ProviderSettings, ConfigError> {
        Ok(ProviderSettings {
            api_key: required(&self.ticketmaster.api_key, "ticketmaster.api_key")?,
            base_url: or_default(&self.ticketmaster.base_url, TICKETMASTER_BASE_URL),
        })
    }

    /// Reddit's public listing needs no key, so nothing here is required.
    pub fn reddit(&self) -> RedditSettings {
        RedditSettings {
            user_agent: or_default(&self.reddit.user_agent, DEFAULT_USER_AGENT),
            subreddit: or_default(&self.reddit.subreddit, DEFAULT_SUBREDDIT),
            base_url: or_default(&self.reddit.base_url, REDDIT_BASE_URL),
        }
    }
}
