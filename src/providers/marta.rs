//! MARTA realtime rail arrivals.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{get_json, TransitProvider};
use crate::config::ProviderSettings;
use crate::error::AdapterError;

const PROVIDER: &str = "marta";

/// One train arrival as MARTA reports it. Field names follow the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TransitArrival {
    pub destination: String,
    /// Human-readable wait, e.g. `"3 min"`, `"Arriving"`, `"Boarding"`.
    pub waiting_time: String,
    #[serde(default)]
    pub station: String,
    #[serde(default)]
    pub line: String,
    #[serde(default)]
    pub direction: String,
}

pub struct MartaClient {
    settings: ProviderSettings,
    client: Client,
}

impl MartaClient {
    pub fn new(settings: ProviderSettings, client: Client) -> Self {
        Self { settings, client }
    }
}

/// Case-insensitive substring match, so `"five points"` finds
/// `"FIVE POINTS STATION"`.
pub fn station_matches(station_name: &str, query: &str) -> bool {
    station_name
        .to_lowercase()
        .contains(&query.trim().to_lowercase())
}

impl TransitProvider for MartaClient {
    async fn arrivals(&self, station: &str) -> Result<Vec<TransitArrival>, AdapterError> {
        // The feed has no server-side filter; it returns every train on the system.
        let request = self
            .client
            .get(&self.settings.base_url)
            .query(&[("apikey", self.settings.api_key.as_str())]);

        let all: Vec<TransitArrival> = get_json(PROVIDER, request).await?;
        let total = all.len();
        let matched: Vec<_> = all
            .into_iter()
            .filter(|a| station_matches(&a.station, station))
            .collect();

        debug!(station, total, matched = matched.len(), "filtered MARTA arrivals");
        Ok(matched)
    }
}
