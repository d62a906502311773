//! Ticketmaster Discovery API v2, venue event search.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{get_json, EventsProvider};
use crate::config::ProviderSettings;
use crate::error::AdapterError;

const PROVIDER: &str = "ticketmaster";

/// An upcoming event, flattened from the Discovery response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    /// Local start date as `YYYY-MM-DD`. Absent for TBA events.
    pub start_date: Option<String>,
}

// -- Discovery wire types ---------------------------------------------------

#[derive(Debug, Deserialize)]
struct EventSearch {
    #[serde(rename = "_embedded")]
    embedded: Option<Embedded>,
}

#[derive(Debug, Deserialize)]
struct Embedded {
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default)]
    dates: Option<Dates>,
}

#[derive(Debug, Deserialize)]
struct Dates {
    start: Option<Start>,
}

#[derive(Debug, Deserialize)]
struct Start {
    #[serde(rename = "localDate")]
    local_date: Option<String>,
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let start_date = raw
            .dates
            .and_then(|d| d.start)
            .and_then(|s| s.local_date);
        Event {
            id: raw.id,
            name: raw.name,
            start_date,
        }
    }
}

/// A search with no hits has no `_embedded` key at all.
fn flatten(search: EventSearch) -> Vec<Event> {
    search
        .embedded
        .map(|e| e.events.into_iter().map(Event::from).collect())
        .unwrap_or_default()
}

pub struct TicketmasterClient {
    settings: ProviderSettings,
    client: Client,
}

impl TicketmasterClient {
    pub fn new(settings: ProviderSettings, client: Client) -> Self {
        Self { settings, client }
    }

    fn events_url(&self) -> String {
        format!("{}events.json", self.settings.base_url)
    }
}

impl EventsProvider for TicketmasterClient {
    async fn events(&self, venue_id: &str, size: usize) -> Result<Vec<Event>, AdapterError> {
        let size = size.to_string();
        let request = self.client.get(self.events_url()).query(&[
            ("apikey", self.settings.api_key.as_str()),
            ("venueId", venue_id),
            ("size", size.as_str()),
            ("sort", "date,asc"),
        ]);

        let search: EventSearch = get_json(PROVIDER, request).await?;
        let events = flatten(search);
        debug!(venue_id, count = events.len(), "fetched Ticketmaster events");
        Ok(events)
    }
}
