//! Upcoming venue events as a list widget.
//!
//! Event names are cut to fit the widget and start dates are shortened to
//! `Mon-DD`. The venue name doubles as the widget name unless overridden.

use chrono::NaiveDate;
use tracing::debug;

use super::SourceRecord;
use crate::config::VenueRegistry;
use crate::error::{AdapterError, DispatchError};
use crate::payload::{Delivery, ListItem, WidgetPayload};
use crate::providers::{Event, EventsProvider};

pub const DEFAULT_VENUE: &str = "tabernacle";
pub const DEFAULT_EVENT_LIMIT: usize = 7;
pub const DEFAULT_MAX_NAME_LENGTH: usize = 45;
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsOptions {
    /// Most events requested from the provider.
    pub limit: usize,
    /// Longest label, in chars, before the ellipsis is appended.
    pub max_name_length: usize,
    /// Widget to push to. `None` means the venue name.
    pub widget_name: Option<String>,
}

impl Default for EventsOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_EVENT_LIMIT,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            widget_name: None,
        }
    }
}

/// Hard cut at `max` chars plus [`ELLIPSIS`]; names that fit are returned as-is.
pub fn truncate_label(name: &str, max: usize) -> String {
    match name.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &name[..cut]),
        None => name.to_string(),
    }
}

/// `2017-04-28` -> `Apr-28`. Anything not shaped `YYYY-MM-DD` is rejected.
pub fn format_start_date(date: &str) -> Result<String, AdapterError> {
    let invalid = || AdapterError::InvalidDate(date.to_string());

    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if !shaped {
        return Err(invalid());
    }

    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
    Ok(parsed.format("%b-%d").to_string())
}

pub fn venue_title(venue_name: &str) -> String {
    format!("Events: {venue_name}")
}

impl SourceRecord for Event {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn value(&self) -> Result<String, AdapterError> {
        match &self.start_date {
            Some(date) => format_start_date(date),
            None => Err(AdapterError::InvalidDate(String::new())),
        }
    }
}

pub struct EventsAdapter<'a, P> {
    provider: &'a P,
    venues: &'a VenueRegistry,
    auth_token: &'a str,
}

impl<'a, P: EventsProvider> EventsAdapter<'a, P> {
    pub fn new(provider: &'a P, venues: &'a VenueRegistry, auth_token: &'a str) -> Self {
        Self {
            provider,
            venues,
            auth_token,
        }
    }

    /// Resolve `venue` and fetch up to `limit` events in provider order.
    ///
    /// An unknown venue is a configuration error and the provider is never
    /// called.
    pub async fn fetch_events(
        &self,
        venue: &str,
        limit: usize,
    ) -> Result<Vec<Event>, DispatchError> {
        let venue_id = self.venues.resolve(venue)?;
        debug!(venue, venue_id, limit, "fetching events");
        let mut events = self.provider.events(venue_id, limit).await?;
        events.truncate(limit);
        Ok(events)
    }

    pub fn to_payload(
        &self,
        venue_name: &str,
        events: &[Event],
        options: &EventsOptions,
    ) -> Result<Delivery, AdapterError> {
        let items = events
            .iter()
            .map(|event| {
                Ok(ListItem::new(
                    truncate_label(&event.label(), options.max_name_length),
                    event.value()?,
                ))
            })
            .collect::<Result<Vec<_>, AdapterError>>()?;

        let widget = options.widget_name.as_deref().unwrap_or(venue_name);
        let payload = WidgetPayload {
            auth_token: self.auth_token.to_string(),
            title: venue_title(venue_name),
            items,
        };
        Ok(Delivery::new(widget, payload))
    }

    pub async fn delivery(
        &self,
        venue: &str,
        options: &EventsOptions,
    ) -> Result<Delivery, DispatchError> {
        let events = self.fetch_events(venue, options.limit).await?;
        Ok(self.to_payload(venue, &events, options)?)
    }
}
