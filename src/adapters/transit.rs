use tracing::debug;

use super::{list_items, SourceRecord};
use crate::error::AdapterError;
use crate::payload::{Delivery, WidgetPayload};
use crate::providers::{TransitArrival, TransitProvider};

pub const TRANSIT_WIDGET: &str = "marta";

impl SourceRecord for TransitArrival {
    fn label(&self) -> String {
        self.destination.clone()
    }

    /// Passed through untouched: "3 min", "Arriving", "Boarding".
    fn value(&self) -> Result<String, AdapterError> {
        Ok(self.waiting_time.clone())
    }
}

pub fn station_title(station: &str) -> String {
    format!("Station: {station}")
}

pub struct TransitAdapter<'a, P> {
    provider: &'a P,
    auth_token: &'a str,
}

impl<'a, P: TransitProvider> TransitAdapter<'a, P> {
    pub fn new(provider: &'a P, auth_token: &'a str) -> Self {
        Self {
            provider,
            auth_token,
        }
    }

    /// Fetch arrivals for `station` and build the list payload.
    ///
    /// No trains is a valid answer and yields an empty `items` list.
    pub async fn fetch_arrivals(&self, station: &str) -> Result<WidgetPayload, AdapterError> {
        let arrivals = self.provider.arrivals(station).await?;
        debug!(station, count = arrivals.len(), "transit arrivals");
        self.to_payload(station, &arrivals)
    }

    pub fn to_payload(
        &self,
        station: &str,
        arrivals: &[TransitArrival],
    ) -> Result<WidgetPayload, AdapterError> {
        Ok(WidgetPayload {
            auth_token: self.auth_token.to_string(),
            title: station_title(station),
            items: list_items(arrivals)?,
        })
    }

    pub async fn delivery(&self, station: &str) -> Result<Delivery, AdapterError> {
        Ok(Delivery::new(TRANSIT_WIDGET, self.fetch_arrivals(station).await?))
    }
}
