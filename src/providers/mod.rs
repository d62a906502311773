//! # Providers
//!
//! Thin HTTP clients for the three upstream feeds, plus the traits the
//! adapters are written against.
//!
//! | trait               | HTTP implementation    | upstream                       |
//! |---------------------|------------------------|--------------------------------|
//! | [`TransitProvider`] | [`MartaClient`]        | MARTA realtime rail arrivals   |
//! | [`EventsProvider`]  | [`TicketmasterClient`] | Ticketmaster Discovery v2      |
//! | [`SocialProvider`]  | [`RedditClient`]       | Reddit subreddit top listing   |
//!
//! [`ProviderSet`] hands the dispatcher one provider at a time, so a run only
//! needs the credentials of the source it actually touches.

// The traits are only used through generics, never as `dyn`, so the missing
// `Send` bound on the returned futures does not matter here.
#![allow(async_fn_in_trait)]

pub mod marta;
pub mod reddit;
pub mod ticketmaster;

pub use marta::{MartaClient, TransitArrival};
pub use reddit::{RedditClient, SocialPost};
pub use ticketmaster::{Event, TicketmasterClient};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{AdapterError, ConfigError};

pub trait TransitProvider {
    /// All arrivals at stations whose name matches `station`.
    async fn arrivals(&self, station: &str) -> Result<Vec<TransitArrival>, AdapterError>;
}

pub trait EventsProvider {
    /// Up to `size` upcoming events at `venue_id`, earliest first.
    async fn events(&self, venue_id: &str, size: usize) -> Result<Vec<Event>, AdapterError>;
}

pub trait SocialProvider {
    /// Up to `limit` of today's top posts, highest ranked first.
    async fn top_of_day(&self, limit: usize) -> Result<Vec<SocialPost>, AdapterError>;
}

/// Builds providers on demand, failing with the missing config key.
pub trait ProviderSet {
    type Transit: TransitProvider;
    type Events: EventsProvider;
    type Social: SocialProvider;

    fn transit(&self) -> Result<Self::Transit, ConfigError>;
    fn events(&self) -> Result<Self::Events, ConfigError>;
    fn social(&self) -> Result<Self::Social, ConfigError>;
}

/// The production [`ProviderSet`]: reqwest clients configured from [`Config`].
pub struct HttpProviders<'a> {
    config: &'a Config,
    client: Client,
}

impl<'a> HttpProviders<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: &'a Config, client: Client) -> Self {
        Self { config, client }
    }
}

impl ProviderSet for HttpProviders<'_> {
    type Transit = MartaClient;
    type Events = TicketmasterClient;
    type Social = RedditClient;

    fn transit(&self) -> Result<MartaClient, ConfigError> {
        Ok(MartaClient::new(self.config.marta()?, self.client.clone()))
    }

    fn events(&self) -> Result<TicketmasterClient, ConfigError> {
        Ok(TicketmasterClient::new(
            self.config.ticketmaster()?,
            self.client.clone(),
        ))
    }

    fn social(&self) -> Result<RedditClient, ConfigError> {
        Ok(RedditClient::new(self.config.reddit(), self.client.clone()))
    }
}

/// Send `request` and decode a JSON body of type `T`.
///
/// # Returns
/// - `Err(AdapterError::ProviderUnavailable)` when the request never completes
///   or the provider answers non-2xx (the status goes into `detail`).
/// - `Err(AdapterError::MalformedResponse)` when the body is not the expected JSON.
pub(crate) async fn get_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, AdapterError> {
    let resp = request
        .send()
        .await
        .map_err(|e| AdapterError::ProviderUnavailable {
            provider,
            detail: e.to_string(),
        })?;

    let status = resp.status();
    debug!(provider, status = status.as_u16(), "provider answered");
    if !status.is_success() {
        return Err(AdapterError::ProviderUnavailable {
            provider,
            detail: format!("HTTP {}", status.as_u16()),
        });
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| AdapterError::ProviderUnavailable {
            provider,
            detail: e.to_string(),
        })?;

    serde_json::from_slice::<T>(&bytes).map_err(|e| AdapterError::MalformedResponse {
        provider,
        detail: e.to_string(),
    })
}
