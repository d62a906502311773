//! One source per run: fetch, transform, push.

use tracing::info;

use crate::adapters::social::DEFAULT_POST_LIMIT;
use crate::adapters::{EventsAdapter, EventsOptions, SocialAdapter, TransitAdapter};
use crate::config::{Config, DashingSettings, VenueRegistry};
use crate::error::{ConfigError, DispatchError};
use crate::payload::Delivery;
use crate::providers::ProviderSet;
use crate::push::PushClient;

/// Which source to poll, with its source-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRequest {
    Transit { station: String },
    Events { venue: String, options: EventsOptions },
    Social { limit: usize },
}

impl SourceRequest {
    pub fn events(venue: impl Into<String>) -> Self {
        SourceRequest::Events {
            venue: venue.into(),
            options: EventsOptions::default(),
        }
    }

    pub fn social() -> Self {
        SourceRequest::Social {
            limit: DEFAULT_POST_LIMIT,
        }
    }

    pub fn source_name(&self) -> &'static str {
        match self {
            SourceRequest::Transit { .. } => "transit",
            SourceRequest::Events { .. } => "events",
            SourceRequest::Social { .. } => "social",
        }
    }
}

pub struct Dispatcher<P> {
    providers: P,
    venues: VenueRegistry,
    auth_token: String,
    push: PushClient,
}

impl<P: ProviderSet> Dispatcher<P> {
    pub fn new(dashing: DashingSettings, venues: VenueRegistry, providers: P) -> Self {
        Self {
            providers,
            venues,
            push: PushClient::new(dashing.url),
            auth_token: dashing.auth_token,
        }
    }

    /// Fails fast on missing `[dashing]` keys, before any network call.
    pub fn from_config(config: &Config, providers: P) -> Result<Self, DispatchError> {
        Ok(Self::new(config.dashing()?, config.venues.clone(), providers))
    }

    pub fn with_push_client(mut self, push: PushClient) -> Self {
        self.push = push;
        self
    }

    /// Fetch and transform without pushing.
    pub async fn prepare(&self, request: &SourceRequest) -> Result<Delivery, DispatchError> {
        match request {
            SourceRequest::Transit { station } => self.prepare_transit(station).await,
            SourceRequest::Events { venue, options } => self.prepare_events(venue, options).await,
            SourceRequest::Social { limit } => self.prepare_social(*limit).await,
        }
    }

    async fn prepare_transit(&self, station: &str) -> Result<Delivery, DispatchError> {
        // A blank query would match every station on the network.
        if station.trim().is_empty() {
            return Err(ConfigError::BlankArgument("station").into());
        }
        let provider = self.providers.transit()?;
        let delivery = TransitAdapter::new(&provider, &self.auth_token)
            .delivery(station)
            .await?;
        Ok(delivery)
    }

    async fn prepare_events(
        &self,
        venue: &str,
        options: &EventsOptions,
    ) -> Result<Delivery, DispatchError> {
        // Resolve before building the provider so a typo is reported first.
        self.venues.resolve(venue)?;
        let provider = self.providers.events()?;
        let delivery = EventsAdapter::new(&provider, &self.venues, &self.auth_token)
            .delivery(venue, options)
            .await?;
        Ok(delivery)
    }

    async fn prepare_social(&self, limit: usize) -> Result<Delivery, DispatchError> {
        let provider = self.providers.social()?;
        let delivery = SocialAdapter::new(&provider, &self.auth_token)
            .delivery(limit)
            .await?;
        Ok(delivery)
    }

    /// Run the request end to end and return what was delivered.
    pub async fn dispatch(&self, request: &SourceRequest) -> Result<Delivery, DispatchError> {
        let source = request.source_name();
        info!(source, dashboard = self.push.base_url(), "dispatching");

        let delivery = self.prepare(request).await?;
        self.push.push(&delivery.widget, &delivery.payload).await?;

        info!(source, widget = %delivery.widget, "delivered");
        Ok(delivery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AdapterError, ConfigError, PushError};
    use crate::payload::{ListItem, Payload};
    use crate::providers::{
        Event, EventsProvider, SocialPost, SocialProvider, TransitArrival, TransitProvider,
    };
    use std::cell::Cell;

    #[derive(Default)]
    struct Stubs {
        fetches: Cell<usize>,
        no_ticketmaster_key: bool,
    }

    struct StubTransit<'a>(&'a Cell<usize>);
    struct StubEvents<'a>(&'a Cell<usize>);
    struct StubSocial<'a>(&'a Cell<usize>);

    impl TransitProvider for StubTransit<'_> {
        async fn arrivals(&self, _station: &str) -> Result<Vec<TransitArrival>, AdapterError> {
            self.0.set(self.0.get() + 1);
            Ok(vec![TransitArrival {
                destination: "Airport".into(),
                waiting_time: "3 min".into(),
                ..Default::default()
            }])
        }
    }

    impl EventsProvider for StubEvents<'_> {
        async fn events(&self, _venue_id: &str, _size: usize) -> Result<Vec<Event>, AdapterError> {
            self.0.set(self.0.get() + 1);
            Ok(vec![Event {
                id: "1".into(),
                name: "Spring Tour".into(),
                start_date: Some("2017-04-28".into()),
            }])
        }
    }

    impl SocialProvider for StubSocial<'_> {
        async fn top_of_day(&self, _limit: usize) -> Result<Vec<SocialPost>, AdapterError> {
            self.0.set(self.0.get() + 1);
            Ok(vec![SocialPost {
                title: "Snow day".into(),
                author: "peachy".into(),
                selftext: None,
            }])
        }
    }

    impl<'s> ProviderSet for &'s Stubs {
        type Transit = StubTransit<'s>;
        type Events = StubEvents<'s>;
        type Social = StubSocial<'s>;

        fn transit(&self) -> Result<StubTransit<'s>, ConfigError> {
            let stubs: &'s Stubs = *self;
            Ok(StubTransit(&stubs.fetches))
        }

        fn events(&self) -> Result<StubEvents<'s>, ConfigError> {
            let stubs: &'s Stubs = *self;
            if stubs.no_ticketmaster_key {
                return Err(ConfigError::MissingKey("ticketmaster.api_key"));
            }
            Ok(StubEvents(&stubs.fetches))
        }

        fn social(&self) -> Result<StubSocial<'s>, ConfigError> {
            let stubs: &'s Stubs = *self;
            Ok(StubSocial(&stubs.fetches))
        }
    }

    fn dispatcher(stubs: &Stubs) -> Dispatcher<&Stubs> {
        Dispatcher::new(
            DashingSettings {
                url: "http://127.0.0.1:9/widgets/".into(),
                auth_token: "tok".into(),
            },
            VenueRegistry::new([("tabernacle".to_string(), "KovZpZAEkn6A".to_string())]),
            stubs,
        )
    }

    #[test]
    fn test_source_names() {
        assert_eq!(
            SourceRequest::Transit { station: "x".into() }.source_name(),
            "transit"
        );
        assert_eq!(SourceRequest::events("tabernacle").source_name(), "events");
        assert_eq!(SourceRequest::social().source_name(), "social");
    }

    #[tokio::test]
    async fn test_blank_station_is_rejected_before_fetch() {
        let stubs = Stubs::default();
        for station in ["", "   "] {
            let err = dispatcher(&stubs)
                .prepare(&SourceRequest::Transit {
                    station: station.into(),
                })
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                DispatchError::Config(ConfigError::BlankArgument("station"))
            ));
            assert_eq!(err.exit_code(), 2);
        }
        assert_eq!(stubs.fetches.get(), 0);
    }

    #[test]
    fn test_from_config_requires_dashing_keys() {
        let stubs = Stubs::default();
        let cfg = Config::from_toml_str("[dashing]\nurl = \"http://x/widgets/\"\n").unwrap();
        let err = Dispatcher::from_config(&cfg, &stubs).err().unwrap();
        assert!(matches!(
            err,
            DispatchError::Config(ConfigError::MissingKey("dashing.auth_token"))
        ));
    }

    #[tokio::test]
    async fn test_prepare_transit() {
        let stubs = Stubs::default();
        let delivery = dispatcher(&stubs)
            .prepare(&SourceRequest::Transit {
                station: "Five Points".into(),
            })
            .await
            .unwrap();
        assert_eq!(delivery.widget, "marta");
        let Payload::List(payload) = delivery.payload else {
            panic!("transit must produce a list payload");
        };
        assert_eq!(payload.title, "Station: Five Points");
        assert_eq!(payload.items, vec![ListItem::new("Airport", "3 min")]);
    }

    #[tokio::test]
    async fn test_prepare_events_default_widget() {
        let stubs = Stubs::default();
        let delivery = dispatcher(&stubs)
            .prepare(&SourceRequest::events("tabernacle"))
            .await
            .unwrap();
        assert_eq!(delivery.widget, "tabernacle");
    }

    #[tokio::test]
    async fn test_prepare_social() {
        let stubs = Stubs::default();
        let delivery = dispatcher(&stubs)
            .prepare(&SourceRequest::social())
            .await
            .unwrap();
        assert_eq!(delivery.widget, "reddit");
        let Payload::Notification(payload) = delivery.payload else {
            panic!("social must produce a notification payload");
        };
        assert_eq!(payload.moreinfo, " ... posted by /u/peachy");
    }

    #[tokio::test]
    async fn test_unknown_venue_is_config_error_with_zero_fetches() {
        let stubs = Stubs::default();
        let err = dispatcher(&stubs)
            .dispatch(&SourceRequest::events("nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Config(ConfigError::UnknownVenue { ref venue, .. }) if venue == "nowhere"
        ));
        assert_eq!(stubs.fetches.get(), 0);
    }

    #[tokio::test]
    async fn test_unknown_venue_reported_before_missing_key() {
        let stubs = Stubs {
            no_ticketmaster_key: true,
            ..Default::default()
        };
        let err = dispatcher(&stubs)
            .prepare(&SourceRequest::events("nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Config(ConfigError::UnknownVenue { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_provider_key_stops_before_fetch() {
        let stubs = Stubs {
            no_ticketmaster_key: true,
            ..Default::default()
        };
        let err = dispatcher(&stubs)
            .dispatch(&SourceRequest::events("tabernacle"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Config(ConfigError::MissingKey("ticketmaster.api_key"))
        ));
        assert_eq!(stubs.fetches.get(), 0);
    }

    #[tokio::test]
    async fn test_push_failure_surfaces_as_push_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let stubs = Stubs::default();
        let err = dispatcher(&stubs)
            .with_push_client(PushClient::with_client(
                format!("http://{addr}/widgets/"),
                reqwest::Client::builder().no_proxy().build().unwrap(),
            ))
            .dispatch(&SourceRequest::social())
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Push(PushError::Transport { .. })));
        assert_eq!(stubs.fetches.get(), 1);
    }
}
