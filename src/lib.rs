//! # dashwrap
//!
//! Polls a transit feed (MARTA), an events feed (Ticketmaster) and a social
//! feed (Reddit), normalizes each into a Dashing widget payload, and pushes it
//! to the dashboard.
//!
//! A run handles exactly one source:
//!
//! ```text
//! ProviderSet ──► adapter (fetch + normalize) ──► Delivery ──► PushClient
//! ```
//!
//! ```rust,ignore
//! let config = Config::load("config.toml")?;
//! let dispatcher = Dispatcher::from_config(&config, HttpProviders::new(&config))?;
//! dispatcher
//!     .dispatch(&SourceRequest::Transit { station: "Five Points".into() })
//!     .await?;
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod payload;
pub mod providers;
pub mod push;

pub use config::Config;
pub use dispatcher::{Dispatcher, SourceRequest};
pub use error::{AdapterError, ConfigError, DispatchError, PushError};
pub use payload::{Delivery, ListItem, NotificationPayload, Payload, WidgetPayload};
pub use providers::HttpProviders;
pub use push::PushClient;
