use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::events::{DEFAULT_EVENT_LIMIT, DEFAULT_MAX_NAME_LENGTH, DEFAULT_VENUE};
use crate::adapters::social::DEFAULT_POST_LIMIT;
use crate::adapters::EventsOptions;
use crate::config::DEFAULT_CONFIG_PATH;
use crate::dispatcher::SourceRequest;

#[derive(Parser)]
#[command(name = "dashwrap")]
#[command(version)]
#[command(about = "Push transit, events and social feeds to Dashing widgets")]
pub struct Args {
    /// Path to the TOML config file
    #[arg(long, short, global = true, env = "DASHWRAP_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Print the payload as JSON instead of pushing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Push the day's top subreddit post
    #[command(alias = "reddit")]
    Social {
        /// Posts to fetch (only the first is shown)
        #[arg(long, default_value_t = DEFAULT_POST_LIMIT)]
        limit: usize,
    },

    /// Push upcoming train arrivals for a station
    #[command(alias = "marta")]
    Transit {
        /// Station name, or part of one
        #[arg(long, value_parser = non_blank)]
        station: String,
    },

    /// Push upcoming events for a venue listed under [venues]
    #[command(alias = "ticketmaster")]
    Events {
        /// Venue to look up
        #[arg(long, default_value = DEFAULT_VENUE)]
        venue: String,

        /// Most events to show
        #[arg(long, default_value_t = DEFAULT_EVENT_LIMIT)]
        limit: usize,

        /// Truncate event names longer than this
        #[arg(long, default_value_t = DEFAULT_MAX_NAME_LENGTH)]
        max_name_length: usize,

        /// Widget to push to (defaults to the venue name)
        #[arg(long)]
        widget: Option<String>,
    },
}

fn non_blank(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("must not be blank".to_string());
    }
    Ok(value.to_string())
}

impl Command {
    pub fn into_request(self) -> SourceRequest {
        match self {
            Command::Social { limit } => SourceRequest::Social { limit },
            Command::Transit { station } => SourceRequest::Transit { station },
            Command::Events {
                venue,
                limit,
                max_name_length,
                widget,
            } => SourceRequest::Events {
                venue,
                options: EventsOptions {
                    limit,
                    max_name_length,
                    widget_name: widget,
                },
            },
        }
    }
}
