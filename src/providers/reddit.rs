//! Reddit subreddit listing (`/r/<sub>/top.json?t=day`).

use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{get_json, SocialProvider};
use crate::config::RedditSettings;
use crate::error::AdapterError;

const PROVIDER: &str = "reddit";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPost {
    pub title: String,
    pub author: String,
    /// Self-post body. Link posts carry an empty or missing body.
    #[serde(default)]
    pub selftext: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: SocialPost,
}

pub struct RedditClient {
    settings: RedditSettings,
    client: Client,
}

impl RedditClient {
    pub fn new(settings: RedditSettings, client: Client) -> Self {
        Self { settings, client }
    }

    fn top_url(&self) -> String {
        format!(
            "{}r/{}/top.json",
            self.settings.base_url, self.settings.subreddit
        )
    }
}

impl SocialProvider for RedditClient {
    async fn top_of_day(&self, limit: usize) -> Result<Vec<SocialPost>, AdapterError> {
        let limit = limit.to_string();
        let request = self
            .client
            .get(self.top_url())
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .query(&[("t", "day"), ("limit", limit.as_str())]);

        let listing: Listing = get_json(PROVIDER, request).await?;
        let posts: Vec<SocialPost> = listing.data.children.into_iter().map(|c| c.data).collect();
        debug!(subreddit = %self.settings.subreddit, count = posts.len(), "fetched top posts");
        Ok(posts)
    }
}
