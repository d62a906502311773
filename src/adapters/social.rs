use tracing::debug;

use super::SourceRecord;
use crate::error::AdapterError;
use crate::payload::{Delivery, NotificationPayload};
use crate::providers::{SocialPost, SocialProvider};

pub const SOCIAL_WIDGET: &str = "reddit";
pub const DEFAULT_POST_LIMIT: usize = 1;

pub fn author_handle(author: &str) -> String {
    format!("/u/{author}")
}

impl SourceRecord for SocialPost {
    fn label(&self) -> String {
        self.title.clone()
    }

    /// `"<body> ... posted by /u/<author>"`, body empty when absent.
    fn value(&self) -> Result<String, AdapterError> {
        Ok(format!(
            "{} ... posted by {}",
            self.selftext.as_deref().unwrap_or_default(),
            author_handle(&self.author)
        ))
    }
}

pub struct SocialAdapter<'a, P> {
    provider: &'a P,
    auth_token: &'a str,
}

impl<'a, P: SocialProvider> SocialAdapter<'a, P> {
    pub fn new(provider: &'a P, auth_token: &'a str) -> Self {
        Self {
            provider,
            auth_token,
        }
    }

    /// The day's top post. Only the first post of the fetched set is used.
    pub async fn fetch_top_post(&self, limit: usize) -> Result<SocialPost, AdapterError> {
        let posts = self.provider.top_of_day(limit.max(1)).await?;
        if posts.len() > 1 {
            debug!(fetched = posts.len(), "using first post only");
        }
        posts
            .into_iter()
            .next()
            .ok_or(AdapterError::EmptyFeed("reddit"))
    }

    pub fn to_payload(&self, post: &SocialPost) -> Result<NotificationPayload, AdapterError> {
        Ok(NotificationPayload {
            auth_token: self.auth_token.to_string(),
            text: post.label(),
            moreinfo: post.value()?,
        })
    }

    pub async fn delivery(&self, limit: usize) -> Result<Delivery, AdapterError> {
        let post = self.fetch_top_post(limit).await?;
        Ok(Delivery::new(SOCIAL_WIDGET, self.to_payload(&post)?))
    }
}
