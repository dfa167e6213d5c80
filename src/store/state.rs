use serde::Serialize;

use crate::models::{Post, PostMeta, Tag, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct State {
    pub loading: bool,
    pub recent_posts: Vec<Post>,
    pub featured_posts: Vec<Post>,
    pub all_posts: Vec<Post>,
    pub all_post_meta: PostMeta,
    pub tags: Vec<Tag>,
    /// Stored exactly as the API returned it
    pub available_locations: serde_json::Value,
    pub me: Option<User>,
    /// Period filter of the recent-posts listing
    pub active_period: String,
    pub is_logged_in: bool,
}

impl State {
    pub fn with_period(period: impl Into<String>) -> Self {
        Self {
            active_period: period.into(),
            ..Self::default()
        }
    }
}
