use crate::models::{Post, PostMeta, Tag, User};

use super::State;

/// A named, synchronous state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    ToggleLoading,
    SetRecentPosts(Vec<Post>),
    SetFeatured(Vec<Post>),
    SetAllPosts(Vec<Post>),
    SetAllPostMeta(PostMeta),
    SetTags(Vec<Tag>),
    SetAvailableLocations(serde_json::Value),
    SetMe(User),
    SetActivePeriod(String),
    SetIsLoggedIn(bool),
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::ToggleLoading => "TOGGLE_LOADING",
            Mutation::SetRecentPosts(_) => "SET_RECENT_POSTS",
            Mutation::SetFeatured(_) => "SET_FEATURED",
            Mutation::SetAllPosts(_) => "SET_ALL_POSTS",
            Mutation::SetAllPostMeta(_) => "SET_ALL_POST_META",
            Mutation::SetTags(_) => "SET_TAGS",
            Mutation::SetAvailableLocations(_) => "SET_AVAILABLE_LOCATIONS",
            Mutation::SetMe(_) => "SET_ME",
            Mutation::SetActivePeriod(_) => "SET_ACTIVE_PERIOD",
            Mutation::SetIsLoggedIn(_) => "SET_IS_LOGGED_IN",
        }
    }

    pub(super) fn apply(self, state: &mut State) {
        match self {
            Mutation::ToggleLoading => state.loading = !state.loading,
            Mutation::SetRecentPosts(posts) => state.recent_posts = posts,
            Mutation::SetFeatured(posts) => state.featured_posts = posts,
            Mutation::SetAllPosts(posts) => state.all_posts = posts,
            Mutation::SetAllPostMeta(meta) => state.all_post_meta = meta,
            Mutation::SetTags(tags) => state.tags = tags,
            Mutation::SetAvailableLocations(locations) => state.available_locations = locations,
            Mutation::SetMe(user) => state.me = Some(user),
            Mutation::SetActivePeriod(period) => state.active_period = period,
            Mutation::SetIsLoggedIn(flag) => state.is_logged_in = flag,
        }
    }
}
