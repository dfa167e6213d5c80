//! Listing and lookup actions.

use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use super::{Actions, query};
use crate::error::AppResult;
use crate::models::{Envelope, Page, Post, SearchParams, SubscribeRequest, Tag, User};
use crate::store::Mutation;

impl Actions {
    /// Latest posts for the active period.
    pub async fn fetch_recent_posts(&self) -> AppResult<Page<Post>> {
        let period = self.store.read(|s| s.active_period.clone());
        let page: Page<Post> = self
            .get_as(
                "/posts",
                &query([
                    ("get", self.options.recent_post_count.to_string()),
                    ("period", period),
                ]),
            )
            .await?;

        self.store.commit(Mutation::SetRecentPosts(page.data.clone()));
        Ok(page)
    }

    pub async fn fetch_featured_posts(&self) -> AppResult<Page<Post>> {
        let page: Page<Post> = self
            .get_as(
                "/posts",
                &query([
                    ("get", self.options.featured_count.to_string()),
                    ("is_featured", "1".to_string()),
                ]),
            )
            .await?;

        self.store.commit(Mutation::SetFeatured(page.data.clone()));
        Ok(page)
    }

    /// One page of the full listing. Anything other than a page above 1
    /// requests the first page.
    pub async fn fetch_all_posts(&self, page: Option<u32>) -> AppResult<Page<Post>> {
        let page_number = page.filter(|p| *p > 1).unwrap_or(1);
        let page: Page<Post> = self
            .get_as(
                "/posts",
                &query([
                    ("get", self.options.per_page.to_string()),
                    ("page", page_number.to_string()),
                ]),
            )
            .await?;

        self.store.commit(Mutation::SetAllPosts(page.data.clone()));
        self.store.commit(Mutation::SetAllPostMeta(page.meta()));
        Ok(page)
    }

    pub async fn fetch_by_slug(&self, slug: &str) -> AppResult<Envelope<Post>> {
        self.get_as(&format!("/posts/{slug}"), &[]).await
    }

    pub async fn fetch_by_company(&self, company: &str) -> AppResult<Page<Post>> {
        self.get_as(&format!("/companies/{company}/posts"), &[])
            .await
    }

    pub async fn fetch_by_tag(&self, tag: &str) -> AppResult<Page<Post>> {
        self.get_as(&format!("/tags/{tag}/posts"), &[]).await
    }

    pub async fn search(&self, params: &SearchParams) -> AppResult<Page<Post>> {
        self.get_as("/search", params.as_pairs()).await
    }

    pub async fn fetch_tags(&self) -> AppResult<()> {
        let tags: Envelope<Vec<Tag>> = self.get_as("/tags", &[]).await?;
        self.store.commit(Mutation::SetTags(tags.data));
        Ok(())
    }

    /// Stores the whole response body, not just its `data` field.
    pub async fn fetch_available_locations(&self) -> AppResult<()> {
        let locations = self.api.get("/posts/locations", &[]).await?;
        self.store.commit(Mutation::SetAvailableLocations(locations));
        Ok(())
    }

    pub async fn fetch_me(&self) -> AppResult<()> {
        let me: User = self.get_as("/user/me", &[]).await?;
        self.store.commit(Mutation::SetMe(me));
        Ok(())
    }

    /// Publish a new job post. The response body is returned untouched.
    pub async fn save_post<T: Serialize + ?Sized>(&self, data: &T) -> AppResult<Value> {
        self.post_json("/posts", data).await
    }

    /// Newsletter signup.
    pub async fn subscribe(&self, data: &SubscribeRequest) -> AppResult<Value> {
        data.validate()?;
        self.post_json("/newsletters", data).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{FakeApi, pairs};
    use crate::error::AppError;
    use crate::models::{PostMeta, SearchParams, SubscribeRequest};
    use serde_json::json;

    fn listing() -> serde_json::Value {
        json!({
            "data": [
                {"id": 1, "slug": "rust-dev", "tags": [{"slug": "backend"}]},
                {"id": 2, "slug": "vue-dev", "tags": [{"slug": "frontend"}]}
            ],
            "total": 41,
            "current_page": 2,
            "last_page": 3
        })
    }

    #[tokio::test]
    async fn test_recent_posts_use_active_period() {
        let (actions, api) = FakeApi::actions();
        api.respond("GET", "/posts", listing());
        actions.set_period("weekly");

        let page = actions.fetch_recent_posts().await.unwrap();
        assert_eq!(page.data.len(), 2);

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, pairs(&[("get", "10"), ("period", "weekly")]));
        assert_eq!(actions.store().snapshot().recent_posts, page.data);
    }

    #[tokio::test]
    async fn test_featured_posts() {
        let (actions, api) = FakeApi::actions();
        api.respond("GET", "/posts", listing());

        actions.fetch_featured_posts().await.unwrap();

        assert_eq!(
            api.requests()[0].query,
            pairs(&[("get", "3"), ("is_featured", "1")])
        );
        assert_eq!(actions.store().snapshot().featured_posts.len(), 2);
    }

    #[tokio::test]
    async fn test_all_posts_commits_posts_and_meta() {
        let (actions, api) = FakeApi::actions();
        api.respond("GET", "/posts", listing());

        actions.fetch_all_posts(Some(2)).await.unwrap();

        assert_eq!(
            api.requests()[0].query,
            pairs(&[("get", "20"), ("page", "2")])
        );
        let state = actions.store().snapshot();
        assert_eq!(state.all_posts.len(), 2);
        assert_eq!(
            state.all_post_meta,
            PostMeta {
                total: 41,
                current_page: 2,
                last_page: 3
            }
        );
    }

    #[tokio::test]
    async fn test_irregular_posts_are_committed() {
        let (actions, api) = FakeApi::actions();
        api.respond(
            "GET",
            "/posts",
            json!({"data": [
                {"id": 1, "tags": null},
                {"id": "7", "tags": [{"name": "Legacy"}]}
            ]}),
        );
        api.respond("GET", "/tags", json!({"data": [{"id": 4, "slug": null}]}));

        let page = actions.fetch_all_posts(None).await.unwrap();
        actions.fetch_tags().await.unwrap();

        let state = actions.store().snapshot();
        assert_eq!(state.all_posts, page.data);
        assert_eq!(state.all_posts.len(), 2);
        assert!(state.all_posts[0].tags.is_empty());
        assert_eq!(state.tags.len(), 1);
    }

    #[tokio::test]
    async fn test_all_posts_normalizes_page() {
        let (actions, api) = FakeApi::actions();
        api.respond("GET", "/posts", listing());

        actions.fetch_all_posts(None).await.unwrap();
        actions.fetch_all_posts(Some(0)).await.unwrap();
        actions.fetch_all_posts(Some(1)).await.unwrap();

        for request in api.requests() {
            assert_eq!(request.query[1], ("page".to_string(), "1".to_string()));
        }
    }

    #[tokio::test]
    async fn test_failed_listing_leaves_state_untouched() {
        let (actions, api) = FakeApi::actions();
        api.fail("GET", "/posts", 500, json!({"message": "Server Error"}));

        let err = actions.fetch_all_posts(None).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(actions.store().snapshot().all_posts.is_empty());
    }

    #[tokio::test]
    async fn test_lookups_return_payload_without_committing() {
        let (actions, api) = FakeApi::actions();
        api.respond(
            "GET",
            "/posts/rust-dev",
            json!({"data": {"id": 1, "slug": "rust-dev", "tags": []}}),
        );
        api.respond("GET", "/companies/acme/posts", listing());
        api.respond("GET", "/tags/backend/posts", listing());

        let post = actions.fetch_by_slug("rust-dev").await.unwrap();
        assert_eq!(post.data.slug.as_deref(), Some("rust-dev"));
        assert_eq!(actions.fetch_by_company("acme").await.unwrap().data.len(), 2);
        assert_eq!(actions.fetch_by_tag("backend").await.unwrap().data.len(), 2);

        let paths: Vec<_> = api.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec!["/posts/rust-dev", "/companies/acme/posts", "/tags/backend/posts"]
        );
        assert_eq!(
            actions.store().snapshot(),
            crate::store::State::with_period("all")
        );
    }

    #[tokio::test]
    async fn test_search_forwards_params() {
        let (actions, api) = FakeApi::actions();
        api.respond("GET", "/search", listing());

        let params = SearchParams::new().with("q", "rust").with("location", "remote");
        actions.search(&params).await.unwrap();

        assert_eq!(
            api.requests()[0].query,
            pairs(&[("q", "rust"), ("location", "remote")])
        );
    }

    #[tokio::test]
    async fn test_fetch_tags_commits() {
        let (actions, api) = FakeApi::actions();
        api.respond(
            "GET",
            "/tags",
            json!({"data": [{"id": 1, "name": "Backend", "slug": "backend"}]}),
        );

        actions.fetch_tags().await.unwrap();
        assert_eq!(actions.store().snapshot().tags[0].slug, "backend");
    }

    #[tokio::test]
    async fn test_locations_store_whole_body() {
        let (actions, api) = FakeApi::actions();
        api.respond("GET", "/posts/locations", json!(["Istanbul", "Ankara"]));

        actions.fetch_available_locations().await.unwrap();
        assert_eq!(
            actions.store().snapshot().available_locations,
            json!(["Istanbul", "Ankara"])
        );
    }

    #[tokio::test]
    async fn test_fetch_me() {
        let (actions, api) = FakeApi::actions();
        api.respond(
            "GET",
            "/user/me",
            json!({"id": 9, "name": "Ada", "email": "ada@example.com"}),
        );

        actions.fetch_me().await.unwrap();
        let me = actions.store().snapshot().me.unwrap();
        assert_eq!(me.name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_decode_error() {
        let (actions, api) = FakeApi::actions();
        api.respond("GET", "/tags", json!({"items": []}));

        let err = actions.fetch_tags().await.unwrap_err();
        assert!(matches!(err, AppError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_save_post_and_subscribe_post_bodies() {
        let (actions, api) = FakeApi::actions();
        api.respond("POST", "/posts", json!({"status": "ok"}));
        api.respond("POST", "/newsletters", json!({"subscribed": true}));

        let saved = actions
            .save_post(&json!({"position": "Rust Developer", "tags": ["backend"]}))
            .await
            .unwrap();
        assert_eq!(saved, json!({"status": "ok"}));

        actions
            .subscribe(&SubscribeRequest {
                email: "ada@example.com".into(),
            })
            .await
            .unwrap();

        let requests = api.requests();
        assert_eq!(requests[0].body.as_ref().unwrap()["position"], "Rust Developer");
        assert_eq!(
            requests[1].body,
            Some(json!({"email": "ada@example.com"}))
        );
    }

    #[tokio::test]
    async fn test_subscribe_validates_before_sending() {
        let (actions, api) = FakeApi::actions();

        let err = actions
            .subscribe(&SubscribeRequest {
                email: "nope".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "email"));
        assert!(api.requests().is_empty());
    }
}
