use std::fmt;

use super::Actions;
use crate::error::AppResult;
use crate::models::Post;

/// The job categories a post can be filed under.
///
/// Matching is exact and case-sensitive on the tag slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Frontend,
    Backend,
    Mobile,
    Designer,
    Qa,
    Devops,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Frontend,
        Category::Backend,
        Category::Mobile,
        Category::Designer,
        Category::Qa,
        Category::Devops,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == slug)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend",
            Category::Mobile => "mobile",
            Category::Designer => "designer",
            Category::Qa => "qa",
            Category::Devops => "devops",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First tag, in listing order, that names a [`Category`].
pub fn main_tag(post_tags: &[&str]) -> Option<Category> {
    post_tags.iter().find_map(|slug| Category::from_slug(slug))
}

impl Actions {
    /// Posts in the same category as `post`, most relevant first.
    ///
    /// A post without a category tag yields an empty list and no request.
    pub async fn fetch_related_posts(&self, post: &Post) -> AppResult<Vec<Post>> {
        let post_tags = post.tag_slugs();
        let Some(category) = main_tag(&post_tags) else {
            tracing::debug!(slug = ?post.slug, "No category tag; skipping related posts");
            return Ok(Vec::new());
        };

        let page = self.fetch_by_tag(category.as_str()).await?;
        Ok(self.ranker.rank(post, &post_tags, page.data))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeApi;
    use super::*;
    use crate::models::Tag;
    use serde_json::json;

    fn post_with(tags: &[&str]) -> Post {
        Post {
            id: Some(100.into()),
            slug: Some("target".into()),
            tags: tags.iter().map(|t| Tag::new(*t)).collect(),
            ..Post::default()
        }
    }

    #[test]
    fn test_main_tag_is_first_category_in_order() {
        assert_eq!(main_tag(&["rust", "devops", "backend"]), Some(Category::Devops));
        assert_eq!(main_tag(&["rust", "go"]), None);
        assert_eq!(main_tag(&[]), None);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(Category::from_slug("Backend"), None);
        assert_eq!(Category::from_slug("QA"), None);
        assert_eq!(Category::from_slug("qa"), Some(Category::Qa));
    }

    #[tokio::test]
    async fn test_no_category_tag_makes_no_request() {
        let (actions, api) = FakeApi::actions();

        let related = actions
            .fetch_related_posts(&post_with(&["rust", "Backend"]))
            .await
            .unwrap();

        assert!(related.is_empty());
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_single_category_issues_one_request() {
        let (actions, api) = FakeApi::actions();
        api.respond(
            "GET",
            "/tags/backend/posts",
            json!({"data": [
                {"id": 1, "tags": [{"slug": "backend"}]},
                {"id": 100, "slug": "target", "tags": [{"slug": "backend"}, {"slug": "rust"}]},
                {"id": 2, "tags": [{"slug": "backend"}, {"slug": "rust"}]}
            ]}),
        );

        let related = actions
            .fetch_related_posts(&post_with(&["rust", "backend"]))
            .await
            .unwrap();

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/tags/backend/posts");
        let ids: Vec<_> = related.iter().filter_map(|p| p.id.as_ref()?.as_u64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_only_first_category_is_used() {
        let (actions, api) = FakeApi::actions();
        api.respond("GET", "/tags/mobile/posts", json!({"data": []}));

        actions
            .fetch_related_posts(&post_with(&["mobile", "frontend", "qa"]))
            .await
            .unwrap();

        let paths: Vec<_> = api.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/tags/mobile/posts"]);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let (actions, api) = FakeApi::actions();
        api.fail("GET", "/tags/qa/posts", 503, json!("maintenance"));

        let err = actions
            .fetch_related_posts(&post_with(&["qa"]))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
    }
}
