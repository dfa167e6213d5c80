use std::cmp::Reverse;

use crate::models::Post;

/// Orders candidate posts by relevance to a given post.
pub trait PostRanker: Send + Sync {
    /// `post_tags` are the slugs of `post`'s tags in their original order.
    fn rank(&self, post: &Post, post_tags: &[&str], candidates: Vec<Post>) -> Vec<Post>;
}

/// Ranks by the number of tags a candidate shares with the post.
///
/// The post itself is dropped, ties keep API order, and the result is cut to
/// `limit` when one is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedTagRanker {
    limit: Option<usize>,
}

impl SharedTagRanker {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    pub fn score(post_tags: &[&str], candidate: &Post) -> usize {
        candidate
            .tags
            .iter()
            .filter(|t| post_tags.contains(&t.slug.as_str()))
            .count()
    }
}

impl PostRanker for SharedTagRanker {
    fn rank(&self, post: &Post, post_tags: &[&str], candidates: Vec<Post>) -> Vec<Post> {
        let mut scored: Vec<(usize, Post)> = candidates
            .into_iter()
            .filter(|c| !c.is_same_as(post))
            .map(|c| (Self::score(post_tags, &c), c))
            .collect();

        // sort_by_key is stable
        scored.sort_by_key(|(score, _)| Reverse(*score));

        let ranked = scored.into_iter().map(|(_, c)| c);
        match self.limit {
            Some(limit) => ranked.take(limit).collect(),
            None => ranked.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;
    use proptest::prelude::*;

    fn post(id: u64, tags: &[&str]) -> Post {
        Post {
            id: Some(id.into()),
            slug: Some(format!("post-{id}")),
            tags: tags.iter().map(|t| Tag::new(*t)).collect(),
            ..Post::default()
        }
    }

    fn ids(posts: &[Post]) -> Vec<u64> {
        posts.iter().filter_map(|p| p.id.as_ref()?.as_u64()).collect()
    }

    #[test]
    fn test_orders_by_shared_tags() {
        let target = post(1, &["backend", "rust", "remote"]);
        let tags = target.tag_slugs();
        let candidates = vec![
            post(2, &["backend"]),
            post(3, &["backend", "rust", "remote"]),
            post(4, &["backend", "remote"]),
        ];

        let ranked = SharedTagRanker::default().rank(&target, &tags, candidates);
        assert_eq!(ids(&ranked), vec![3, 4, 2]);
    }

    #[test]
    fn test_drops_the_post_itself() {
        let target = post(1, &["qa"]);
        let tags = target.tag_slugs();
        let ranked =
            SharedTagRanker::default().rank(&target, &tags, vec![post(1, &["qa"]), post(5, &["qa"])]);
        assert_eq!(ids(&ranked), vec![5]);
    }

    #[test]
    fn test_limit_truncates_after_sorting() {
        let target = post(1, &["mobile", "ios"]);
        let tags = target.tag_slugs();
        let candidates = vec![
            post(2, &["mobile"]),
            post(3, &["mobile", "ios"]),
            post(4, &["mobile"]),
        ];
        let ranked = SharedTagRanker::new(Some(2)).rank(&target, &tags, candidates);
        assert_eq!(ids(&ranked), vec![3, 2]);
    }

    const SLUGS: [&str; 6] = ["frontend", "backend", "rust", "vue", "remote", "qa"];

    fn arb_tags() -> impl Strategy<Value = Vec<&'static str>> {
        prop::sample::subsequence(SLUGS.to_vec(), 0..=SLUGS.len())
    }

    proptest! {
        #[test]
        fn prop_scores_never_increase_and_ties_keep_order(
            target_tags in arb_tags(),
            candidate_tags in prop::collection::vec(arb_tags(), 0..12),
        ) {
            let target = post(0, &target_tags);
            let tags = target.tag_slugs();
            let candidates: Vec<Post> = candidate_tags
                .iter()
                .enumerate()
                .map(|(i, t)| post(i as u64 + 1, t))
                .collect();

            let ranked = SharedTagRanker::default().rank(&target, &tags, candidates.clone());
            prop_assert_eq!(ranked.len(), candidates.len());

            for pair in ranked.windows(2) {
                let (a, b) = (SharedTagRanker::score(&tags, &pair[0]), SharedTagRanker::score(&tags, &pair[1]));
                prop_assert!(a >= b);
                if a == b {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}
