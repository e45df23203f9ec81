use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::post::Post;

/// Orders a search can request through `sortBy`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Most recent first
    Newest,
    /// Oldest first
    Oldest,
    /// Most liked first
    Popular,
    /// Most viewed first
    Views,
}

impl SortBy {
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            SortBy::Newest => b.created_at.cmp(&a.created_at),
            SortBy::Oldest => a.created_at.cmp(&b.created_at),
            SortBy::Popular => b.likes.cmp(&a.likes),
            SortBy::Views => b.views.cmp(&a.views),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortBy::Newest),
            "oldest" => Ok(SortBy::Oldest),
            "popular" => Ok(SortBy::Popular),
            "views" => Ok(SortBy::Views),
            other => Err(format!("Unknown sort order {}", other)),
        }
    }
}

impl Display for SortBy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortBy::Newest => "newest",
            SortBy::Oldest => "oldest",
            SortBy::Popular => "popular",
            SortBy::Views => "views",
        };
        write!(f, "{}", name)
    }
}

/// Returns a sorted copy. The sort is stable, equal keys keep their order.
pub fn sort_posts<'a>(posts: impl IntoIterator<Item=&'a Post>, sort_by: SortBy) -> Vec<&'a Post> {
    let mut sorted: Vec<&Post> = posts.into_iter().collect();
    sorted.sort_by(|a, b| sort_by.compare(a, b));
    sorted
}

/// Likes weigh twenty times as much as views.
pub fn trending_score(post: &Post) -> f64 {
    post.likes as f64 * 2.0 + post.views as f64 * 0.1
}

pub fn compare_trending(a: &Post, b: &Post) -> Ordering {
    trending_score(b).total_cmp(&trending_score(a))
}

/// Not reachable through [`SortBy`], callers use it directly.
pub fn sort_trending<'a>(posts: impl IntoIterator<Item=&'a Post>) -> Vec<&'a Post> {
    let mut sorted: Vec<&Post> = posts.into_iter().collect();
    sorted.sort_by(|a, b| compare_trending(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use crate::test_data::sample_posts;

    use super::*;

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_newest_and_oldest() {
        let posts = sample_posts();
        // post-004 is 2024-03-05T00:15:00Z once the +09:00 offset is applied
        assert_eq!(ids(&sort_posts(&posts, SortBy::Newest)), ["post-004", "post-005", "post-002", "post-001", "post-003"]);
        assert_eq!(ids(&sort_posts(&posts, SortBy::Oldest)), ["post-003", "post-001", "post-002", "post-005", "post-004"]);
    }

    #[test]
    fn test_popular_and_views() {
        let posts = sample_posts();
        assert_eq!(ids(&sort_posts(&posts, SortBy::Popular)), ["post-002", "post-005", "post-001", "post-004", "post-003"]);
        assert_eq!(ids(&sort_posts(&posts, SortBy::Views)), ["post-003", "post-004", "post-001", "post-002", "post-005"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut posts = sample_posts();
        for post in posts.iter_mut() {
            post.likes = 7;
        }
        let sorted = sort_posts(&posts, SortBy::Popular);
        assert_eq!(ids(&sorted), ["post-001", "post-002", "post-003", "post-004", "post-005"]);
    }

    #[test]
    fn test_input_left_untouched() {
        let posts = sample_posts();
        let _ = sort_posts(&posts, SortBy::Views);
        assert_eq!(posts[0].id, "post-001");
    }

    #[test]
    fn test_trending() {
        let posts = sample_posts();
        // 002: 189.0, 005: 135.5, 003: 120.0, 001: 116.0, 004: 87.0
        assert_eq!(trending_score(&posts[0]), 116.0);
        assert_eq!(ids(&sort_trending(&posts)), ["post-002", "post-005", "post-003", "post-001", "post-004"]);
    }

    #[test]
    fn test_parse_sort_by() {
        assert_eq!("Popular".parse::<SortBy>(), Ok(SortBy::Popular));
        assert_eq!(" views ".parse::<SortBy>(), Ok(SortBy::Views));
        assert!("trending".parse::<SortBy>().is_err());
        assert_eq!(SortBy::Newest.to_string(), "newest");
    }
}
