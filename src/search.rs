use serde::{Deserialize, Serialize};
use spdlog::debug;

use crate::language::is_post_matching_language;
use crate::post::Post;
use crate::sort::{sort_posts, SortBy};

const EXACT_MATCH: u32 = 10;
const PREFIX_MATCH: u32 = 5;
const PARTIAL_MATCH: u32 = 1;

/// Multiplier applied to the text score of each field
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchWeights {
    pub title: u32,
    pub description: u32,
    pub tags: u32,
    pub content: u32,
}

pub const SEARCH_WEIGHTS: SearchWeights = SearchWeights {
    title: 3,
    description: 2,
    tags: 3,
    content: 1,
};

/// Per-request search parameters. Every field is optional.
///
/// Cross-field rule: an active free-text query suppresses `sort_by`, results
/// stay in relevance order. See [`SearchFilters::effective_sort`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub query: Option<String>,
    pub tags: Option<Vec<String>>,
    pub language: Option<String>,
    pub sort_by: Option<SortBy>,
}

impl SearchFilters {
    /// The query, if it is set and not the empty string. A whitespace-only
    /// query still counts as active.
    pub fn active_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    pub fn required_tags(&self) -> Option<&[String]> {
        self.tags.as_deref().filter(|tags| !tags.is_empty())
    }

    pub fn target_language(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty())
    }

    /// Relevance wins over a requested order.
    pub fn effective_sort(&self) -> Option<SortBy> {
        match self.active_query() {
            Some(_) => None,
            None => self.sort_by,
        }
    }
}

pub fn parse_keywords(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}

/// Sums, for each keyword, the first rule that applies: exact match, prefix
/// or plain containment. Comparison is case-insensitive.
pub fn calculate_text_score(text: &str, keywords: &[&str]) -> u32 {
    if text.is_empty() || keywords.is_empty() {
        return 0;
    }

    let lower_text = text.to_lowercase();
    keywords.iter()
        .map(|keyword| {
            let keyword = keyword.to_lowercase();
            if lower_text == keyword {
                EXACT_MATCH
            } else if lower_text.starts_with(&keyword) {
                PREFIX_MATCH
            } else if lower_text.contains(&keyword) {
                PARTIAL_MATCH
            } else {
                0
            }
        })
        .sum()
}

/// Weighted relevance of a post. Without keywords every post scores 1.
pub fn calculate_post_score(post: &Post, keywords: &[&str]) -> u32 {
    if keywords.is_empty() {
        return 1;
    }

    let tags_text = post.tags.join(" ");
    calculate_text_score(&post.title, keywords) * SEARCH_WEIGHTS.title
        + calculate_text_score(&post.description, keywords) * SEARCH_WEIGHTS.description
        + calculate_text_score(&post.content, keywords) * SEARCH_WEIGHTS.content
        + calculate_text_score(&tags_text, keywords) * SEARCH_WEIGHTS.tags
}

fn rank_by_relevance<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let keywords = parse_keywords(query);
    let mut scored: Vec<(u32, &Post)> = posts.iter()
        .map(|post| (calculate_post_score(post, &keywords), post))
        .filter(|(score, _)| *score > 0)
        .collect();

    // Stable, equal scores keep collection order
    scored.sort_by(|(sa, _), (sb, _)| sb.cmp(sa));
    scored.into_iter().map(|(_, post)| post).collect()
}

/// Runs the filter pipeline: relevance ranking, tag filter, language filter,
/// then the requested order when no query is active. Each stage only narrows
/// or reorders what the previous one produced.
pub fn search_posts<'a>(posts: &'a [Post], filters: &SearchFilters) -> Vec<&'a Post> {
    let mut filtered: Vec<&Post> = match filters.active_query() {
        Some(query) => rank_by_relevance(posts, query),
        None => posts.iter().collect(),
    };

    // Case-sensitive, tags are compared as stored
    if let Some(tags) = filters.required_tags() {
        filtered.retain(|post| tags.iter().any(|tag| post.tags.contains(tag)));
    }

    if let Some(language) = filters.target_language() {
        filtered.retain(|post| is_post_matching_language(post, language));
    }

    if let Some(sort_by) = filters.effective_sort() {
        filtered = sort_posts(filtered, sort_by);
    }

    debug!("Search {:?} matched {} of {} posts", filters, filtered.len(), posts.len());
    filtered
}
