use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use spdlog::{info, warn};

use crate::post::{Post, PostsResponse};
use crate::sort::{sort_posts, SortBy};

/// Reads a `{"posts": [...]}` collection. Derived source-code fields are
/// recomputed so they match the filename and code that were loaded.
pub fn load_posts(path: &Path) -> Result<Vec<Post>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Error opening posts file {}", path.display()))?;
    parse_posts(&content)
        .with_context(|| format!("Error parsing posts file {}", path.display()))
}

pub fn parse_posts(content: &str) -> Result<Vec<Post>> {
    let response: PostsResponse = serde_json::from_str(content)?;
    let posts = response.posts.into_iter()
        .map(|mut post| {
            post.source_code.refresh_derived();
            post
        })
        .collect();
    Ok(posts)
}

/// Never fails: a missing or broken file is logged and treated as an empty
/// collection.
pub fn load_posts_or_empty(path: &Path) -> Vec<Post> {
    match load_posts(path) {
        Ok(posts) => {
            info!("Loaded {} posts from {}", posts.len(), path.display());
            posts
        }
        Err(e) => {
            warn!("Failed to fetch posts, continuing with none: {:#}", e);
            vec![]
        }
    }
}

/// Read-only view over a loaded collection.
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        PostStore { posts }
    }

    pub fn open(path: &Path) -> Self {
        Self::new(load_posts_or_empty(path))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn by_author(&self, author_id: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.author_id == author_id).collect()
    }

    pub fn published(&self) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.is_published).collect()
    }

    pub fn latest(&self, limit: usize) -> Vec<&Post> {
        let mut posts = sort_posts(&self.posts, SortBy::Newest);
        posts.truncate(limit);
        posts
    }

    /// Most liked first.
    pub fn trending(&self, limit: usize) -> Vec<&Post> {
        let mut posts = sort_posts(&self.posts, SortBy::Popular);
        posts.truncate(limit);
        posts
    }

    /// Distinct stored language labels, sorted.
    pub fn available_languages(&self) -> Vec<&str> {
        let languages: BTreeSet<&str> = self.posts.iter()
            .map(|p| p.source_code.language.as_str())
            .collect();
        languages.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::search::{search_posts, SearchFilters};
    use crate::test_data::POSTS_JSON;

    use super::*;

    fn store() -> PostStore {
        PostStore::new(parse_posts(POSTS_JSON).unwrap())
    }

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_parse_refreshes_derived_fields() {
        let posts = parse_posts(POSTS_JSON).unwrap();
        let crawler = &posts[1].source_code;
        assert_eq!(crawler.file_extension.as_deref(), Some(".py"));
        assert_eq!(crawler.detected_language.as_deref(), Some("python"));

        let grid = &posts[3].source_code;
        assert_eq!(grid.file_extension.as_deref(), Some(".scss"));
        assert_eq!(grid.detected_language.as_deref(), Some("css"));
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let path = PathBuf::from("does/not/exist/posts.json");
        assert!(load_posts(&path).is_err());
        assert!(load_posts_or_empty(&path).is_empty());
        assert!(PostStore::open(&path).posts().is_empty());
    }

    #[test]
    fn test_broken_json_is_an_error() {
        assert!(parse_posts("{\"posts\": [").is_err());
        assert!(parse_posts("{}").unwrap().is_empty());
    }

    #[test]
    fn test_date_only_timestamps_load() {
        let posts = parse_posts(r#"{"posts": [{
            "id": "post-100", "title": "Dates", "sourceCode": {"filename": "a.py", "code": ""},
            "createdAt": "2024-01-15", "updatedAt": "2024-01-15T09:00:00"
        }]}"#).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].created_at.to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_unknown_extensions_stay_out_of_language_filters() {
        let posts = parse_posts(r#"{"posts": [
            {"id": "a", "title": "Scala lists",
             "sourceCode": {"filename": "List.scala", "language": "scala", "code": "val xs = List(1, 2)"},
             "createdAt": "2024-01-15T00:00:00Z", "updatedAt": "2024-01-15T00:00:00Z"},
            {"id": "b", "title": "Lua init",
             "sourceCode": {"filename": "init.lua", "language": "lua", "code": "print(x)"},
             "createdAt": "2024-01-16T00:00:00Z", "updatedAt": "2024-01-16T00:00:00Z"}
        ]}"#).unwrap();
        assert!(posts.iter().all(|p| p.source_code.detected_language.is_none()));

        let by_language = |language: &str| {
            let filters = SearchFilters { language: Some(language.to_string()), ..Default::default() };
            ids(&search_posts(&posts, &filters))
        };
        assert!(by_language("typescript").is_empty());
        assert!(by_language("python").is_empty());
        assert_eq!(by_language("scala"), ["a"]);
        assert_eq!(by_language("lua"), ["b"]);
    }

    #[test]
    fn test_lookups() {
        let store = store();
        assert_eq!(store.find_by_id("post-003").map(|p| p.title.as_str()), Some("Rust ownership cheatsheet"));
        assert!(store.find_by_id("post-999").is_none());
        assert_eq!(ids(&store.by_author("user-002")), ["post-002", "post-005"]);
        assert_eq!(store.published().len(), 4);
    }

    #[test]
    fn test_listings() {
        let store = store();
        assert_eq!(ids(&store.latest(2)), ["post-004", "post-005"]);
        assert_eq!(ids(&store.trending(3)), ["post-002", "post-005", "post-001"]);
        assert_eq!(store.latest(50).len(), 5);
    }

    #[test]
    fn test_available_languages() {
        let store = store();
        assert_eq!(store.available_languages(), ["Python", "css", "golang", "rust", "typescript"]);
    }
}
