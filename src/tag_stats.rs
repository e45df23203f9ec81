use std::collections::HashMap;

use serde::Serialize;

use crate::post::Post;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Tag name to number of occurrences across a post collection.
///
/// Entries keep the order in which tags were first seen, so sorting by count
/// leaves ties in collection order. Every occurrence counts: a tag listed
/// twice in one post adds two.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TagStats {
    entries: Vec<TagCount>,
    index: HashMap<String, usize>,
}

impl TagStats {
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut stats = TagStats::default();
        for post in posts {
            for tag in post.tags.iter() {
                stats.add(tag);
            }
        }
        stats
    }

    fn add(&mut self, tag: &str) {
        match self.index.get(tag) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.index.insert(tag.to_string(), self.entries.len());
                self.entries.push(TagCount { tag: tag.to_string(), count: 1 });
            }
        }
    }

    pub fn get(&self, tag: &str) -> Option<usize> {
        self.index.get(tag).map(|&pos| self.entries[pos].count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=&TagCount> {
        self.entries.iter()
    }

    pub fn into_map(self) -> HashMap<String, usize> {
        self.entries.into_iter().map(|e| (e.tag, e.count)).collect()
    }

    // Sort tags by frequency reversed
    fn by_count_desc(entries: impl Iterator<Item=TagCount>) -> Vec<TagCount> {
        let mut tag_list: Vec<TagCount> = entries.collect();
        tag_list.sort_by(|a, b| b.count.cmp(&a.count));
        tag_list
    }
}

pub fn get_tag_usage_stats(posts: &[Post]) -> HashMap<String, usize> {
    TagStats::from_posts(posts).into_map()
}

/// Tags containing `query` (case-insensitive), most used first.
/// A blank query yields nothing.
pub fn search_tag_suggestions(posts: &[Post], query: &str, limit: usize) -> Vec<TagCount> {
    if query.trim().is_empty() {
        return vec![];
    }

    let lower_query = query.to_lowercase();
    let stats = TagStats::from_posts(posts);
    let matching = stats.entries.into_iter()
        .filter(|e| e.tag.to_lowercase().contains(&lower_query));

    let mut tags = TagStats::by_count_desc(matching);
    tags.truncate(limit);
    tags
}

pub fn popular_tags(posts: &[Post], top: usize) -> Vec<TagCount> {
    let stats = TagStats::from_posts(posts);
    let mut tags = TagStats::by_count_desc(stats.entries.into_iter());
    tags.truncate(top);
    tags
}
