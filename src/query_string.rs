use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::search::SearchFilters;
use crate::sort::SortBy;

/// Search request parameters as they arrive from a URL, e.g.
/// `q=react+hooks&tags=react,frontend&sort=popular&page=2`.
#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.items.get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn get_page(&self) -> u32 {
        let one = "1".to_string();
        let val = self.items.get("page").unwrap_or(&one);
        let val = val.parse().unwrap_or(1);
        if val == 0 { return 1; }
        val
    }

    /// `q` wins over `tag`, which wins over `language`. A clicked tag is
    /// searched as free text. `tags` and `sort` are applied on top.
    pub fn to_filters(&self) -> SearchFilters {
        let mut filters = SearchFilters::default();

        if let Some(query) = self.get_non_empty("q") {
            filters.query = Some(query.to_string());
        } else if let Some(tag) = self.get_non_empty("tag") {
            filters.query = Some(tag.to_string());
        } else if let Some(language) = self.get_non_empty("language") {
            filters.language = Some(language.to_string());
        }

        if let Some(tags) = self.get_non_empty("tags") {
            filters.tags = Some(split_tags(tags));
        }

        // Unknown orders are ignored
        filters.sort_by = self.get_non_empty("sort")
            .and_then(|s| s.parse::<SortBy>().ok());

        filters
    }
}

/// Splits a comma and/or space separated tag list.
pub fn split_tags(tags_str: &str) -> Vec<String> {
    lazy_static! {
        static ref TAG_SEPARATOR: Regex = Regex::new(r"[,\s]+").unwrap();
    }

    TAG_SEPARATOR.split(tags_str)
        .filter(|x| !x.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_page() {
        assert_eq!(QueryString::from("page=3").get_page(), 3);
        assert_eq!(QueryString::from("page=0").get_page(), 1);
        assert_eq!(QueryString::from("page=abc").get_page(), 1);
        assert_eq!(QueryString::from("q=rust").get_page(), 1);
    }

    #[test]
    fn test_parse_query_str() {
        let buf = "q=react+hooks&tags=react%2Cfrontend&sort=popular";
        let expected = vec![
            ("q".to_owned(), "react hooks".to_owned()),
            ("tags".to_owned(), "react,frontend".to_owned()),
            ("sort".to_owned(), "popular".to_owned()),
        ].into_iter().collect::<HashMap<_, _>>();

        assert_eq!(QueryString::from(buf), QueryString { items: expected });
    }

    #[test]
    fn test_parse_invalid_query_str() {
        let buf = "";
        let expected = QueryString {
            items: Default::default(),
        };
        assert_eq!(QueryString::from(buf), expected);
        assert_eq!(QueryString::from(buf).to_filters(), SearchFilters::default());
    }

    #[test]
    fn test_to_filters() {
        let filters = QueryString::from("q=react+hooks&tags=react,+frontend&sort=Popular").to_filters();
        assert_eq!(filters, SearchFilters {
            query: Some("react hooks".to_string()),
            tags: Some(vec!["react".to_string(), "frontend".to_string()]),
            language: None,
            sort_by: Some(SortBy::Popular),
        });
    }

    #[test]
    fn test_query_precedence() {
        let filters = QueryString::from("q=async&tag=python&language=py").to_filters();
        assert_eq!(filters.query.as_deref(), Some("async"));
        assert_eq!(filters.language, None);

        let filters = QueryString::from("tag=python&language=py").to_filters();
        assert_eq!(filters.query.as_deref(), Some("python"));
        assert_eq!(filters.language, None);

        let filters = QueryString::from("q=&language=py").to_filters();
        assert_eq!(filters.query, None);
        assert_eq!(filters.language.as_deref(), Some("py"));
    }

    #[test]
    fn test_unknown_sort_is_ignored() {
        let filters = QueryString::from("sort=trending").to_filters();
        assert_eq!(filters.sort_by, None);
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("one two,three ,  four"), ["one", "two", "three", "four"]);
        assert!(split_tags(" , ").is_empty());
    }
}
