pub mod config;
pub mod logger;
pub mod language;
pub mod post;
pub mod tag_stats;
pub mod search;
pub mod sort;
pub mod post_store;
pub mod catalog;
pub mod draft;
pub mod query_string;
pub mod paginator;
pub mod text_utils;
pub mod timestamp;
mod test_data;

pub use language::{detect_language, is_post_matching_language, normalize_language_name};
pub use post::{Post, SourceCode};
pub use search::{search_posts, SearchFilters};
pub use sort::SortBy;
pub use tag_stats::{get_tag_usage_stats, search_tag_suggestions};
