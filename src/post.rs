use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::detection::FilenameSignal;
use crate::language::{detect_language, file_extension, normalize_language_name};
use crate::timestamp;

/// The attached file of a post.
///
/// `file_extension` and `detected_language` are derived from `filename` and
/// `code`. Go through [`SourceCode::set_filename`] and [`SourceCode::set_code`]
/// so they never go stale. `detected_language` stays empty for filenames the
/// extension table does not know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCode {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
}

impl SourceCode {
    pub fn new(filename: &str, language: &str, code: &str) -> Self {
        let mut source = SourceCode {
            filename: filename.to_string(),
            language: language.to_string(),
            code: code.to_string(),
            file_extension: None,
            detected_language: None,
        };
        source.refresh_derived();
        source
    }

    /// Recomputes the cached extension and detected language.
    pub fn refresh_derived(&mut self) {
        self.file_extension = file_extension(&self.filename);
        self.detected_language = match FilenameSignal::from_filename(&self.filename) {
            FilenameSignal::Known(_) => Some(detect_language(&self.filename, &self.code).to_string()),
            FilenameSignal::Unknown => None,
        };
    }

    /// Normalizes the stored label and refreshes the derived fields.
    pub fn enrich(mut self) -> Self {
        self.language = normalize_language_name(&self.language);
        self.refresh_derived();
        self
    }

    pub fn set_filename(&mut self, filename: &str) {
        self.filename = filename.to_string();
        self.refresh_derived();
    }

    pub fn set_code(&mut self, code: &str) {
        self.code = code.to_string();
        self.refresh_derived();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    pub source_code: SourceCode,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub is_published: bool,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, author={}, likes={}, views={}\ntitle={}\nfile={} ({})\ntags={}",
               self.id,
               self.created_at,
               self.author_id,
               self.likes,
               self.views,
               self.title,
               self.source_code.filename,
               self.source_code.language,
               self.tags.join(" "),
        )
    }
}

/// Shape of the JSON collection handed over by the data layer
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PostsResponse {
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[cfg(test)]
mod tests {
    use crate::test_data::POSTS_JSON;

    use super::*;

    #[test]
    fn test_parse_collection() {
        let res: PostsResponse = serde_json::from_str(POSTS_JSON).unwrap();
        assert_eq!(res.posts.len(), 5);

        let post = &res.posts[0];
        assert_eq!(post.id, "post-001");
        assert_eq!(post.source_code.filename, "useLocalStorage.ts");
        assert_eq!(post.tags, ["react", "hooks", "typescript"]);
        assert!(post.is_published);
        assert_eq!(post.created_at.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_enrich() {
        let src = SourceCode::new("fib.PY", "Py ", "def fib(n): pass").enrich();
        assert_eq!(src.language, "python");
        assert_eq!(src.file_extension.as_deref(), Some(".py"));
        assert_eq!(src.detected_language.as_deref(), Some("python"));
    }

    #[test]
    fn test_derived_fields_follow_edits() {
        let mut src = SourceCode::new("", "", "");
        assert_eq!(src.file_extension, None);
        assert_eq!(src.detected_language, None);

        src.set_code("def main():\n    pass");
        assert_eq!(src.detected_language, None);

        src.set_filename("main.ts");
        assert_eq!(src.detected_language.as_deref(), Some("python"));

        src.set_filename("main.go");
        assert_eq!(src.file_extension.as_deref(), Some(".go"));
        assert_eq!(src.detected_language.as_deref(), Some("go"));
    }

    #[test]
    fn test_unknown_filename_has_no_detected_language() {
        let scala = SourceCode::new("List.scala", "scala", "val xs = List(1, 2)");
        assert_eq!(scala.file_extension.as_deref(), Some(".scala"));
        assert_eq!(scala.detected_language, None);

        let lua = SourceCode::new("init.lua", "lua", "print(x)");
        assert_eq!(lua.detected_language, None);
    }

    #[test]
    fn test_date_only_timestamps() {
        let json = r#"{"id": "p", "title": "t", "sourceCode": {},
            "createdAt": "2024-01-15", "updatedAt": "2024-01-16T08:30:00"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.created_at.to_rfc3339(), "2024-01-15T00:00:00+00:00");
        assert_eq!(post.updated_at.to_rfc3339(), "2024-01-16T08:30:00+00:00");
    }

    #[test]
    fn test_display() {
        let res: PostsResponse = serde_json::from_str(POSTS_JSON).unwrap();
        let text = res.posts[0].to_string();
        assert!(text.starts_with("id=post-001,"));
        assert!(text.ends_with("tags=react hooks typescript"));
    }
}
