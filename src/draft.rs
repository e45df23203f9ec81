use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use spdlog::info;
use uuid::Uuid;

use crate::language::detect_language;
use crate::post::{Post, SourceCode};

/// File attached to a draft. `language` stays `None` until the author picks
/// one, in which case the detector decides at publish time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftSource {
    pub filename: String,
    pub code: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub content: String,
    pub source: DraftSource,
    pub author_id: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DraftError {
    MissingTitle,
    MissingDescription,
    MissingCode,
    MissingFilename,
    MissingTags,
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let desc = match self {
            DraftError::MissingTitle => "title is required",
            DraftError::MissingDescription => "description is required",
            DraftError::MissingCode => "source code is required",
            DraftError::MissingFilename => "filename is required",
            DraftError::MissingTags => "at least one tag is required",
        };
        write!(f, "{}", desc)
    }
}

impl PostDraft {
    /// Reports every missing field at once.
    pub fn validate(&self) -> Result<(), Vec<DraftError>> {
        let mut errors = vec![];

        if self.title.trim().is_empty() {
            errors.push(DraftError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            errors.push(DraftError::MissingDescription);
        }
        if self.source.code.trim().is_empty() {
            errors.push(DraftError::MissingCode);
        }
        if self.source.filename.trim().is_empty() {
            errors.push(DraftError::MissingFilename);
        }
        if self.tags.is_empty() {
            errors.push(DraftError::MissingTags);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Adds `tag` or removes it when already selected.
    pub fn toggle_tag(&mut self, tag: &str) {
        match self.tags.iter().position(|t| t == tag) {
            Some(pos) => {
                self.tags.remove(pos);
            }
            None => self.tags.push(tag.to_string()),
        }
    }

    fn source_code(&self) -> SourceCode {
        let language = match self.source.language {
            Some(ref lang) if !lang.trim().is_empty() => lang.clone(),
            _ => detect_language(&self.source.filename, &self.source.code).to_string(),
        };
        SourceCode::new(&self.source.filename, &language, &self.source.code).enrich()
    }

    /// Turns a valid draft into a post, either published or kept as a draft.
    pub fn publish(&self, published: bool, now: DateTime<Utc>) -> Result<Post, Vec<DraftError>> {
        self.validate()?;

        let post = Post {
            id: Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            content: self.content.clone(),
            source_code: self.source_code(),
            author_id: self.author_id.clone(),
            tags: self.tags.clone(),
            likes: 0,
            views: 0,
            comments: 0,
            is_published: published,
            created_at: now,
            updated_at: now,
        };

        info!("Created post {} ({}), published={}", post.id, post.source_code.language, published);
        Ok(post)
    }
}
