//! Tag catalog and user directory, the two reference collections that sit
//! next to the posts. Both load the way posts do: a missing or broken file
//! is logged and treated as empty.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use spdlog::{info, warn};

use crate::timestamp;

/// Color of tags the catalog does not describe
pub const DEFAULT_TAG_COLOR: &str = "gray";

/// Author name shown for ids missing from the directory
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Language,
    Framework,
    Concept,
    Tool,
    Domain,
    Database,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TagCategory,
    #[serde(default)]
    pub color: String,
    /// As stored in the catalog. Live counts come from [`crate::tag_stats`].
    #[serde(default)]
    pub usage_count: u64,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub posts: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub stats: UserStats,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub joined_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub last_active_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<User>,
}

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Error opening {} file {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Error parsing {} file {}", what, path.display()))
}

pub struct TagCatalog {
    tags: Vec<Tag>,
}

impl TagCatalog {
    pub fn new(tags: Vec<Tag>) -> Self {
        TagCatalog { tags }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn load(path: &Path) -> Result<Self> {
        let response: TagsResponse = load_json(path, "tags")?;
        Ok(Self::new(response.tags))
    }

    pub fn open(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => {
                info!("Loaded {} tags from {}", catalog.tags.len(), path.display());
                catalog
            }
            Err(e) => {
                warn!("Failed to fetch tags, continuing with none: {:#}", e);
                Self::empty()
            }
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// Case-insensitive lookup by tag name.
    pub fn find_by_name(&self, name: &str) -> Option<&Tag> {
        let name = name.to_lowercase();
        self.tags.iter().find(|t| t.name.to_lowercase() == name)
    }

    pub fn by_category(&self, category: TagCategory) -> Vec<&Tag> {
        self.tags.iter().filter(|t| t.category == category).collect()
    }

    /// Catalog color for `name`, [`DEFAULT_TAG_COLOR`] when the tag is unknown
    /// or has no color.
    pub fn tag_color(&self, name: &str) -> &str {
        self.find_by_name(name)
            .map(|t| t.color.as_str())
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_TAG_COLOR)
    }

    pub fn tag_colors<'a>(&'a self, names: &'a [String]) -> HashMap<&'a str, &'a str> {
        names.iter()
            .map(|name| (name.as_str(), self.tag_color(name)))
            .collect()
    }
}

pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        UserDirectory { users }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn load(path: &Path) -> Result<Self> {
        let response: UsersResponse = load_json(path, "users")?;
        Ok(Self::new(response.users))
    }

    pub fn open(path: &Path) -> Self {
        match Self::load(path) {
            Ok(directory) => {
                info!("Loaded {} users from {}", directory.users.len(), path.display());
                directory
            }
            Err(e) => {
                warn!("Failed to fetch users, continuing with none: {:#}", e);
                Self::empty()
            }
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Username of the author, or [`UNKNOWN_AUTHOR`].
    pub fn author_name(&self, id: &str) -> &str {
        self.find_by_id(id)
            .map(|u| u.username.as_str())
            .unwrap_or(UNKNOWN_AUTHOR)
    }
}
