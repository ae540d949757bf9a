//! The stored book record as consumed by the exporters.
//!
//! Field names follow the JSON the authoring application persists
//! (`camelCase`, with `userId` accepted for the owner).

use crate::ids::{BookId, UserId};
use serde::{Deserialize, Serialize};

/// Byline used when a book has no (or a blank) author.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Cover paths containing this marker point at a generated avatar, not a real cover.
pub const PLACEHOLDER_COVER_SENTINEL: &str = "pravatar";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    #[serde(alias = "userId")]
    pub owner_id: UserId,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Book {
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    /// The subtitle, if present and not blank.
    pub fn display_subtitle(&self) -> Option<&str> {
        non_blank(self.subtitle.as_deref())
    }

    pub fn display_author(&self) -> &str {
        non_blank(self.author.as_deref()).unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn byline(&self) -> String {
        format!("by {}", self.display_author())
    }

    /// The cover path, unless it is absent, blank, or a placeholder avatar.
    pub fn real_cover_image(&self) -> Option<&str> {
        non_blank(self.cover_image.as_deref())
            .filter(|path| !path.contains(PLACEHOLDER_COVER_SENTINEL))
    }
}

impl Chapter {
    /// The chapter title, falling back to `Chapter {index + 1}`.
    pub fn display_title(&self, index: usize) -> String {
        match non_blank(self.title.as_deref()) {
            Some(title) => title.to_string(),
            None => format!("Chapter {}", index + 1),
        }
    }

    /// The chapter body, unless it is absent or whitespace only.
    pub fn markup(&self) -> Option<&str> {
        non_blank(self.content.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
