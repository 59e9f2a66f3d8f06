//! Posts and the fields a user fills in to write one.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::Timestamp;

/// Server-assigned post identifier.
///
/// Backends disagree on whether ids are strings or numbers; both decode to
/// the same textual form so lookups by id behave identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Wrap an id as the backend spelled it.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as used in request paths.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

struct PostIdVisitor;

impl Visitor<'_> for PostIdVisitor {
    type Value = PostId;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string or integer post id")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<PostId, E> {
        Ok(PostId::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<PostId, E> {
        Ok(PostId(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<PostId, E> {
        Ok(PostId(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<PostId, E> {
        Ok(PostId(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PostIdVisitor)
    }
}

/// A post as the server returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier, `_id` on the wire.
    #[serde(rename = "_id", alias = "id")]
    pub id: PostId,

    /// Headline shown on the card
    #[serde(default)]
    pub title: String,

    /// Body text
    #[serde(default)]
    pub message: String,

    /// Free-form author label entered in the form.
    #[serde(default)]
    pub creator: String,

    /// Display name of the signed-in author, when the backend records one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tags without the leading `#`
    #[serde(default)]
    pub tags: Vec<String>,

    /// Attached image as a data URL or link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_file: Option<String>,

    /// Like counter kept by the server
    #[serde(default)]
    pub like_count: i64,

    /// Ids of the users who liked this post.
    #[serde(default)]
    pub likes: Vec<String>,

    /// When the post was first published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Post {
    /// Minimal post with only an id and a title.
    #[must_use]
    pub fn new(id: impl Into<PostId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            message: String::new(),
            creator: String::new(),
            name: None,
            tags: Vec::new(),
            selected_file: None,
            like_count: 0,
            likes: Vec::new(),
            created_at: None,
        }
    }

    /// Copy the editable fields into a draft for the edit form.
    #[must_use]
    pub fn to_draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.clone(),
            message: self.message.clone(),
            creator: self.creator.clone(),
            tags: self.tags.clone(),
            selected_file: self.selected_file.clone(),
        }
    }

    /// Total likes, whichever counter the backend maintains.
    #[must_use]
    pub fn total_likes(&self) -> i64 {
        let listed = i64::try_from(self.likes.len()).unwrap_or(i64::MAX);
        self.like_count.max(listed)
    }

    /// Whether `user_id` authored this post or is named as its creator.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.creator == user_id
    }
}

/// Caller-supplied post fields, sent when creating or updating a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    /// Headline
    pub title: String,
    /// Body text
    pub message: String,
    /// Author id or label
    pub creator: String,
    /// Tags, already split
    pub tags: Vec<String>,
    /// Optional image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_file: Option<String>,
}

impl PostDraft {
    /// Split a comma separated tag field.
    #[must_use]
    pub fn parse_tags(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// True when there is nothing worth sending.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.message.trim().is_empty()
    }
}
