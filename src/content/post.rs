//! Post model as served by the content API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer for API timestamps; the backend writes numeric
/// offsets without a colon ("+0000") alongside plain RFC 3339
fn timestamp_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
        None => Ok(None),
    }
}

/// Parse a timestamp string in RFC 3339 or bare `%z` offset form
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// A blog post document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Opaque document id, the key `after` cursors refer to
    pub id: String,

    /// URL slug
    pub uid: String,

    /// When the document was first published
    #[serde(default, deserialize_with = "timestamp_opt")]
    pub first_publication_date: Option<DateTime<Utc>>,

    /// When the document was last published
    #[serde(default, deserialize_with = "timestamp_opt")]
    pub last_publication_date: Option<DateTime<Utc>>,

    /// Authored fields
    pub data: PostData,
}

/// Authored fields of a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostData {
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    pub author: String,

    #[serde(default)]
    pub banner: Banner,

    /// Ordered content sections
    #[serde(default)]
    pub content: Vec<Section>,
}

/// Banner image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub url: String,
}

/// A content section: one heading followed by rich-text body fragments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub heading: String,

    #[serde(default)]
    pub body: Vec<TextFragment>,
}

/// One fragment of rich text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextFragment {
    #[serde(default)]
    pub text: String,
}

impl Post {
    /// The moment this post was last edited, if it was edited after
    /// publication at all.
    pub fn edited(&self) -> Option<DateTime<Utc>> {
        match (self.first_publication_date, self.last_publication_date) {
            (Some(first), Some(last)) if last != first => Some(last),
            (None, Some(last)) => Some(last),
            _ => None,
        }
    }
}

/// Title and slug of an adjacent post, all the navigation footer needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborRef {
    pub title: String,
    pub slug: String,
}

impl NeighborRef {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.data.title.clone(),
            slug: post.uid.clone(),
        }
    }
}

/// A post together with its resolved neighbors
#[derive(Debug, Clone)]
pub struct ResolvedPost {
    pub post: Post,
    pub prev_post: Option<NeighborRef>,
    pub next_post: Option<NeighborRef>,
}
