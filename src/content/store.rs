//! Content store seam
//!
//! `ContentStore` abstracts the read side of the headless content API:
//! fetch one document by uid, or run a listing query with ordering,
//! paging and an `after` cursor. The HTTP client implements it against
//! the real API; `MemoryStore` backs tests and offline previews.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::{ApiConfig, TieBreak};
use crate::content::post::Post;

/// Content store errors
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Content API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Content API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Content API endpoint is not configured")]
    Unconfigured,
}

/// Sort order for listing queries, keyed on first publication time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    PublicationAsc,
    PublicationDesc,
}

/// A listing query against the content store
#[derive(Debug, Clone)]
pub struct Query {
    pub content_type: String,
    pub order: Order,
    /// 1-based result page
    pub page: usize,
    pub page_size: usize,
    /// Document id to start after (exclusive), in the current ordering
    pub after: Option<String>,
    pub tie_break: TieBreak,
}

impl Query {
    pub fn new(content_type: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            order: Order::PublicationDesc,
            page: 1,
            page_size: 20,
            after: None,
            tie_break: TieBreak::None,
        }
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn after(mut self, id: &str) -> Self {
        self.after = Some(id.to_string());
        self
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

/// One page of listing results
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub page: usize,
    pub total_pages: usize,
    #[serde(default)]
    pub next_page: Option<String>,
    pub results: Vec<Post>,
}

/// Read-side interface of the headless content API
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch a single document by its uid
    async fn get_by_uid(&self, content_type: &str, uid: &str) -> Result<Post, ContentError>;

    /// Run a listing query
    async fn query(&self, query: &Query) -> Result<QueryResponse, ContentError>;
}

/// Fetch every document of the configured type, newest first, walking
/// the listing pages
pub async fn all_posts(
    store: &dyn ContentStore,
    api: &ApiConfig,
) -> Result<Vec<Post>, ContentError> {
    let mut posts = Vec::new();
    let mut page = 1;

    loop {
        let query = Query::new(&api.content_type)
            .order(Order::PublicationDesc)
            .page_size(api.page_size)
            .page(page)
            .tie_break(api.tie_break);
        let response = store.query(&query).await?;
        posts.extend(response.results);

        if page >= response.total_pages {
            break;
        }
        page += 1;
    }

    Ok(posts)
}

/// In-memory content store holding documents of a single type.
///
/// Implements the same ordering and cursor semantics the remote API
/// provides: results are sorted by first publication time, the `after`
/// id is excluded, and an unknown `after` id yields an empty page. The
/// tie-break key, when set, is applied ascending under both orders.
pub struct MemoryStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryStore {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    fn sorted(posts: &[Post], query: &Query) -> Vec<Post> {
        let mut posts = posts.to_vec();
        posts.sort_by(|a, b| {
            let primary = match query.order {
                Order::PublicationAsc => a.first_publication_date.cmp(&b.first_publication_date),
                Order::PublicationDesc => b.first_publication_date.cmp(&a.first_publication_date),
            };
            primary.then_with(|| match query.tie_break {
                TieBreak::None => std::cmp::Ordering::Equal,
                TieBreak::Uid => a.uid.cmp(&b.uid),
                TieBreak::Id => a.id.cmp(&b.id),
            })
        });
        posts
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get_by_uid(&self, _content_type: &str, uid: &str) -> Result<Post, ContentError> {
        let posts = self.posts.read().await;
        posts
            .iter()
            .find(|p| p.uid == uid)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(uid.to_string()))
    }

    async fn query(&self, query: &Query) -> Result<QueryResponse, ContentError> {
        let posts = self.posts.read().await;
        let ordered = Self::sorted(&posts, query);

        let start = match &query.after {
            Some(id) => match ordered.iter().position(|p| &p.id == id) {
                Some(pos) => pos + 1,
                None => ordered.len(),
            },
            None => 0,
        };

        let page_size = query.page_size.max(1);
        let page = query.page.max(1);
        let total = ordered.len() - start;
        let total_pages = total.div_ceil(page_size);

        let results: Vec<Post> = ordered[start..]
            .iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();

        let next_page = if page < total_pages {
            Some(format!("page={}", page + 1))
        } else {
            None
        };

        Ok(QueryResponse {
            page,
            total_pages,
            next_page,
            results,
        })
    }
}
