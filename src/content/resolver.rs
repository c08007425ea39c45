//! Post resolution
//!
//! Turns a slug into the post plus the two documents its navigation
//! footer links to.

use std::sync::Arc;

use crate::config::{ApiConfig, TieBreak};
use crate::content::post::{NeighborRef, ResolvedPost};
use crate::content::store::{ContentError, ContentStore, Order, Query};

/// Resolves slugs against the content store
pub struct PostResolver {
    store: Arc<dyn ContentStore>,
    content_type: String,
    tie_break: TieBreak,
}

impl PostResolver {
    pub fn new(store: Arc<dyn ContentStore>, config: &ApiConfig) -> Self {
        Self {
            store,
            content_type: config.content_type.clone(),
            tie_break: config.tie_break,
        }
    }

    /// Resolve a slug into the post and its navigation neighbors.
    ///
    /// The record fetch completes first; the two neighbor queries then
    /// run concurrently, each asking for the single document after this
    /// one: ascending publication order fills the `prev` slot,
    /// descending fills `next`. A post at the end of either ordering
    /// has no neighbor on that side.
    pub async fn resolve(&self, slug: &str) -> Result<ResolvedPost, ContentError> {
        let post = self.store.get_by_uid(&self.content_type, slug).await?;
        tracing::debug!("resolved {} -> {}", slug, post.id);

        let prev_query = self.neighbor_query(Order::PublicationAsc, &post.id);
        let next_query = self.neighbor_query(Order::PublicationDesc, &post.id);
        let (prev, next) = tokio::try_join!(
            self.store.query(&prev_query),
            self.store.query(&next_query)
        )?;

        Ok(ResolvedPost {
            prev_post: prev.results.first().map(NeighborRef::from_post),
            next_post: next.results.first().map(NeighborRef::from_post),
            post,
        })
    }

    fn neighbor_query(&self, order: Order, after_id: &str) -> Query {
        Query::new(&self.content_type)
            .order(order)
            .page_size(1)
            .after(after_id)
            .tie_break(self.tie_break)
    }
}
