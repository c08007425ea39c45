//! Content module - post model, content store seam, and resolution

pub mod readtime;

mod client;
mod post;
mod resolver;
mod store;

pub use client::ApiClient;
pub use post::{Banner, NeighborRef, Post, PostData, ResolvedPost, Section, TextFragment};
pub use resolver::PostResolver;
pub use store::{all_posts, ContentError, ContentStore, MemoryStore, Order, Query, QueryResponse};
