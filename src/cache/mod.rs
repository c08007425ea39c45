//! Page cache for stale-while-revalidate serving
//!
//! Tracks the generation state of every slug the server has touched.
//! A page older than the revalidation interval is still served, but
//! one request takes on rebuilding it in the background; a slug whose
//! generation failed is retried on the same clock.

use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use tokio::sync::{Mutex, RwLock};

/// Generation state of one slug
#[derive(Debug, Clone)]
pub enum PageState {
    /// First generation is running; nothing to serve yet
    Building,
    /// A generated page, possibly stale
    Ready {
        html: String,
        built_at: DateTime<Utc>,
    },
    /// Generation failed; `not_found` distinguishes a missing document
    /// from an upstream failure
    Failed {
        failed_at: DateTime<Utc>,
        not_found: bool,
    },
}

/// What the serving layer should do for a slug
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Serve the cached page as is
    Serve(String),
    /// Serve the cached page and regenerate it in the background;
    /// handed to exactly one request per revalidation round
    ServeStale(String),
    /// Serve the loading placeholder; generation is already underway
    Placeholder,
    /// Serve the loading placeholder and generate; handed to exactly
    /// one request
    Generate,
    /// The document does not exist upstream
    NotFound,
    /// Generation failed for some other reason
    Error,
}

/// In-memory page state keyed by slug
pub struct PageCache {
    revalidate: Duration,
    entries: RwLock<HashMap<String, PageState>>,
    in_flight: Mutex<HashSet<String>>,
}

impl PageCache {
    pub fn new(revalidate_secs: u64) -> Self {
        Self {
            revalidate: Duration::seconds(revalidate_secs as i64),
            entries: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Decide how to answer a request for `slug`
    pub async fn decide(&self, slug: &str) -> Decision {
        self.decide_at(slug, Utc::now()).await
    }

    async fn decide_at(&self, slug: &str, now: DateTime<Utc>) -> Decision {
        let state = self.entries.read().await.get(slug).cloned();

        match state {
            Some(PageState::Ready { html, built_at }) => {
                if now - built_at < self.revalidate {
                    Decision::Serve(html)
                } else if self.try_begin(slug).await {
                    Decision::ServeStale(html)
                } else {
                    // someone else is already rebuilding
                    Decision::Serve(html)
                }
            }
            Some(PageState::Building) => Decision::Placeholder,
            Some(PageState::Failed {
                failed_at,
                not_found,
            }) => {
                if now - failed_at < self.revalidate {
                    if not_found {
                        Decision::NotFound
                    } else {
                        Decision::Error
                    }
                } else if self.try_begin(slug).await {
                    Decision::Generate
                } else {
                    Decision::Placeholder
                }
            }
            None => {
                if self.try_begin(slug).await {
                    self.entries
                        .write()
                        .await
                        .insert(slug.to_string(), PageState::Building);
                    Decision::Generate
                } else {
                    Decision::Placeholder
                }
            }
        }
    }

    /// Record a finished page
    pub async fn complete(&self, slug: &str, html: String) {
        self.complete_at(slug, html, Utc::now()).await;
    }

    async fn complete_at(&self, slug: &str, html: String, at: DateTime<Utc>) {
        self.entries
            .write()
            .await
            .insert(slug.to_string(), PageState::Ready { html, built_at: at });
        self.in_flight.lock().await.remove(slug);
    }

    /// Record a failed generation
    pub async fn fail(&self, slug: &str, not_found: bool) {
        self.fail_at(slug, not_found, Utc::now()).await;
    }

    async fn fail_at(&self, slug: &str, not_found: bool, at: DateTime<Utc>) {
        self.entries.write().await.insert(
            slug.to_string(),
            PageState::Failed {
                failed_at: at,
                not_found,
            },
        );
        self.in_flight.lock().await.remove(slug);
    }

    /// Claim the rebuild of `slug`; false when another request holds it
    async fn try_begin(&self, slug: &str) -> bool {
        self.in_flight.lock().await.insert(slug.to_string())
    }
}
