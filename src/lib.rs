//! travelog: a blog generator and server backed by a headless CMS
//!
//! Posts live in a remote content repository; this crate fetches them,
//! renders static pages, and serves the site with stale-while-revalidate
//! regeneration and on-demand generation of not-yet-built slugs.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod render;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main application
#[derive(Clone)]
pub struct Travelog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Static assets directory
    pub static_dir: std::path::PathBuf,
}

impl Travelog {
    /// Create a new instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
            static_dir,
        })
    }

    /// Build the content store configured for this site
    pub fn store(&self) -> Result<std::sync::Arc<dyn content::ContentStore>> {
        let client = content::ApiClient::new(&self.config.api)?;
        Ok(std::sync::Arc::new(client))
    }
}
