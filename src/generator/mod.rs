//! Generator module - builds the static site from the content store

use anyhow::Result;
use std::fs;
use std::sync::Arc;
use walkdir::WalkDir;

use crate::content::{all_posts, ContentStore, Post, PostResolver};
use crate::render::PageRenderer;
use crate::Travelog;

/// Static site generator over the remote content store
pub struct Generator {
    travelog: Travelog,
    store: Arc<dyn ContentStore>,
    resolver: PostResolver,
    renderer: PageRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(travelog: &Travelog, store: Arc<dyn ContentStore>) -> Result<Self> {
        let resolver = PostResolver::new(store.clone(), &travelog.config.api);
        let renderer = PageRenderer::new(travelog.config.clone())?;

        Ok(Self {
            travelog: travelog.clone(),
            store,
            resolver,
            renderer,
        })
    }

    /// Generate the entire site; returns the number of post pages built
    pub async fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.travelog.public_dir)?;

        let posts = all_posts(self.store.as_ref(), &self.travelog.config.api).await?;
        tracing::info!("Fetched {} posts from the content store", posts.len());

        self.write_index(&posts)?;
        self.write_stylesheet()?;
        self.copy_static_assets()?;

        for post in &posts {
            self.generate_post_page(&post.uid).await?;
        }

        Ok(posts.len())
    }

    /// Resolve, render and write a single post page; returns the HTML
    /// so on-demand callers can serve it without re-reading the file
    pub async fn generate_post_page(&self, slug: &str) -> Result<String> {
        let resolved = self.resolver.resolve(slug).await?;
        let html = self.renderer.post_page(&resolved)?;

        let rel_path = format!("{}/{}", self.travelog.config.posts_dir, slug);
        self.write_page(&rel_path, &html)?;
        tracing::debug!("Generated post: {}", slug);

        Ok(html)
    }

    /// The loading placeholder page
    pub fn fallback_page(&self) -> Result<String> {
        self.renderer.fallback_page()
    }

    fn write_index(&self, posts: &[Post]) -> Result<()> {
        let html = self.renderer.index_page(posts)?;
        let output_path = self.travelog.public_dir.join("index.html");
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated index page");
        Ok(())
    }

    fn write_stylesheet(&self) -> Result<()> {
        let output_path = self.travelog.public_dir.join("style.css");
        fs::write(&output_path, self.renderer.stylesheet())
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        Ok(())
    }

    fn write_page(&self, rel_path: &str, html: &str) -> Result<()> {
        let clean_path = rel_path.trim_start_matches('/');
        let output_path = self.travelog.public_dir.join(clean_path).join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        Ok(())
    }

    /// Copy everything under the static directory into the public tree
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.travelog.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() {
                let relative = path.strip_prefix(static_dir)?;
                let dest = self.travelog.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}
