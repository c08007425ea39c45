//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,
    pub posts_dir: String,

    // Minimum seconds between background regenerations of a page
    pub revalidate: u64,

    // Content API
    #[serde(default)]
    pub api: ApiConfig,

    // Comments
    #[serde(default)]
    pub comments: CommentsConfig,

    // Meta
    pub meta_generator: bool,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Travelog".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "pt-BR".to_string(),
            timezone: "America/Sao_Paulo".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),
            posts_dir: "posts".to_string(),

            revalidate: 1800,

            api: ApiConfig::default(),
            comments: CommentsConfig::default(),

            meta_generator: true,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Content API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the content repository, e.g. https://myrepo.cdn.prismic.io/api/v2
    pub endpoint: String,
    /// Document type queried for posts
    pub content_type: String,
    /// Access token for private repositories
    pub access_token: Option<String>,
    /// Page size for listing queries
    pub page_size: usize,
    /// Secondary ordering applied when publication timestamps collide
    pub tie_break: TieBreak,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            content_type: "posts".to_string(),
            access_token: None,
            page_size: 20,
            tie_break: TieBreak::None,
        }
    }
}

/// Tie-break key for neighbor ordering under equal timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Whatever order the store returns
    None,
    /// Secondary ordering by document uid
    Uid,
    /// Secondary ordering by document id
    Id,
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::None
    }
}

/// Comment widget configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub enabled: bool,
    /// GitHub repository backing the comment threads, "owner/name"
    pub repo: String,
    pub theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            repo: String::new(),
            theme: "github-dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Travelog");
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.revalidate, 1800);
        assert_eq!(config.api.content_type, "posts");
        assert_eq!(config.api.tie_break, TieBreak::None);
        assert_eq!(config.comments.theme, "github-dark");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Travel Blog
author: Test User
revalidate: 60
api:
  endpoint: https://myrepo.cdn.prismic.io/api/v2
  content_type: posts
  page_size: 5
comments:
  repo: someone/blog-comments
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Travel Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.revalidate, 60);
        assert_eq!(config.api.endpoint, "https://myrepo.cdn.prismic.io/api/v2");
        assert_eq!(config.api.page_size, 5);
        assert_eq!(config.comments.repo, "someone/blog-comments");
        // untouched fields fall back to defaults
        assert_eq!(config.timezone, "America/Sao_Paulo");
        assert_eq!(config.comments.theme, "github-dark");
    }

    #[test]
    fn test_parse_tie_break() {
        let yaml = r#"
api:
  tie_break: uid
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.tie_break, TieBreak::Uid);
    }
}
