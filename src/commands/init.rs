//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("static"))?;

    // Create default _config.yml
    let config_content = r#"# Travelog Configuration

# Site
title: Travelog
subtitle: ''
description: ''
author: John Doe
language: pt-BR
timezone: America/Sao_Paulo

# URL
url: http://example.com
root: /

# Directory
public_dir: public
static_dir: static
posts_dir: posts

# Content API
api:
  endpoint: ''
  content_type: posts
  # access_token: ''
  page_size: 20
  tie_break: none

# Pages older than this many seconds are rebuilt on demand
revalidate: 1800

# Comments (utterances)
comments:
  enabled: true
  repo: ''
  theme: github-dark

# Metadata elements
meta_generator: true
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_scaffolded_config_parses() {
        let temp = TempDir::new().unwrap();
        init_site(temp.path()).unwrap();

        assert!(temp.path().join("static").is_dir());

        let config = SiteConfig::load(temp.path().join("_config.yml")).unwrap();
        assert_eq!(config.title, "Travelog");
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.api.content_type, "posts");
        assert_eq!(config.revalidate, 1800);
        assert!(config.comments.repo.is_empty());
    }
}
