//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/style.css") // -> "/blog/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/posts/slug") // -> "https://example.com/blog/posts/slug"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Path of a post page under the site root
///
/// # Examples
/// ```ignore
/// post_path(&config, "meu-post") // -> "/posts/meu-post"
/// ```
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("{}/{}", config.posts_dir, slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/style.css"), "/blog/style.css");
        assert_eq!(url_for(&config, "about/"), "/blog/about/");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/posts/meu-post"),
            "https://example.com/blog/posts/meu-post"
        );
    }

    #[test]
    fn test_post_path() {
        let config = test_config();
        assert_eq!(post_path(&config, "meu-post"), "/blog/posts/meu-post");

        let mut bare = SiteConfig::default();
        bare.root = "/".to_string();
        assert_eq!(post_path(&bare, "meu-post"), "/posts/meu-post");
    }
}
