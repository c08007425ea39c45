//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate Open Graph meta tags
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
    site_name: &str,
) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="article">"#.to_string(),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, url),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if let Some(img) = image {
        tags.push(format!(r#"<meta property="og:image" content="{}">"#, img));
    }

    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="travelog {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"amp" & 'quote'</b>"#),
            "&lt;b&gt;&quot;amp&quot; &amp; &#39;quote&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_open_graph() {
        let tags = open_graph(
            "Um título",
            "Uma descrição",
            "https://example.com/posts/um-titulo",
            Some("https://images.example.com/banner.png"),
            "Travelog",
        );
        assert!(tags.contains(r#"og:title" content="Um título""#));
        assert!(tags.contains(r#"og:image" content="https://images.example.com/banner.png""#));
        assert!(tags.contains(r#"og:description" content="Uma descrição""#));
    }

    #[test]
    fn test_open_graph_skips_empty_description() {
        let tags = open_graph("T", "", "https://example.com/", None, "Travelog");
        assert!(!tags.contains("og:description"));
        assert!(!tags.contains("og:image"));
    }
}
