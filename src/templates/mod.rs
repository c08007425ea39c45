//! Page templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; the context
//! structs below are what the renderer fills them with.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Context builders escape CMS-sourced text themselves; paths
        // and prebuilt tag fragments must pass through untouched
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("post.html", include_str!("theme/post.html")),
            ("fallback.html", include_str!("theme/fallback.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// The site stylesheet, written alongside the generated pages
    pub fn stylesheet() -> &'static str {
        include_str!("theme/style.css")
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub root: String,
    pub meta: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner_url: String,
    pub date: String,
    pub date_xml: String,
    pub reading_time: u32,
    pub edited: Option<String>,
    pub path: String,
    pub open_graph: String,
    pub sections: Vec<SectionData>,
    pub prev: Option<NavPost>,
    pub next: Option<NavPost>,
    pub comments: Option<CommentsData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    pub anchor: String,
    pub heading: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentsData {
    pub repo: String,
    pub theme: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexEntryData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
    pub date_xml: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_parse() {
        // add_raw_templates fails on any syntax error
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_fallback_renders_standalone() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteData {
                title: "Travelog".to_string(),
                subtitle: String::new(),
                description: String::new(),
                author: "Ana".to_string(),
                language: "pt-BR".to_string(),
                root: "/".to_string(),
                meta: String::new(),
            },
        );
        context.insert("refresh", &3);

        let html = renderer.render("fallback.html", &context).unwrap();
        assert!(html.contains("Carregando..."));
        assert!(html.contains(r#"http-equiv="refresh""#));
    }
}
