//! Page rendering
//!
//! Builds template contexts out of resolved posts and renders the
//! final HTML. CMS-sourced text is escaped here, once, on the way into
//! the context.

use anyhow::Result;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::{readtime, NeighborRef, Post, ResolvedPost};
use crate::helpers;
use crate::templates::{
    CommentsData, IndexEntryData, NavPost, PostPageData, SectionData, SiteData, TemplateRenderer,
};

/// Seconds the loading placeholder waits before asking the browser to
/// try again
const FALLBACK_REFRESH_SECS: u32 = 3;

/// Renders pages from resolved content
pub struct PageRenderer {
    config: SiteConfig,
    templates: TemplateRenderer,
    timezone: chrono_tz::Tz,
}

impl PageRenderer {
    pub fn new(config: SiteConfig) -> Result<Self> {
        let templates = TemplateRenderer::new()?;
        let timezone = helpers::display_timezone(&config.timezone);
        Ok(Self {
            config,
            templates,
            timezone,
        })
    }

    /// Render the page for a resolved post
    pub fn post_page(&self, resolved: &ResolvedPost) -> Result<String> {
        let post = &resolved.post;
        let data = &post.data;

        let rel_path = format!("{}/{}", self.config.posts_dir, post.uid);
        let permalink = helpers::full_url_for(&self.config, &rel_path);

        let published = post
            .first_publication_date
            .map(|d| helpers::in_timezone(&d, self.timezone));
        let edited = post
            .edited()
            .map(|d| helpers::format_datetime(&helpers::in_timezone(&d, self.timezone)));

        let sections = data
            .content
            .iter()
            .map(|section| SectionData {
                anchor: slug::slugify(&section.heading),
                heading: helpers::html_escape(&section.heading),
                paragraphs: section
                    .body
                    .iter()
                    .map(|fragment| helpers::html_escape(&fragment.text))
                    .collect(),
            })
            .collect();

        let banner = if data.banner.url.is_empty() {
            None
        } else {
            Some(data.banner.url.as_str())
        };

        let page = PostPageData {
            title: helpers::html_escape(&data.title),
            subtitle: helpers::html_escape(&data.subtitle),
            author: helpers::html_escape(&data.author),
            banner_url: helpers::html_escape(&data.banner.url),
            date: published.as_ref().map(helpers::format_date).unwrap_or_default(),
            date_xml: published.as_ref().map(helpers::date_xml).unwrap_or_default(),
            reading_time: readtime::estimate(&data.content),
            edited,
            path: helpers::url_for(&self.config, &rel_path),
            open_graph: helpers::open_graph(
                &data.title,
                &data.subtitle,
                &permalink,
                banner,
                &self.config.title,
            ),
            sections,
            prev: resolved.prev_post.as_ref().map(|n| self.nav_post(n)),
            next: resolved.next_post.as_ref().map(|n| self.nav_post(n)),
            comments: self.comments(),
        };

        let mut context = Context::new();
        context.insert("site", &self.site_data());
        context.insert("post", &page);
        self.templates.render("post.html", &context)
    }

    /// Render the loading placeholder served while a page is generated
    pub fn fallback_page(&self) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &self.site_data());
        context.insert("refresh", &FALLBACK_REFRESH_SECS);
        self.templates.render("fallback.html", &context)
    }

    /// Render the index page listing all posts
    pub fn index_page(&self, posts: &[Post]) -> Result<String> {
        let entries: Vec<IndexEntryData> = posts.iter().map(|p| self.index_entry(p)).collect();

        let mut context = Context::new();
        context.insert("site", &self.site_data());
        context.insert("posts", &entries);
        self.templates.render("index.html", &context)
    }

    /// The site stylesheet
    pub fn stylesheet(&self) -> &'static str {
        TemplateRenderer::stylesheet()
    }

    fn site_data(&self) -> SiteData {
        let mut root = self.config.root.trim_end_matches('/').to_string();
        root.push('/');

        SiteData {
            title: helpers::html_escape(&self.config.title),
            subtitle: helpers::html_escape(&self.config.subtitle),
            description: helpers::html_escape(&self.config.description),
            author: helpers::html_escape(&self.config.author),
            language: self.config.language.clone(),
            root,
            meta: if self.config.meta_generator {
                helpers::meta_generator()
            } else {
                String::new()
            },
        }
    }

    fn nav_post(&self, neighbor: &NeighborRef) -> NavPost {
        NavPost {
            title: helpers::html_escape(&neighbor.title),
            path: helpers::post_path(&self.config, &neighbor.slug),
        }
    }

    fn comments(&self) -> Option<CommentsData> {
        let comments = &self.config.comments;
        if comments.enabled && !comments.repo.is_empty() {
            Some(CommentsData {
                repo: helpers::html_escape(&comments.repo),
                theme: helpers::html_escape(&comments.theme),
            })
        } else {
            None
        }
    }

    fn index_entry(&self, post: &Post) -> IndexEntryData {
        let published = post
            .first_publication_date
            .map(|d| helpers::in_timezone(&d, self.timezone));

        IndexEntryData {
            title: helpers::html_escape(&post.data.title),
            subtitle: helpers::html_escape(&post.data.subtitle),
            author: helpers::html_escape(&post.data.author),
            date: published.as_ref().map(helpers::format_date).unwrap_or_default(),
            date_xml: published.as_ref().map(helpers::date_xml).unwrap_or_default(),
            path: helpers::post_path(&self.config, &post.uid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Banner, PostData, Section, TextFragment};
    use chrono::{DateTime, Utc};

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.title = "Travelog".to_string();
        config.comments.repo = "someone/travelog-comments".to_string();
        config
    }

    fn sample_post() -> Post {
        let parse = |s: &str| s.parse::<DateTime<Utc>>().unwrap();
        Post {
            id: "id-1".to_string(),
            uid: "como-planejar-roteiros".to_string(),
            first_publication_date: Some(parse("2021-03-15T19:25:28Z")),
            last_publication_date: Some(parse("2021-03-19T18:49:01Z")),
            data: PostData {
                title: "Como planejar roteiros".to_string(),
                subtitle: "Um guia de bolso".to_string(),
                author: "Ana".to_string(),
                banner: Banner {
                    url: "https://images.example.com/roteiros.png".to_string(),
                },
                content: vec![
                    Section {
                        heading: "Antes de sair".to_string(),
                        body: vec![
                            TextFragment {
                                text: "Pesquise o clima.".to_string(),
                            },
                            TextFragment {
                                text: "Separe os documentos.".to_string(),
                            },
                        ],
                    },
                    Section {
                        heading: "Na estrada".to_string(),
                        body: vec![TextFragment {
                            text: "Pare com frequência.".to_string(),
                        }],
                    },
                ],
            },
        }
    }

    fn resolved(prev: Option<NeighborRef>, next: Option<NeighborRef>) -> ResolvedPost {
        ResolvedPost {
            post: sample_post(),
            prev_post: prev,
            next_post: next,
        }
    }

    #[test]
    fn test_post_page_renders_metadata() {
        let renderer = PageRenderer::new(test_config()).unwrap();
        let html = renderer.post_page(&resolved(None, None)).unwrap();

        assert!(html.contains("<h1>Como planejar roteiros</h1>"));
        // 19:25 UTC is 16:25 in São Paulo
        assert!(html.contains("15 mar 2021"));
        assert!(html.contains(r#"<span class="author">Ana</span>"#));
        // two sections, each rounding the running total up to a minute
        assert!(html.contains(r#"<span class="reading-time">2 min</span>"#));
        assert!(html.contains(r#"src="https://images.example.com/roteiros.png""#));
        assert!(html.contains(r#"<h2 id="antes-de-sair">Antes de sair</h2>"#));
        assert!(html.contains("<p>Pesquise o clima.</p>"));
        assert!(html.contains("<p>Separe os documentos.</p>"));
    }

    #[test]
    fn test_post_page_edit_notice() {
        let renderer = PageRenderer::new(test_config()).unwrap();

        let html = renderer.post_page(&resolved(None, None)).unwrap();
        // 18:49 UTC is 15:49 in São Paulo
        assert!(html.contains("<em>* editado em 19 mar 2021, às 15:49</em>"));

        let mut unedited = resolved(None, None);
        unedited.post.last_publication_date = unedited.post.first_publication_date;
        let html = renderer.post_page(&unedited).unwrap();
        assert!(!html.contains("* editado em"));
    }

    #[test]
    fn test_post_page_nav_slots() {
        let renderer = PageRenderer::new(test_config()).unwrap();

        let both = resolved(
            Some(NeighborRef {
                title: "Post mais novo".to_string(),
                slug: "mais-novo".to_string(),
            }),
            Some(NeighborRef {
                title: "Post mais antigo".to_string(),
                slug: "mais-antigo".to_string(),
            }),
        );
        let html = renderer.post_page(&both).unwrap();
        assert!(html.contains("Post mais novo"));
        assert!(html.contains(r#"<a href="/posts/mais-novo">Post anterior</a>"#));
        assert!(html.contains("Post mais antigo"));
        assert!(html.contains(r#"<a href="/posts/mais-antigo">Próximo post</a>"#));

        // both slots render even when empty
        let html = renderer.post_page(&resolved(None, None)).unwrap();
        assert!(!html.contains("Post anterior"));
        assert!(!html.contains("Próximo post"));
        assert_eq!(html.matches("post-nav-slot").count(), 2);
    }

    #[test]
    fn test_post_page_comment_widget() {
        let renderer = PageRenderer::new(test_config()).unwrap();
        let html = renderer.post_page(&resolved(None, None)).unwrap();

        assert!(html.contains(r#"src="https://utteranc.es/client.js""#));
        assert!(html.contains(r#"repo="someone/travelog-comments""#));
        assert!(html.contains(r#"issue-term="pathname""#));
        assert!(html.contains(r#"theme="github-dark""#));

        let mut config = test_config();
        config.comments.repo = String::new();
        let without = PageRenderer::new(config).unwrap();
        let html = without.post_page(&resolved(None, None)).unwrap();
        assert!(!html.contains("utteranc.es"));
    }

    #[test]
    fn test_post_page_escapes_cms_text() {
        let renderer = PageRenderer::new(test_config()).unwrap();
        let mut evil = resolved(None, None);
        evil.post.data.title = "<script>alert('x')</script>".to_string();
        evil.post.data.content[0].body[0].text = "a < b & b > c".to_string();

        let html = renderer.post_page(&evil).unwrap();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<p>a &lt; b &amp; b &gt; c</p>"));
    }

    #[test]
    fn test_fallback_page() {
        let renderer = PageRenderer::new(test_config()).unwrap();
        let html = renderer.fallback_page().unwrap();
        assert!(html.contains("Carregando..."));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="3">"#));
    }

    #[test]
    fn test_index_page_lists_posts() {
        let renderer = PageRenderer::new(test_config()).unwrap();
        let html = renderer.index_page(&[sample_post()]).unwrap();

        assert!(html.contains(r#"<a href="/posts/como-planejar-roteiros">Como planejar roteiros</a>"#));
        assert!(html.contains("Um guia de bolso"));
        assert!(html.contains("15 mar 2021"));
    }
}
