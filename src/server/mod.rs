//! Blog server with stale-while-revalidate post pages

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::cache::{Decision, PageCache};
use crate::content::{ContentError, ContentStore};
use crate::generator::Generator;
use crate::Travelog;

/// Server state
struct ServerState {
    generator: Generator,
    cache: PageCache,
    public_dir: PathBuf,
    posts_dir: String,
    fallback_html: String,
}

/// Start the blog server
pub async fn start(travelog: &Travelog, ip: &str, port: u16) -> Result<()> {
    let store = travelog.store()?;
    let state = build_state(travelog, store)?;
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_state(travelog: &Travelog, store: Arc<dyn ContentStore>) -> Result<Arc<ServerState>> {
    let generator = Generator::new(travelog, store)?;
    let fallback_html = generator.fallback_page()?;

    Ok(Arc::new(ServerState {
        generator,
        cache: PageCache::new(travelog.config.revalidate),
        public_dir: travelog.public_dir.clone(),
        posts_dir: travelog.config.posts_dir.trim_matches('/').to_string(),
        fallback_html,
    }))
}

fn router(state: Arc<ServerState>) -> Router {
    let posts_route = format!("/{}/:slug", state.posts_dir);
    let static_pages = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);

    Router::new()
        .route(&posts_route, get(post_handler))
        .fallback_service(static_pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve a post page, rebuilding it in the background when it is stale
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.cache.decide(&slug).await {
        Decision::Serve(html) => Html(html).into_response(),
        Decision::ServeStale(html) => {
            spawn_rebuild(state, slug);
            Html(html).into_response()
        }
        Decision::Generate => {
            // Read the response off disk before the rebuild starts,
            // or a fast store overwrites the page under the read
            let response = serve_prebuilt(&state, &slug).await;
            spawn_rebuild(state, slug);
            response
        }
        Decision::Placeholder => serve_prebuilt(&state, &slug).await,
        Decision::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
        Decision::Error => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Serve the page a previous run left on disk, or the loading
/// placeholder when this slug was never built
async fn serve_prebuilt(state: &ServerState, slug: &str) -> Response {
    let path = state
        .public_dir
        .join(&state.posts_dir)
        .join(slug)
        .join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => Html(state.fallback_html.clone()).into_response(),
    }
}

/// Rebuild a page in the background, recording the outcome
fn spawn_rebuild(state: Arc<ServerState>, slug: String) {
    tokio::spawn(async move {
        match state.generator.generate_post_page(&slug).await {
            Ok(html) => state.cache.complete(&slug, html).await,
            Err(e) => {
                let not_found = is_not_found(&e);
                if not_found {
                    tracing::debug!("No document for slug: {}", slug);
                } else {
                    tracing::error!("Failed to generate {}: {}", slug, e);
                }
                state.cache.fail(&slug, not_found).await;
            }
        }
    });
}

/// Whether an error chain bottoms out in a missing document
fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<ContentError>(),
            Some(ContentError::NotFound(_))
        )
    })
}
