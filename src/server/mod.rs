//! Preview server for stored posts

use anyhow::Result;
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::PostStatus;
use crate::store::{JsonPostStore, PostRecord, PostStore};
use crate::templates::{PostView, TemplateRenderer};
use crate::Workspace;

/// Server state
pub struct ServerState {
    data_dir: PathBuf,
    renderer: TemplateRenderer,
    include_drafts: bool,
}

impl ServerState {
    pub fn new(workspace: &Workspace, include_drafts: bool) -> Result<Self> {
        Ok(Self {
            data_dir: workspace.data_dir.clone(),
            renderer: TemplateRenderer::new(&workspace.config)?,
            include_drafts,
        })
    }

    /// The store is reopened per request so edits made by other commands show up
    fn visible_posts(&self) -> Result<Vec<PostRecord>> {
        let store = JsonPostStore::open(&self.data_dir)?;
        let status = (!self.include_drafts).then_some(PostStatus::Published);
        Ok(store.list(status)?)
    }

    fn visible_post(&self, slug: &str) -> Result<Option<PostRecord>> {
        let store = JsonPostStore::open(&self.data_dir)?;
        Ok(store
            .get(slug)?
            .filter(|p| self.include_drafts || p.status == PostStatus::Published))
    }
}

/// Build the preview router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/posts/:slug", get(article_handler))
        .route("/api/posts", get(api_posts_handler))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(deny_dotenv))
        .layer(TraceLayer::new_for_http())
}

/// Start the preview server
pub async fn start(workspace: &Workspace, ip: &str, port: u16, include_drafts: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(workspace, include_drafts)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Preview running at http://{}:{}", ip, port);
    if include_drafts {
        println!("Drafts are visible.");
    }
    if workspace.config.ai.resolve_api_key().is_none() {
        tracing::warn!("No API key found; `generate` will not work until VITE_API_KEY is set");
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Refuse any path that mentions an env file
async fn deny_dotenv(request: Request, next: Next) -> Response {
    if request.uri().path().contains(".env") {
        tracing::warn!("Blocked request for {}", request.uri().path());
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }
    next.run(request).await
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let posts = match state.visible_posts() {
        Ok(posts) => posts,
        Err(e) => return internal_error(e),
    };
    let views: Vec<PostView> = posts.iter().map(PostView::from).collect();
    match state.renderer.render_index(&views) {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn article_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let post = match state.visible_post(&slug) {
        Ok(Some(post)) => post,
        Ok(None) => return not_found().await,
        Err(e) => return internal_error(e),
    };
    match state
        .renderer
        .render_article(&PostView::from(&post), &post.content)
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn api_posts_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.visible_posts() {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn internal_error(e: impl Display) -> Response {
    tracing::error!("Request failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}
