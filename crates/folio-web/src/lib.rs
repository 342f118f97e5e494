use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::sync::RwLock;

use folio_core::assistant::Assistant;
use folio_core::{DocStore, SiteConfig};

mod dto;
mod error;
mod handlers;
mod html;
mod security;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) store: Arc<RwLock<DocStore>>,
    pub(crate) site: Arc<SiteConfig>,
    pub(crate) assistant: Arc<Assistant>,
}

impl WebState {
    fn new(store: DocStore, site: SiteConfig) -> Self {
        let assistant = Assistant::new(site.assistant.clone());
        Self {
            store: Arc::new(RwLock::new(store)),
            site: Arc::new(site),
            assistant: Arc::new(assistant),
        }
    }
}

/// Load the corpus and serve the documentation site, blocking until
/// shutdown.
///
/// # Errors
/// Returns an error when the corpus cannot be loaded, the runtime cannot be
/// created, the socket cannot be bound, or the server exits with a runtime
/// failure.
pub fn serve_site(site: SiteConfig, host: &str, port: u16) -> Result<()> {
    let store = DocStore::open(&site)
        .with_context(|| format!("failed to load docs from {}", site.docs_dir.display()))?;
    println!(
        "loaded {} documents from {}",
        store.len(),
        site.docs_dir.display()
    );

    let state = WebState::new(store, site);
    let bind_addr = format!("{host}:{port}");
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build web runtime")?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind web server at {bind_addr}"))?;
        println!("folio listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app_router(state))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await
            .context("web server failed")
    })
}

pub(crate) fn app_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/assets/index.css", get(handlers::index_css))
        .route("/assets/index.js", get(handlers::index_js))
        .route("/api/site", get(handlers::site))
        .route("/api/docs", get(handlers::list_docs))
        .route("/api/docs/{slug}", get(handlers::get_doc))
        .route("/api/categories", get(handlers::categories))
        .route("/api/tags", get(handlers::list_tags))
        .route("/api/tags/{tag}", get(handlers::resolve_tag))
        .route("/api/search", get(handlers::search))
        .route("/api/assistant/ask", post(handlers::ask_assistant))
        .route("/api/reload", post(handlers::reload))
        .layer(middleware::from_fn(security::security_headers_middleware))
        .with_state(state)
}
