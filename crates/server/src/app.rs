use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use snipstore_snippets::SnippetService;

use crate::middleware::request_context;
use crate::routes;

/// Estado compartilhado pelos handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: SnippetService,
    healthy: Arc<AtomicBool>,
}

impl AppState {
    /// Começa não-saudável; o binário liga a flag depois do bind.
    pub fn new(service: SnippetService) -> Self {
        Self {
            service,
            healthy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

/// Monta o router completo:
/// - `POST /snippets`
/// - `GET  /snippets/:name`
/// - `POST /snippets/:name/like`
/// - `GET  /health`
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/snippets", post(routes::create))
        .route("/snippets/:name", get(routes::get))
        .route("/snippets/:name/like", post(routes::like))
        .with_state(state)
        .layer(axum_middleware::from_fn(request_context))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
