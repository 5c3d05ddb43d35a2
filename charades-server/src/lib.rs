//! charades-server library
//!
//! HTTP boundary for the charades prompt service. Query parameters and JSON
//! bodies are validated here and mapped onto the selection engine; the
//! stateless item endpoints and the single server-held game session share one
//! read-only catalog.

use axum::Router;
use charades_common::{Catalog, GameSession, SelectionEngine};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Stateless selector over the shared catalog
    pub engine: SelectionEngine,
    /// The one player session driven by the embedded UI
    pub session: Arc<Mutex<GameSession>>,
}

impl AppState {
    /// Create new application state with an entropy-seeded session
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let engine = SelectionEngine::new(catalog);
        let session = GameSession::new(engine.clone());
        Self::with_session(engine, session)
    }

    /// Create application state around an existing session
    pub fn with_session(engine: SelectionEngine, session: GameSession) -> Self {
        Self {
            engine,
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.engine.catalog()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    let items = Router::new()
        .route("/items", get(api::list_items))
        .route("/items/random", get(api::random_item))
        .route("/items/:category/:id", get(api::get_item));

    let session = Router::new()
        .route("/session", get(api::get_session))
        .route("/session/start", post(api::start_session))
        .route("/session/next", post(api::next_item))
        .route("/session/end", post(api::end_session))
        .route("/session/filters", put(api::update_filters))
        .route("/session/history", get(api::get_history))
        .route("/session/history/toggle", post(api::toggle_history));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    Router::new()
        .merge(items)
        .merge(session)
        .merge(public)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
