//! HTTP layer: routes, shared state and the serve loop.

use crate::config::ServerConfig;
use crate::core::VisitorCounter;
use crate::error::Result;
use crate::models::{CountResponse, ErrorResponse};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

const INDEX_HTML: &str = include_str!("../assets/index.html");

type ApiResult<T> = std::result::Result<T, ApiError>;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    counter: Arc<Mutex<VisitorCounter>>,
}

impl AppState {
    pub fn new(counter: VisitorCounter) -> Self {
        Self {
            counter: Arc::new(Mutex::new(counter)),
        }
    }

    /// Run a store operation on the blocking pool
    pub async fn with_counter<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut VisitorCounter) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let counter = Arc::clone(&self.counter);
        tokio::task::spawn_blocking(move || {
            let mut counter = counter.blocking_lock();
            f(&mut counter)
        })
        .await?
    }
}

/// Handler failure rendered as a JSON error body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/visitors", get(get_visitors))
        .route("/reset", post(reset_visitors))
        .layer(cors);

    Router::new()
        .route("/", get(index))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn get_visitors(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state
        .with_counter(|counter| counter.increment())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to increment visitor count");
            ApiError::internal("Unable to read visitor count")
        })?;

    Ok(Json(CountResponse { count }))
}

async fn reset_visitors(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state
        .with_counter(|counter| counter.reset())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to reset visitor count");
            ApiError::internal("Unable to reset visitor count")
        })?;

    warn!("Visitor counter reset by request");
    Ok(Json(CountResponse { count }))
}

/// Open the store and serve until Ctrl-C
pub async fn run_server(config: &ServerConfig) -> Result<()> {
    let counter = VisitorCounter::open_at(&config.db_path)?;
    let app = router(AppState::new(counter));

    let listener = TcpListener::bind(config.addr()).await?;
    info!(
        addr = %listener.local_addr()?,
        db = %config.db_path.display(),
        "Visitor counter listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C, shutting down");
    }
}
