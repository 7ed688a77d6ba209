//! HTTP API server
//!
//! Routes:
//! - `/api/health`
//! - `/api/expenses`: list and record expenses
//! - `/api/categories`: list, add and remove categories
//! - `/api/reports`: category/period report, month and year comparisons
//!
//! Any other path is served from the configured static directory, if one
//! exists.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::Storage;

pub use error::ApiError;

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(storage: Storage, settings: Settings) -> Self {
        Self {
            storage: Arc::new(storage),
            settings: Arc::new(settings),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use handlers::{
        create_category, create_expense, create_report, delete_category, health_check,
        list_categories, list_expenses, month_comparison, year_comparison,
    };

    let router = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/expenses", get(list_expenses).post(create_expense))
        .route("/api/categories", get(list_categories).post(create_category))
        .route("/api/categories/:name", delete(delete_category))
        .route("/api/reports", post(create_report))
        .route("/api/reports/month-comparison", get(month_comparison))
        .route("/api/reports/year-comparison", get(year_comparison));

    let router = match state.settings.static_dir.as_ref() {
        Some(dir) if dir.is_dir() => {
            log::info!("Serving static files from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        Some(dir) => {
            log::warn!("Static directory {} does not exist; not serving files", dir.display());
            router
        }
        None => router,
    };

    router.layer(CorsLayer::permissive()).with_state(state)
}

/// Start the HTTP server and serve until the process is stopped
pub async fn start_server(state: AppState, addr: &str) -> ExpenseResult<()> {
    let router = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ExpenseError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    log::info!("Listening on http://{}", addr);
    println!("Server running on http://{}", addr);
    println!("   API: http://{}/api/expenses", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, router)
        .await
        .map_err(|e| ExpenseError::Server(e.to_string()))
}
