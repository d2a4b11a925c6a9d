use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_work_item, edit_work_item, health_check, list_work_items, redirect_home,
    update_work_item,
};
use crate::repository::WorkItemStore;

/// Shared handler state: the process-scoped store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WorkItemStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn WorkItemStore>) -> Self {
        Self { store }
    }
}

/// Builds the worklog router. Static assets are served from `views_dir` under `/views`.
pub fn build_router<P: AsRef<Path>>(state: AppState, views_dir: P) -> Router {
    Router::new()
        .route("/", get(list_work_items))
        .route("/create", post(create_work_item).fallback(redirect_home))
        .route("/edit", get(edit_work_item))
        .route("/update", post(update_work_item).fallback(redirect_home))
        .route("/health", get(health_check))
        .nest_service("/views", ServeDir::new(views_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
