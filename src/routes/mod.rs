mod analyze;
mod health;
mod labels;
mod metrics;
mod predict;

use crate::server::SharedState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(analyze::index))
        .route(analyze::ANALYZE_ROUTE, post(analyze::analyze))
        .route(predict::PREDICT_ROUTE, post(predict::predict_image))
        .route("/labels", get(labels::list_labels))
        .route("/health", get(health::healthcheck))
        .route("/metrics", get(metrics::metrics_handler))
}
