use crate::{labels::LabelEntry, server::SharedState};
use axum::{extract::State, Json};

pub async fn list_labels(State(state): State<SharedState>) -> Json<Vec<LabelEntry>> {
    Json(state.pipeline.labels())
}
