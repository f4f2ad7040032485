use super::predict::{require_multipart, PredictError};
use crate::{
    html::{render_page, Analysis, Outcome, PageView},
    server::{SharedState, UPLOADS_ROUTE},
    upload::{persist_upload, read_upload},
};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::Html,
};
use tracing::instrument;

pub const ANALYZE_ROUTE: &str = "/analyze";

pub async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(render_page(&PageView {
        labels: state.pipeline.labels(),
        ..PageView::default()
    }))
}

#[instrument(skip(state, multipart))]
pub async fn analyze(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Html<String>) {
    let mut view = PageView {
        labels: state.pipeline.labels(),
        ..PageView::default()
    };

    let status = match analyze_upload(&state, multipart, &mut view).await {
        Ok(analysis) => {
            view.outcome = Outcome::Analysis(analysis);
            StatusCode::OK
        }
        Err(e) => {
            tracing::warn!("Analysis failed: {}", e);
            let status = e.status();
            view.outcome = Outcome::Error(match e {
                PredictError::Pipeline(e) => format!("Error processing image: {}", e),
                other => other.to_string(),
            });
            status
        }
    };

    (status, Html(render_page(&view)))
}

async fn analyze_upload(
    state: &SharedState,
    multipart: Result<Multipart, MultipartRejection>,
    view: &mut PageView,
) -> Result<Analysis, PredictError> {
    let upload = read_upload(require_multipart(multipart)?).await?;

    let prediction = state.classify(upload.data.to_vec(), ANALYZE_ROUTE).await?;

    // Only bytes that decoded as an image are stored and served back.
    match persist_upload(&state.uploads_dir, &upload).await {
        Ok(path) => {
            view.image_url = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| format!("{}/{}", UPLOADS_ROUTE, urlencoding::encode(name)));
        }
        Err(e) => tracing::warn!("Could not store upload {}: {}", upload.filename, e),
    }

    let calories = state.enrich(&prediction.label).await;

    Ok(Analysis {
        prediction,
        calories,
    })
}
