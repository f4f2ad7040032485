use crate::{
    pipeline::PipelineError,
    server::SharedState,
    upload::{read_upload, UploadError},
};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

pub const PREDICT_ROUTE: &str = "/predict";

#[derive(Error, Debug)]
pub enum PredictError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::Upload(
                UploadError::MissingFile
                | UploadError::EmptyFilename
                | UploadError::UnsupportedFilename(_),
            ) => StatusCode::BAD_REQUEST,
            PredictError::Upload(UploadError::Multipart(e)) => e.status(),
            PredictError::Upload(UploadError::Persist(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            PredictError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Serialize)]
pub struct PredictionBody {
    prediction: String,
}

/// Anything that is not a readable multipart form has no file in it.
pub fn require_multipart(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Multipart, PredictError> {
    multipart.map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        PredictError::Upload(UploadError::MissingFile)
    })
}

#[instrument(skip(state, multipart))]
pub async fn predict_image(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictionBody>, PredictError> {
    let upload = read_upload(require_multipart(multipart)?).await?;

    let prediction = state
        .classify(upload.data.to_vec(), PREDICT_ROUTE)
        .await
        .inspect_err(|e| tracing::error!("Prediction failed for {}: {}", upload.filename, e))?;

    Ok(Json(PredictionBody {
        prediction: prediction.label,
    }))
}
