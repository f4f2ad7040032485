use crate::{
    config::Config,
    nutrition::CalorieInfo,
    pipeline::{ClassificationPipeline, PipelineError, PredictionResult},
    routes::api_routes,
    telemetry::Metrics,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    Router,
};
use axum_otel_metrics::HttpMetricsLayerBuilder;
use std::{path::PathBuf, sync::Arc, time::Instant};
use tokio::{net::TcpListener, sync::broadcast::Receiver, task::JoinHandle};
use tower_http::{services::ServeDir, set_header::SetResponseHeader};

pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Clone)]
pub struct SharedState {
    pub pipeline: Arc<ClassificationPipeline>,
    pub metrics: Arc<Metrics>,
    pub uploads_dir: PathBuf,
}

impl SharedState {
    pub fn new(
        pipeline: Arc<ClassificationPipeline>,
        metrics: Arc<Metrics>,
        uploads_dir: PathBuf,
    ) -> Self {
        Self {
            pipeline,
            metrics,
            uploads_dir,
        }
    }

    /// Runs the pipeline and records latency and label metrics for `route`.
    pub async fn classify(
        &self,
        image_data: Vec<u8>,
        route: &str,
    ) -> Result<PredictionResult, PipelineError> {
        let start = Instant::now();
        let prediction = self.pipeline.classify(image_data).await?;

        self.metrics
            .record_prediction_duration(start.elapsed().as_millis() as u64, route);
        self.metrics
            .record_classification(&prediction.label, prediction.category.as_str());

        Ok(prediction)
    }

    pub async fn enrich(&self, label: &str) -> CalorieInfo {
        let calories = self.pipeline.enrich(label).await;
        self.metrics.record_calorie_lookup(calories.outcome());
        calories
    }
}

pub fn build_router(state: SharedState, max_upload_bytes: usize) -> Router {
    let metrics_layer = HttpMetricsLayerBuilder::new().build();
    // Stored uploads must never render as active content.
    let uploads = SetResponseHeader::overriding(
        SetResponseHeader::overriding(
            ServeDir::new(&state.uploads_dir),
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'"),
    );

    Router::new()
        .merge(api_routes())
        .nest_service(UPLOADS_ROUTE, uploads)
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(metrics_layer)
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new(pipeline: Arc<ClassificationPipeline>, config: &Config) -> anyhow::Result<Self> {
        let addr = config.server.get_address();

        tokio::fs::create_dir_all(&config.uploads.dir).await?;

        let metrics = Arc::new(Metrics::new()?);
        let app_state = SharedState::new(pipeline, metrics, config.uploads.dir.clone());
        let router = build_router(app_state, config.server.max_upload_bytes);

        let listener = TcpListener::bind(addr).await?;

        Ok(Self { router, listener })
    }

    pub async fn run(
        self,
        shutdown_rx: Receiver<()>,
    ) -> anyhow::Result<JoinHandle<anyhow::Result<()>>> {
        tracing::info!("Starting app on {}", self.listener.local_addr()?);

        let listener = self.listener;
        let router = self.router;
        let mut shutdown_rx = shutdown_rx.resubscribe();
        let server_handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    shutdown_rx.recv().await.ok();
                })
                .await?;
            Ok::<(), anyhow::Error>(())
        });

        Ok(server_handle)
    }
}
