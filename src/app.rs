use crate::{
    config::Config,
    nutrition::NutritionClient,
    ort_service::OrtModelService,
    pipeline::ClassificationPipeline,
    server::HttpServer,
};
use std::sync::Arc;
use tokio::{signal, sync::broadcast};

pub async fn start_app(config: Config) -> anyhow::Result<()> {
    let model_service = match OrtModelService::new(&config.model) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            tracing::error!("Failed to load classifier model: {}", e);
            return Err(e.into());
        }
    };

    let nutrition_client = match NutritionClient::new(&config.nutrition) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to initialize nutrition client: {}", e);
            return Err(e.into());
        }
    };

    let pipeline = Arc::new(ClassificationPipeline::new(model_service, nutrition_client));
    let server = HttpServer::new(pipeline, &config).await?;

    let (shutdown_tx, _) = broadcast::channel(1);
    let server_handle = server.run(shutdown_tx.subscribe()).await?;

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown.");

    let _ = shutdown_tx.send(());
    server_handle.await??;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
