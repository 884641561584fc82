use paperdate::server::{
    self, InMemoryHighScoreRepository, InMemoryPaperRepository, PaperRepository,
};
use paperdate::{AppState, ServerConfig};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paperdate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting paper dating scoring service");

    let config = ServerConfig::from_env();

    let paper_repository = match &config.papers_path {
        Some(path) => match InMemoryPaperRepository::from_json_file(path).await {
            Ok(repository) => repository,
            Err(e) => {
                error!(error = %e, "Failed to load paper catalogue");
                std::process::exit(1);
            }
        },
        None => InMemoryPaperRepository::with_sample_papers(),
    };

    match paper_repository.count().await {
        Ok(0) => warn!("Paper catalogue is empty, serving placeholder paper"),
        Ok(papers) => info!(papers, "Paper catalogue loaded"),
        Err(e) => warn!(error = %e, "Could not count paper catalogue"),
    }

    let app_state = AppState::new(
        Arc::new(paper_repository),
        Arc::new(InMemoryHighScoreRepository::new()),
    );

    let app = server::router(app_state);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!(addr = %config.bind_addr, "Scoring service listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
    }
}
