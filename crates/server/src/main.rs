//! Carelink server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use carelink_api::{middleware::AppState, router as api_router};
use carelink_common::Config;
use carelink_core::{AccountService, CategoryService, ReportService, RequestService};
use carelink_db::repositories::{
    CategoryRepository, MatchRecordRepository, ReportRepository, RequestRepository,
    ShortlistRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carelink=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting carelink server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = carelink_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    carelink_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let request_repo = RequestRepository::new(Arc::clone(&db));
    let shortlist_repo = ShortlistRepository::new(Arc::clone(&db));
    let match_repo = MatchRecordRepository::new(Arc::clone(&db));
    let report_repo = ReportRepository::new(Arc::clone(&db));

    // Initialize services
    let account_service = AccountService::new(user_repo.clone());
    let category_service = CategoryService::new(category_repo.clone());
    let request_service = RequestService::new(
        request_repo.clone(),
        shortlist_repo,
        match_repo.clone(),
        category_repo.clone(),
    );
    let report_service = ReportService::new(
        user_repo,
        request_repo,
        match_repo,
        category_repo,
        report_repo,
    );

    // Create app state
    let state = AppState {
        account_service,
        category_service,
        request_service,
        report_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
