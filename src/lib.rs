//! Cooldown-gated proxy in front of the iPhone quoted-chat image renderer.
//!
//! `/generate` forwards form fields to the renderer and relays the PNG inline,
//! at most once per cooldown window for the whole process. `/download` makes
//! the same upstream call without the cooldown and returns the image as a file.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod upstream;

use config::Args;
use handlers::{download_handler, generate_handler, health_handler, metrics_handler};
use state::AppState;

// Router with every route and layer, static files excluded
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/generate", get(generate_handler).post(generate_handler))
        .route("/download", get(download_handler).post(download_handler))
        // paths the hosted form calls
        .route("/api/generate", get(generate_handler).post(generate_handler))
        .route("/api/download", get(download_handler).post(download_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(args: Args) -> std::io::Result<()> {
    let state = Arc::new(AppState::from_args(&args));

    let mut router = app(state);
    if let Some(dir) = &args.static_dir {
        info!("Serving front-end from {dir}");
        router = router.fallback_service(ServeDir::new(dir));
    }

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Gateway running on http://localhost:{}", args.port);
    info!("Forwarding to image provider at {}", args.upstream_url);
    info!(
        "Cooldown: one generate request per {:?}",
        Duration::from_secs(args.cooldown_secs)
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
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
