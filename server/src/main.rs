mod app;
mod config;
mod routes;
mod state;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::state::{AppState, LoadedRoster};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let roster_path = config::roster_path();
    let loaded = match LoadedRoster::load(&roster_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "failed to load roster");
            return;
        }
    };
    tracing::info!(
        path = %roster_path.display(),
        entries = loaded.roster.len(),
        names = loaded.roster.unique_names().len(),
        version = loaded.roster.version().unwrap_or("-"),
        "Roster loaded"
    );
    if loaded.audit.is_clean() {
        tracing::info!("roster audit clean");
    } else {
        for warning in loaded.audit.warnings() {
            tracing::warn!("{warning}");
        }
    }
    if loaded.audit.missing_images > 0 {
        tracing::info!(
            missing_images = loaded.audit.missing_images,
            "entries without an image render a placeholder"
        );
    }

    let images_dir = config::images_dir();
    if !images_dir.is_dir() {
        tracing::warn!(path = %images_dir.display(), "image directory not found; cards will show placeholders");
    }
    let dist_dir = config::dist_dir();
    if !dist_dir.is_dir() {
        tracing::warn!(path = %dist_dir.display(), "client bundle directory not found");
    }

    let state = AppState::new(loaded, images_dir, dist_dir);
    let app = app::build_app(state);

    let addr = format!("0.0.0.0:{}", config::server_port());
    tracing::info!("Memoria tier list listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind TCP listener");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
    }

    tracing::info!("Server shut down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
