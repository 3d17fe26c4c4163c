use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::config::ServerConfig;
use crate::error::{PricerError, Result};

/// Start the web server and serve until Ctrl+C / SIGTERM
pub async fn start_api_server(state: AppState, server: &ServerConfig) -> Result<()> {
    let listener = bind_listener(server).await?;
    let app = create_router(state);
    info!("web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("web server stopped");
    Ok(())
}

/// Bind the configured interface; host names are resolved, not parsed.
pub async fn bind_listener(server: &ServerConfig) -> Result<TcpListener> {
    TcpListener::bind((server.host.as_str(), server.port))
        .await
        .map_err(|e| {
            PricerError::Internal(format!(
                "cannot listen on {}:{}: {e}",
                server.host, server.port
            ))
        })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
