use pvz_service::auth::TokenIssuer;
use pvz_service::database::DatabaseManager;
use pvz_service::{logging, router, AppConfig, AppState};
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET, etc.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env().unwrap_or_else(|e| panic!("failed to load config: {}", e));
    logging::init(&config)?;
    tracing::info!(mode = ?config.mode, "Starting PVZ service");

    let database = DatabaseManager::connect(&config.database).await?;
    database.migrate().await?;

    let tokens = TokenIssuer::new(&config.security)?;
    let port = config.server.port;
    if config.security.enable_dummy_login {
        tracing::warn!("/dummyLogin is enabled");
    }

    let state = AppState::new(config, database.repositories(), tokens, Some(database.clone()));
    let app = router(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("PVZ service listening on http://{}", bind_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}
