/**
 * Wallcal Server Entry Point
 *
 * Loads configuration from the environment, assembles the service, and runs
 * it until interrupted. The liveness sweep is stopped after the listener
 * shuts down.
 */

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "wallcal=debug,info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = match wallcal::server::config::ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // The one fatal condition: the service never starts without an
            // admin secret.
            tracing::error!("FATAL: {e}");
            return Err(e.into());
        }
    };

    let port = config.port;
    let app = wallcal::server::init::create_app(config);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app.router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the recurring sweep so no timer outlives the listener.
    app.sweeper.shutdown();
    tracing::info!("shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
