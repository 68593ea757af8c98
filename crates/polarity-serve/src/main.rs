use clap::Parser;
use polarity_serve::{AppState, ServeArgs, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = ServeArgs::parse();
    let state = AppState::from_args(&args);
    tracing::info!(
        data_dir = %args.data_dir.display(),
        workers = state.pool.width(),
        timeout_ms = args.timeout_ms,
        body_limit_mb = args.body_limit_mb,
        "starting polarity-serve"
    );

    let addr = args.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
