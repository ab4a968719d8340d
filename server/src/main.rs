use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_core::TodoStore;
use todo_server::{docs, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=info,todo_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let store = TodoStore::connect(&config.store);
    if let Err(err) = todo_server::prepare_storage(&store).await {
        error!(
            error = %err,
            path = %config.store.path.display(),
            "unable to connect to the database"
        );
        if config.fail_fast {
            return Err(err).context("database unavailable at startup");
        }
        warn!("serving anyway; todo requests will fail until the database is reachable");
    }

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("server is running on {addr}");
    info!(
        "docs available at http://localhost:{}{}",
        config.port,
        docs::DOCS_PATH
    );

    todo_server::run(listener, store.clone(), shutdown_signal()).await?;

    store.close().await;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("unable to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
