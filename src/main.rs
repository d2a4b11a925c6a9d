use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use worklog::{build_router, AppState, PgWorkItemRepository};
use worklog_core::config::WorklogConfig;
use worklog_core::db::DatabasePool;
use worklog_core::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(err) = logging::init_tracing(None) {
        eprintln!("failed to initialise tracing: {err}");
    }

    let config = WorklogConfig::from_env().context("failed to load worklog configuration")?;
    let pool = DatabasePool::connect(&config)
        .await
        .context("failed to connect to postgres")?;

    let state = AppState::new(Arc::new(PgWorkItemRepository::new(pool.clone())));
    let app = build_router(state, &config.views_dir);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind TCP listener")?;
    let actual_addr = listener
        .local_addr()
        .context("failed to read socket address")?;
    info!(%actual_addr, views = %config.views_dir.display(), "starting worklog");

    if let Err(err) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(?err, "worklog server terminated with error");
    }

    pool.close().await;
    info!("worklog stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sigterm) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
