//! `cats-server`: serves the CATS REST API and browser client.
//!
//! Usage:
//!   cats-server [--port 3001] [--db-name cats_db] [--db-dir .]
//!
//! Every flag can also be set through its environment variable.

use anyhow::Context;
use cats_server::{router, Database, ServerConfig};
use clap::Parser;
use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    cats_core::init_logging(config.log_level(), config.log_dir.as_deref())
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;

    let location = config.database_location();
    let db = Database::open(&location)
        .with_context(|| format!("failed to open database at {location}"))?;

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        "event=server_start module=server status=ok listen={} version={}",
        addr,
        cats_core::core_version()
    );

    axum::serve(listener, router(db))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("event=shutdown_signal module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("event=shutdown_signal module=server status=error signal=sigterm error={err}");
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
    info!("event=shutdown_signal module=server status=ok");
}
