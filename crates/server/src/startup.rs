use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use axum::Router;
use configs::AppConfig;
use hyper::server::conn::http1;
use hyper_util::{
    rt::{TokioIo, TokioTimer},
    service::TowerToHyperService,
};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Bind the configured address. Failure here is fatal for the process.
pub async fn bind(cfg: &AppConfig) -> Result<TcpListener, StartupError> {
    let addr = cfg.server.bind_addr();
    TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })
}

pub const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Sleep after a failed accept. Returns `false` when shutdown fired first.
async fn accept_backoff<F>(shutdown: Pin<&mut F>) -> bool
where
    F: Future<Output = ()>,
{
    tokio::select! {
        _ = tokio::time::sleep(ACCEPT_ERROR_BACKOFF) => true,
        _ = shutdown => false,
    }
}

/// Accept connections until `shutdown` resolves.
///
/// Each connection is served over HTTP/1.1 with keep-alive; a connection that
/// does not start its next request within `idle_timeout` is closed.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    idle_timeout: Duration,
    shutdown: F,
)
where
    F: Future<Output = ()> + Send,
{
    tokio::pin!(shutdown);
    loop {
        let accepted = tokio::select! {
            accepted = listener.accept() => accepted,
            _ = &mut shutdown => break,
        };
        let (stream, peer) = match accepted {
            Ok(conn) => conn,
            Err(e) => {
                // e.g. EMFILE: retrying at once would spin
                warn!(error = %e, "failed to accept connection");
                if accept_backoff(shutdown.as_mut()).await {
                    continue;
                }
                break;
            }
        };

        let service = TowerToHyperService::new(app.clone());
        tokio::spawn(async move {
            let mut builder = http1::Builder::new();
            builder
                .timer(TokioTimer::new())
                .keep_alive(true)
                .header_read_timeout(idle_timeout);
            if let Err(e) = builder.serve_connection(TokioIo::new(stream), service).await {
                debug!(%peer, error = %e, "connection closed with error");
            }
        });
    }
    info!("stopped accepting connections");
}

/// Public entry: build the store and router, then serve until `shutdown`.
pub async fn run<F>(mut cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send,
{
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let state = AppState::in_memory();
    let app = routes::build_router(state, &cfg.server);

    let listener = bind(&cfg).await?;
    let addr = listener.local_addr()?;
    info!(
        service = "server",
        event = "listening",
        %addr,
        read_timeout = ?cfg.server.read_timeout(),
        write_timeout = ?cfg.server.write_timeout(),
        idle_timeout = ?cfg.server.idle_timeout(),
        "listening"
    );

    serve(listener, app, cfg.server.idle_timeout(), shutdown).await;
    Ok(())
}
