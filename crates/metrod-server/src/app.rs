//! Process composition and lifecycle.
//!
//! Builds the store, sink, server, and flusher, runs the serving task and
//! the flusher task concurrently, and drives bounded-time graceful
//! shutdown on the first component error or termination signal.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

use metrod_core::{MetricStore, MetrodError, Result};

use crate::app_state::AppState;
use crate::config::Config;
use crate::flusher::Flusher;
use crate::router;
use crate::sink::{MetricSink, PostgresSink};

pub struct App {
    cfg: Config,
    store: Arc<MetricStore>,
    sink: Arc<PostgresSink>,
}

impl App {
    /// Build all components. Failing to reach the database is fatal here:
    /// the server must not start accepting metrics without its pool.
    pub async fn new(cfg: Config) -> Result<Self> {
        let store = Arc::new(MetricStore::new());
        let sink = Arc::new(PostgresSink::connect(&cfg.database).await?);
        Ok(Self { cfg, store, sink })
    }

    /// Serve until the first component error or a termination signal, then
    /// shut down within the configured deadline: drain the HTTP server,
    /// run the flusher's final flush, close the sink.
    pub async fn run(self) -> Result<()> {
        let shutdown = CancellationToken::new();
        spawn_signal_watcher(shutdown.clone());

        let listen: SocketAddr = self
            .cfg
            .server
            .listen
            .parse()
            .map_err(|e| MetrodError::Config(format!("server.listen invalid: {e}")))?;

        let listener = TcpListener::bind(listen)
            .await
            .map_err(|e| MetrodError::Internal(format!("bind {listen} failed: {e}")))?;

        let app = router::build_router(AppState::new(Arc::clone(&self.store)));

        tracing::info!(%listen, "metrod server starting");
        let server_token = shutdown.clone();
        let mut server_task: JoinHandle<Result<()>> = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(server_token.cancelled_owned())
                .await
                .map_err(|e| MetrodError::Internal(format!("server failed: {e}")))
        });

        tracing::info!(interval_secs = self.cfg.flush.interval_secs, "metrics flusher starting");
        let flusher = Flusher::new(
            Duration::from_secs(self.cfg.flush.interval_secs),
            Arc::clone(&self.store),
            Arc::clone(&self.sink) as Arc<dyn MetricSink>,
        );
        let flusher_token = shutdown.clone();
        let mut flusher_task: JoinHandle<Result<()>> =
            tokio::spawn(async move { flusher.run(flusher_token).await });

        let mut server_res: Option<Result<()>> = None;
        let mut flusher_res: Option<Result<()>> = None;

        // first component failure or a signal, whichever comes first
        tokio::select! {
            res = &mut server_task => server_res = Some(join_result(res)),
            res = &mut flusher_task => flusher_res = Some(join_result(res)),
            _ = shutdown.cancelled() => {}
        }

        shutdown.cancel();
        tracing::info!("shutdown initiated");

        // Bounded drain: whatever has not finished yet gets the deadline to
        // exit. The flusher's exit path performs the final flush.
        let drain = async {
            let server_res = match server_res {
                Some(res) => res,
                None => join_result(server_task.await),
            };
            let flusher_res = match flusher_res {
                Some(res) => res,
                None => join_result(flusher_task.await),
            };
            (server_res, flusher_res)
        };

        let deadline = Duration::from_secs(self.cfg.shutdown.timeout_secs);
        let (server_res, flusher_res) = match tokio::time::timeout(deadline, drain).await {
            Ok(results) => results,
            Err(_) => {
                self.sink.close().await;
                return Err(MetrodError::ShutdownTimeout);
            }
        };

        self.sink.close().await;
        tracing::info!("shutdown complete");

        // First failure wins; when the server drained cleanly this is where
        // a final-flush error surfaces.
        server_res?;
        flusher_res
    }
}

fn join_result(res: std::result::Result<Result<()>, JoinError>) -> Result<()> {
    match res {
        Ok(inner) => inner,
        Err(e) => Err(MetrodError::Internal(format!("task panicked: {e}"))),
    }
}

/// Cancel `token` on SIGINT or SIGTERM.
fn spawn_signal_watcher(token: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to install SIGINT handler");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => tracing::info!("received SIGINT"),
            _ = terminate => tracing::info!("received SIGTERM"),
        }

        token.cancel();
    });
}
