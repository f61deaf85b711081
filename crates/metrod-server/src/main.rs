//! metrod server binary.
//!
//! Ingests metric batches over HTTP, buffers them in memory, and
//! periodically flushes the latest value per name to Postgres.

use tracing_subscriber::{fmt, EnvFilter};

use metrod_server::{app::App, config};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "metrod.yaml".to_string());

    let cfg = match config::load_from_file(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, path = %config_path, "failed to load config");
            std::process::exit(1);
        }
    };

    let app = match App::new(cfg).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize");
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run().await {
        tracing::error!(error = %e, "exited with error");
        std::process::exit(1);
    }
}
