pub mod utils;

use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const FINAL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

use crate::http_server;
use crate::{AppState, Config};

/// Initialize logging and the panic handler.
/// Returns guards that must be kept alive for the duration of the program.
fn init_logging(config: &Config) -> Vec<tracing_appender::non_blocking::WorkerGuard> {
    let mut guards = Vec::new();

    // Stdout layer
    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(stdout_guard);

    let stdout_env_filter = EnvFilter::builder()
        .with_default_directive(config.log_level.into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stdout_writer)
        .with_filter(stdout_env_filter);

    // File layer (if log_dir is set)
    if let Some(log_dir) = &config.log_dir {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!(
                "Warning: Failed to create log directory {:?}: {}",
                log_dir, e
            );
        }

        let file_appender = tracing_appender::rolling::daily(log_dir, "quill.log");
        let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
        guards.push(file_guard);

        let file_env_filter = EnvFilter::builder()
            .with_default_directive(config.log_level.into())
            .from_env_lossy();

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .with_filter(file_env_filter);

        tracing_subscriber::registry()
            .with(stdout_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry().with(stdout_layer).init();
    }

    utils::register_panic_logger();

    guards
}

/// Create service state from config, exiting on error.
async fn create_state(config: &Config) -> AppState {
    match AppState::from_config(config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("error creating server state: {}", e);
            std::process::exit(3);
        }
    }
}

/// Wait for shutdown and join all handles with timeout.
async fn shutdown_and_join(graceful_waiter: JoinHandle<()>, handles: Vec<JoinHandle<()>>) {
    let _ = graceful_waiter.await;

    if timeout(FINAL_SHUTDOWN_TIMEOUT, join_all(handles))
        .await
        .is_err()
    {
        tracing::error!(
            "Failed to shut down within {} seconds",
            FINAL_SHUTDOWN_TIMEOUT.as_secs()
        );
        std::process::exit(4);
    }
}

/// Spawns the CMS service: stores + HTTP server.
/// Blocks until a shutdown signal is received.
pub async fn spawn_service(config: &Config) {
    let _guards = init_logging(config);
    let (graceful_waiter, _shutdown_tx, shutdown_rx) = utils::graceful_shutdown_blocker();

    let state = create_state(config).await;

    let server_config = http_server::Config::new(config.listen_addr, config.log_level);
    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = http_server::run(server_config, server_state, shutdown_rx).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tracing::info!(
        addr = %config.listen_addr,
        documents = %config.data_dir.display(),
        "quill serving"
    );

    shutdown_and_join(graceful_waiter, vec![server_handle]).await;
}
