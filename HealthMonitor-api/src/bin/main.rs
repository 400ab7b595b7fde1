use std::net::SocketAddr;

use anyhow::Context;
use chrono::NaiveTime;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use health_monitor_api::api::create_application;
use health_monitor_api::config::ServerConfig;
use health_monitor_data::fixtures;

/// The main entry point for the Health Monitor API server
///
/// This function:
/// 1. Initializes environment variables from .env file
/// 2. Sets up tracing for logging
/// 3. Loads the server configuration
/// 4. Optionally writes generated documents into the data root
/// 5. Creates and starts the Axum web application
/// 6. Handles graceful shutdown
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_ansi(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stdout),
        )
        .with(env_filter)
        .init();

    info!("Starting Health Monitoring API server");

    let config = ServerConfig::from_env().context("Invalid configuration")?;
    info!(
        "Serving documents from {} (default {}/{})",
        config.data_root.display(),
        config.default_user,
        config.default_date
    );

    if config.seed_mock_data {
        seed_mock_data(&config).await?;
    }

    if !config.data_root.is_dir() {
        warn!(
            "Data root {} does not exist yet, every data request will return 404",
            config.data_root.display()
        );
    }

    let app = create_application(&config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Write a generated day of blood pressure readings and a night of sleep
/// epochs for the default user and date, keeping any stored documents
async fn seed_mock_data(config: &ServerConfig) -> anyhow::Result<()> {
    let (blood_pressure, sleep) = {
        let mut rng = rand::thread_rng();
        let morning = NaiveTime::from_hms_opt(8, 0, 0).context("invalid start time")?;
        let evening = NaiveTime::from_hms_opt(21, 30, 0).context("invalid start time")?;
        (
            fixtures::generate_blood_pressure_document(
                &config.default_user,
                &config.default_date,
                morning,
                120,
                &mut rng,
            ),
            fixtures::generate_sleep_document(
                &config.default_user,
                &config.default_date,
                evening,
                240,
                &mut rng,
            ),
        )
    };

    let written = [
        fixtures::seed_document(&config.data_root, &blood_pressure)
            .await
            .context("Failed to write blood pressure fixture")?,
        fixtures::seed_document(&config.data_root, &sleep)
            .await
            .context("Failed to write sleep fixture")?,
    ];
    if written.iter().all(Option::is_none) {
        info!(
            "Stored documents already present for {}/{}, nothing seeded",
            config.default_user, config.default_date
        );
        return Ok(());
    }

    info!("Seeded mock data for {}/{}", config.default_user, config.default_date);
    Ok(())
}

/// Sets up a signal handler for graceful shutdown
///
/// Waits for either CTRL+C or SIGTERM (on Unix systems), then returns to
/// trigger the graceful shutdown process.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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

    info!("Shutting down server...");
}
