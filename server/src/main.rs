mod audit;
mod config;
mod error;
mod routes;

use config::ServerConfig;
use dotenvy::dotenv;
use error::ServerError;
use routes::{AppState, app};
use std::net::SocketAddr;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{Layer as _, fmt};

fn tracing_level() -> tracing::Level {
    if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_result = dotenv();

    let startup = ServerConfig::from_env()
        .map_err(ServerError::from)
        .and_then(|config| {
            let layer = audit::audit_layer(&config.audit_log).map_err(|source| {
                ServerError::AuditLog {
                    path: config.audit_log.clone(),
                    source,
                }
            })?;
            Ok((config, layer))
        });
    let (config, audit_layer) = match startup {
        Ok((config, layer)) => (Ok(config), Some(layer)),
        Err(err) => (Err(err), None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_filter(LevelFilter::from_level(tracing_level())),
        )
        .with(audit_layer)
        .init();

    if env_result.is_err() {
        tracing::warn!("There is no corresponding .env file");
    }

    let result = match config {
        Ok(config) => run(config).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => {
            tracing::info!("Server shutdown gracefully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Binds the configured address and serves until the listener closes.
async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.addr,
            source,
        })?;
    tracing::info!(
        reporting = ?config.pipeline.reporting,
        audit_log = %config.audit_log.display(),
        "Listening on http://{}",
        config.addr
    );

    let app = app(AppState {
        pipeline: config.pipeline,
    });
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(ServerError::Serve)
}
