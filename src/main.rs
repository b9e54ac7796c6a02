use anyhow::Context;
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use todo_rest::{SharedData, app_env, db, logging, routes};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_result = dotenv();

    let otel_exporters = match (
        env::var(app_env::OTEL_SPAN_EXPORT_URL),
        env::var(app_env::OTEL_METRIC_EXPORT_URL),
    ) {
        (Ok(span_url), Ok(metric_url)) => Some(logging::init_exporters(&span_url, &metric_url)),
        _ => None,
    };
    let otel_enabled = otel_exporters.is_some();
    logging::setup_logging_and_tracing(logging::init_env_filter(), otel_exporters);

    if dotenv_result.is_err() {
        info!("No .env file found, using the process environment as-is");
    }
    if !otel_enabled {
        info!("OpenTelemetry export URLs not set, only logging to stdout");
    }

    let db_url = env::var(app_env::DB_URL).unwrap_or_else(|_| db::DEFAULT_DB_URL.to_owned());
    let db_pool = db::connect_sqlx(&db_url)
        .await
        .with_context(|| format!("connecting to the database at {db_url}"))?;
    db::migrate(&db_pool)
        .await
        .context("running database migrations")?;

    let port = match env::var(app_env::PORT) {
        Ok(raw_port) => raw_port.parse::<u16>().unwrap_or_else(|_| {
            warn!("Could not parse port \"{raw_port}\", using {}", app_env::DEFAULT_PORT);
            app_env::DEFAULT_PORT
        }),
        Err(_) => app_env::DEFAULT_PORT,
    };

    let router = routes::build_router(Arc::new(SharedData::new(db_pool)));
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("binding to port {port}"))?;

    info!("Starting server on port {port}.");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running the HTTP server")?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(signal_err) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for the shutdown signal: {signal_err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
