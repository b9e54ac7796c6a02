/// Connection URL for the SQLite database, e.g. `sqlite://todo.db` or `sqlite::memory:`
pub const DB_URL: &str = "DATABASE_URL";
/// Port the HTTP server listens on
pub const PORT: &str = "PORT";
/// Log level configuration for the application. Uses [EnvFilter](tracing_subscriber::EnvFilter) directive syntax,
/// so per-module levels like `todo_rest=debug,sqlx=warn` work
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

/// Port used when [PORT] isn't set
pub const DEFAULT_PORT: u16 = 8080;
