use axum::extract::State;
use std::sync::Arc;

mod api;
pub mod app_env;
pub mod db;
mod domain;
mod dto;
mod external_connections;
pub mod logging;
mod persistence;
pub mod routes;
mod routing_utils;

/// Data shared by every request handler
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
}

impl SharedData {
    /// Wraps the database pool built at startup so handlers can reach it
    pub fn new(db: sqlx::SqlitePool) -> Self {
        SharedData {
            ext_cxn: persistence::ExternalConnectivity::new(db),
        }
    }
}

/// Extractor for the shared application state
type AppState = State<Arc<SharedData>>;
