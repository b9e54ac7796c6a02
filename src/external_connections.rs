use sqlx::SqliteConnection;

/// A handle to an active database connection, either freshly checked out of a pool or
/// borrowed from something else that owns the connection
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut SqliteConnection;
}

/// Gives the persistence layer access to external systems without the domain knowing
/// where those systems live or how they're reached
pub trait ExternalConnectivity: Sync {
    type DbHandle<'cxn_borrow>: ConnectionHandle + Send
    where
        Self: 'cxn_borrow;

    /// Checks out a connection to the database
    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}
