use thiserror::Error;

/// Failure of a datastore call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The query itself failed (connection, syntax, constraint, ...).
    #[error("datastore error: {0}")]
    Datastore(#[from] sqlx::Error),
    /// The query succeeded but matched no rows.
    #[error("no matching rows")]
    NotFound,
}
