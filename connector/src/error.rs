use thiserror::Error;

/// Errors surfaced by the connector. Driver errors propagate unmodified -
/// no retry, no partial-failure recovery, and never collapsed into a default
/// value (an existence probe raises on connectivity loss rather than
/// answering `false`).
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("connection pool: {0}")]
    Pool(#[from] bb8::RunError<tokio_postgres::Error>),
    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),
    #[error("unsupported column type: {0}")]
    UnsupportedType(tokio_postgres::types::Type),
}
