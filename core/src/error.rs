use thiserror::Error;

/// Configuration errors raised while declaring a table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaError {
    #[error("table name is required")]
    MissingTableName,
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
    #[error("column name is required")]
    MissingColumnName,
}
