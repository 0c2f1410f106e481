//! Schema model and row mapping.
//!
//! Tables are declared once, explicitly, through [`Table::builder`]; no
//! runtime reflection is involved. Rows are ephemeral name-to-value maps
//! produced by the mapper on the read path or by callers on the write path.

pub mod error;
pub mod row;
pub mod schema;

pub use error::SchemaError;
pub use row::Row;
pub use schema::{Column, ColumnSpec, Table, TableBuilder};
